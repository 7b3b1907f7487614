//! CLI command implementations
//!
//! Commands print human-readable progress on stdout and return the process
//! exit code: 0 success, 2 configuration or input error, 4 connection error,
//! 5 fatal error.

pub mod container;
pub mod database;
pub mod delete_by_query;
pub mod init;
pub mod item;
pub mod query;
pub mod smoke;
pub mod validate;

use crate::config::{load_config, GatewayConfig};
use crate::core::Gateway;
use crate::domain::context::ResultExt;
use crate::domain::{CosmosDbError, GatewayError, PartitionKeyValue};
use clap::Args;
use serde_json::Value;
use std::fs;

/// Exit code for a successful command
pub const EXIT_OK: i32 = 0;

/// Exit code for configuration and input errors
pub const EXIT_CONFIG: i32 = 2;

/// Exit code when the account cannot be reached
pub const EXIT_CONNECTION: i32 = 4;

/// Exit code for every other failure
pub const EXIT_FATAL: i32 = 5;

/// Maps a gateway error onto a process exit code
pub fn exit_code_for(error: &GatewayError) -> i32 {
    match error {
        GatewayError::Configuration(_) | GatewayError::Validation(_) => EXIT_CONFIG,
        GatewayError::CosmosDb(CosmosDbError::ConnectionFailed(_)) => EXIT_CONNECTION,
        _ => EXIT_FATAL,
    }
}

/// Prints a command failure and returns its exit code
pub(crate) fn report_failure(context: &str, error: &GatewayError) -> i32 {
    crate::log_error_with_context!(error, context);
    println!("❌ {context}");
    println!("   Error: {error}");
    exit_code_for(error)
}

/// Loads the configuration and builds a gateway from it
///
/// On failure the problem has already been printed and the exit code is
/// returned as the error.
pub(crate) fn connect(config_path: &str) -> Result<(GatewayConfig, Gateway), i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration file: {config_path}");
            println!("   Error: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    match Gateway::from_config(&config.cosmosdb) {
        Ok(gateway) => Ok((config, gateway)),
        Err(e) => {
            println!("❌ Failed to create Cosmos DB client");
            println!("   Error: {e}");
            Err(EXIT_CONNECTION)
        }
    }
}

/// Pretty-prints a JSON value on stdout
pub(crate) fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

/// Parses a command-line value as JSON, falling back to a plain string
pub fn parse_json_or_string(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parses a `--param @name=value` argument
pub fn parse_query_param(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected @name=value, got '{raw}'"))?;
    if !name.starts_with('@') || name.len() < 2 {
        return Err(format!("parameter name must start with '@', got '{name}'"));
    }
    Ok((name.to_string(), parse_json_or_string(value)))
}

/// Parses a `--partition-key` argument
pub fn parse_partition_key(raw: &str) -> Result<PartitionKeyValue, String> {
    PartitionKeyValue::parse_arg(raw).map_err(|e| e.to_string())
}

/// Database and container a command targets
#[derive(Args, Debug, Clone)]
pub struct ContainerTarget {
    /// Database id
    #[arg(short, long)]
    pub database: String,

    /// Container id
    #[arg(short = 'C', long)]
    pub container: String,
}

/// Item body, read from a file or given inline
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ItemBody {
    /// Path to a JSON file holding the item
    #[arg(short, long)]
    pub file: Option<String>,

    /// Item as inline JSON
    #[arg(short, long)]
    pub json: Option<String>,
}

impl ItemBody {
    /// Reads and parses the item body
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the text is not JSON,
    /// or the JSON is not an object.
    pub fn load(&self) -> crate::domain::Result<Value> {
        let text = match (&self.file, &self.json) {
            (Some(path), _) => {
                fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
            }
            (None, Some(json)) => json.clone(),
            (None, None) => {
                return Err(GatewayError::Validation(
                    "Either --file or --json is required".to_string(),
                ))
            }
        };

        let value: Value = serde_json::from_str(&text).context("Item is not valid JSON")?;
        if !value.is_object() {
            return Err(GatewayError::Validation(
                "Item must be a JSON object".to_string(),
            ));
        }
        Ok(value)
    }
}
