//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GatewayConfig;
use super::secret::account_key;
use crate::domain::errors::GatewayError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GatewayConfig
/// 4. Applies environment variable overrides (GATEWAY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use cosmos_gateway::config::loader::load_config;
///
/// let config = load_config("cosmos-gateway.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GatewayError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GatewayError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn load_config_from_str(contents: &str) -> Result<GatewayConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: GatewayConfig = toml::from_str(&contents)
        .map_err(|e| GatewayError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        GatewayError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. Every missing variable is reported
/// in a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GatewayError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GatewayError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the GATEWAY_* prefix
///
/// Environment variables follow the pattern: GATEWAY_<SECTION>_<KEY>
/// For example: GATEWAY_COSMOSDB_ENDPOINT, GATEWAY_LOGGING_LOCAL_PATH.
/// Partition-key paths are comma separated.
fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(val) = std::env::var("GATEWAY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("GATEWAY_COSMOSDB_ENDPOINT") {
        config.cosmosdb.endpoint = val;
    }
    if let Ok(val) = std::env::var("GATEWAY_COSMOSDB_KEY") {
        config.cosmosdb.key = account_key(val);
    }
    if let Ok(val) = std::env::var("GATEWAY_COSMOSDB_USER_AGENT_SUFFIX") {
        config.cosmosdb.user_agent_suffix = val;
    }
    if let Ok(val) = std::env::var("GATEWAY_COSMOSDB_PARTITION_KEY_PATHS") {
        config.cosmosdb.partition_key.paths = val
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
    }
    if let Ok(val) = std::env::var("GATEWAY_COSMOSDB_DEFAULT_THROUGHPUT") {
        if let Ok(throughput) = val.parse() {
            config.cosmosdb.default_throughput = throughput;
        }
    }

    if let Ok(val) = std::env::var("GATEWAY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("GATEWAY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("GATEWAY_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
