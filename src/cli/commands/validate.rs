//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the gateway configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates; this reports the outcome and a summary.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Cosmos DB Endpoint: {}", config.cosmosdb.endpoint);
        println!("  User Agent Suffix: {}", config.cosmosdb.user_agent_suffix);
        println!(
            "  Partition Key Paths: {:?}",
            config.cosmosdb.partition_key.paths
        );
        println!(
            "  Default Throughput: {} RU/s",
            config.cosmosdb.default_throughput
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(EXIT_OK)
    }
}
