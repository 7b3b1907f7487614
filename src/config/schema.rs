//! Configuration schema types
//!
//! This module defines the configuration structure for the gateway.

use crate::config::AccountKey;
use crate::domain::PartitionKeySpec;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Azure Cosmos DB account settings
    pub cosmosdb: CosmosDbConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.cosmosdb.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Azure Cosmos DB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosDbConfig {
    /// Account endpoint URL
    pub endpoint: String,

    /// Account key
    /// Stored securely in memory and automatically zeroized on drop
    pub key: AccountKey,

    /// Suffix appended to the SDK's user agent to identify this client
    #[serde(default = "default_user_agent_suffix", alias = "userAgentSuffix")]
    pub user_agent_suffix: String,

    /// Partition key used for every container created through the gateway
    #[serde(default, alias = "partitionKey")]
    pub partition_key: PartitionKeyConfig,

    /// Throughput (RU/s) applied by `container scale` when none is given
    #[serde(default = "default_throughput", alias = "defaultThroughput")]
    pub default_throughput: u32,
}

impl CosmosDbConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.endpoint.is_empty() {
            return Err("cosmosdb.endpoint cannot be empty".to_string());
        }

        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| format!("cosmosdb.endpoint is not a valid URL: {e}"))?;

        // The local emulator is the only endpoint allowed over plain http
        let is_local = matches!(url.host_str(), Some("localhost") | Some("127.0.0.1"));
        match url.scheme() {
            "https" => {}
            "http" if is_local => {}
            _ => {
                return Err(
                    "cosmosdb.endpoint must start with https:// (http:// only for localhost)"
                        .to_string(),
                )
            }
        }

        if self.key.expose_secret().is_blank() {
            return Err("cosmosdb.key cannot be empty".to_string());
        }

        self.partition_key.validate()?;
        validate_throughput(self.default_throughput)
            .map_err(|e| format!("cosmosdb.default_throughput: {e}"))?;

        Ok(())
    }
}

/// Partition-key section of the Cosmos DB configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionKeyConfig {
    /// Ordered document paths, e.g. `["/partitionKey"]`
    #[serde(default = "default_partition_key_paths")]
    pub paths: Vec<String>,
}

impl PartitionKeyConfig {
    fn validate(&self) -> Result<(), String> {
        if self.paths.is_empty() {
            return Err("cosmosdb.partition_key.paths cannot be empty".to_string());
        }

        for path in &self.paths {
            if !path.starts_with('/') || path.len() < 2 {
                return Err(format!(
                    "cosmosdb.partition_key.paths entries must look like '/field', got '{path}'"
                ));
            }
        }

        Ok(())
    }

    /// Hash partition-key specification over the configured paths
    pub fn to_spec(&self) -> PartitionKeySpec {
        PartitionKeySpec::hash(self.paths.iter().cloned())
    }
}

impl Default for PartitionKeyConfig {
    fn default() -> Self {
        Self {
            paths: default_partition_key_paths(),
        }
    }
}

/// Checks the configured default throughput
///
/// Manual throughput must be at least 400 RU/s and a multiple of 100.
/// Values passed to scaling at run time are left to the service to judge.
pub fn validate_throughput(throughput: u32) -> Result<(), String> {
    if throughput < MIN_THROUGHPUT {
        return Err(format!(
            "throughput must be at least {MIN_THROUGHPUT} RU/s, got {throughput}"
        ));
    }
    if throughput % 100 != 0 {
        return Err(format!(
            "throughput must be a multiple of 100 RU/s, got {throughput}"
        ));
    }
    Ok(())
}

/// Lowest manual throughput the service accepts for a container
pub const MIN_THROUGHPUT: u32 = 400;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_user_agent_suffix() -> String {
    "CosmosDBGateway".to_string()
}

fn default_partition_key_paths() -> Vec<String> {
    vec!["/partitionKey".to_string()]
}

fn default_throughput() -> u32 {
    500
}

fn default_local_path() -> String {
    "/var/log/cosmos-gateway".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
