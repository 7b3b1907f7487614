//! Configuration management for the gateway.
//!
//! The gateway is constructed once from an explicit [`GatewayConfig`]; nothing
//! reads configuration behind the caller's back.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cosmos_gateway::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cosmos-gateway.toml")?;
//! println!("Endpoint: {}", config.cosmosdb.endpoint);
//! println!("Partition key: {:?}", config.cosmosdb.partition_key.paths);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [cosmosdb]
//! endpoint = "https://your-account.documents.azure.com:443/"
//! key = "${GATEWAY_COSMOS_KEY}"
//! user_agent_suffix = "CosmosDBGateway"
//! default_throughput = 500
//!
//! [cosmosdb.partition_key]
//! paths = ["/partitionKey"]
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted before parsing, and
//! `GATEWAY_<SECTION>_<KEY>` variables override parsed values:
//!
//! ```bash
//! export GATEWAY_COSMOS_KEY="secret-key"
//! export GATEWAY_COSMOSDB_ENDPOINT="https://localhost:8081/"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    validate_throughput, ApplicationConfig, CosmosDbConfig, GatewayConfig, LoggingConfig,
    PartitionKeyConfig,
};
pub use secret::{account_key, AccountKey, KeyMaterial};
