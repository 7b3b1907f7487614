//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Sample configuration written by `init`
pub const SAMPLE_CONFIG: &str = r#"# Cosmos Gateway Configuration File

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[cosmosdb]
# Account endpoint; http:// is only accepted for the local emulator
endpoint = "https://your-account.documents.azure.com:443/"

# Account key (use an environment variable)
key = "${GATEWAY_COSMOS_KEY}"

# Appended to the SDK user agent
user_agent_suffix = "CosmosDBGateway"

# Throughput used by `container scale` when --throughput is absent
default_throughput = 500

[cosmosdb.partition_key]
# Containers are hash-partitioned on these paths; item operations read the
# partition-key value from the first one
paths = ["/partitionKey"]

[logging]
# JSON log files next to the console output
local_enabled = false
local_path = "/var/log/cosmos-gateway"
# daily | hourly | never
local_rotation = "daily"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cosmos-gateway.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set the endpoint in {}", self.output);
                println!("  2. Put GATEWAY_COSMOS_KEY=<account key> in a .env file");
                println!("  3. Validate configuration: cosmos-gateway validate-config");
                println!("  4. Try it out: cosmos-gateway smoke-test -d ToDoList -C Items");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
