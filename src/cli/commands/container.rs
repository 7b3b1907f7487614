//! Container commands
//!
//! `container create`, `container read` and `container scale`.

use super::{connect, report_failure, ContainerTarget, EXIT_OK};
use crate::domain::ScaleOutcome;
use clap::{Args, Subcommand};

/// Arguments for the container command
#[derive(Args, Debug)]
pub struct ContainerArgs {
    #[command(subcommand)]
    pub action: ContainerAction,
}

/// Container operations
#[derive(Subcommand, Debug)]
pub enum ContainerAction {
    /// Create the container if it does not exist
    Create(ContainerTarget),

    /// Read the container definition
    Read(ContainerTarget),

    /// Set the provisioned throughput of the container
    Scale {
        #[command(flatten)]
        target: ContainerTarget,

        /// Throughput in RU/s (defaults to cosmosdb.default_throughput)
        #[arg(short, long)]
        throughput: Option<u32>,
    },
}

impl ContainerArgs {
    /// Execute the container command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, gateway) = match connect(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match &self.action {
            ContainerAction::Create(target) => {
                match gateway
                    .create_container(&target.database, &target.container)
                    .await
                {
                    Ok(descriptor) => {
                        println!("✅ Created container: {}", descriptor.id);
                        println!("  Partition key: {:?}", descriptor.partition_key.paths);
                        Ok(EXIT_OK)
                    }
                    Err(e) => Ok(report_failure("Failed to create container", &e)),
                }
            }
            ContainerAction::Read(target) => {
                match gateway
                    .read_container(&target.database, &target.container)
                    .await
                {
                    Ok(descriptor) => {
                        println!("Container: {}", descriptor.id);
                        println!("  Partition key: {:?}", descriptor.partition_key.paths);
                        if let Some(rid) = descriptor.resource_id {
                            println!("  Resource id: {rid}");
                        }
                        Ok(EXIT_OK)
                    }
                    Err(e) => Ok(report_failure("Failed to read container", &e)),
                }
            }
            ContainerAction::Scale { target, throughput } => {
                let throughput = throughput.unwrap_or(config.cosmosdb.default_throughput);
                match gateway
                    .scale_container(&target.database, &target.container, throughput)
                    .await
                {
                    Ok(outcome) => {
                        print_outcome(&outcome);
                        Ok(EXIT_OK)
                    }
                    Err(e) => Ok(report_failure("Failed to scale container", &e)),
                }
            }
        }
    }
}

fn print_outcome(outcome: &ScaleOutcome) {
    match outcome {
        ScaleOutcome::Scaled {
            offer_id,
            throughput,
        } => println!("✅ Updated offer {offer_id} to {throughput} RU/s"),
        ScaleOutcome::NoMatchingOffer => {
            println!("ℹ️  No dedicated offer found for the container; nothing changed")
        }
        ScaleOutcome::Rejected { message } => {
            println!("⚠️  Cannot change container throughput");
            println!("   {message}");
        }
    }
}
