//! Database commands
//!
//! `database create` and `database read`.

use super::{connect, report_failure, EXIT_OK};
use clap::{Args, Subcommand};

/// Arguments for the database command
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    #[command(subcommand)]
    pub action: DatabaseAction,
}

/// Database operations
#[derive(Subcommand, Debug)]
pub enum DatabaseAction {
    /// Create the database if it does not exist
    Create {
        /// Database id
        #[arg(short, long)]
        database: String,
    },

    /// Read the database definition
    Read {
        /// Database id
        #[arg(short, long)]
        database: String,
    },
}

impl DatabaseArgs {
    /// Execute the database command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, gateway) = match connect(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match &self.action {
            DatabaseAction::Create { database } => match gateway.create_database(database).await {
                Ok(descriptor) => {
                    println!("✅ Created database: {}", descriptor.id);
                    Ok(EXIT_OK)
                }
                Err(e) => Ok(report_failure("Failed to create database", &e)),
            },
            DatabaseAction::Read { database } => match gateway.read_database(database).await {
                Ok(descriptor) => {
                    println!("Database: {}", descriptor.id);
                    if let Some(rid) = descriptor.resource_id {
                        println!("  Resource id: {rid}");
                    }
                    Ok(EXIT_OK)
                }
                Err(e) => Ok(report_failure("Failed to read database", &e)),
            },
        }
    }
}
