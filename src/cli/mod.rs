//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the gateway using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Cosmos Gateway - CRUD operations against Azure Cosmos DB
#[derive(Parser, Debug)]
#[command(name = "cosmos-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cosmos-gateway.toml", env = "GATEWAY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GATEWAY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or read a database
    Database(commands::database::DatabaseArgs),

    /// Create, read or scale a container
    Container(commands::container::ContainerArgs),

    /// Create, read, list, replace or delete items
    Item(commands::item::ItemArgs),

    /// Run a query and print the results
    Query(commands::query::QueryArgs),

    /// Delete every item a query matches
    DeleteByQuery(commands::delete_by_query::DeleteByQueryArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Run every operation end to end against the account
    SmokeTest(commands::smoke::SmokeTestArgs),
}

impl Commands {
    /// Whether the command reads the configuration file
    pub fn needs_config(&self) -> bool {
        !matches!(self, Commands::Init(_))
    }
}
