// Cosmos Gateway - CRUD gateway over Azure Cosmos DB
// Copyright (c) 2025 Cosmos Gateway Contributors
// Licensed under the MIT License

use clap::Parser;
use cosmos_gateway::cli::commands::EXIT_FATAL;
use cosmos_gateway::cli::{Cli, Commands};
use cosmos_gateway::config::{load_config, LoggingConfig};
use cosmos_gateway::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The command itself reports configuration problems; here the file only
    // contributes logging settings when it loads cleanly.
    let loaded = if cli.command.needs_config() {
        load_config(&cli.config).ok()
    } else {
        None
    };

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = loaded
        .map(|c| c.logging)
        .unwrap_or_else(LoggingConfig::default);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Cosmos Gateway - CRUD gateway over Azure Cosmos DB"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // Flush the file writer before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Database(args) => args.execute(&cli.config).await,
        Commands::Container(args) => args.execute(&cli.config).await,
        Commands::Item(args) => args.execute(&cli.config).await,
        Commands::Query(args) => args.execute(&cli.config).await,
        Commands::DeleteByQuery(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
        Commands::SmokeTest(args) => args.execute(&cli.config).await,
    }
}
