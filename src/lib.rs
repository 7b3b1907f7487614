// Cosmos Gateway - CRUD gateway over Azure Cosmos DB
// Copyright (c) 2025 Cosmos Gateway Contributors
// Licensed under the MIT License

//! # Cosmos Gateway
//!
//! A thin CRUD gateway over Azure Cosmos DB (NoSQL API). It creates and
//! reads databases and containers, scales container throughput, and
//! upserts, reads, replaces, queries and deletes JSON documents.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The [`core::Gateway`] facade
//! - [`adapters`] - Document store trait and its Cosmos DB implementation
//! - [`domain`] - Request/response shapes and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! The gateway owns one long-lived store. Production code builds it from
//! configuration; tests inject their own [`adapters::database::DocumentStore`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cosmos_gateway::config::load_config;
//! use cosmos_gateway::core::Gateway;
//! use cosmos_gateway::domain::PartitionKeyValue;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("cosmos-gateway.toml")?;
//!     let gateway = Gateway::from_config(&config.cosmosdb)?;
//!
//!     gateway.create_database("FamilyDatabase").await?;
//!     gateway.create_container("FamilyDatabase", "FamilyContainer").await?;
//!
//!     let item = json!({"id": "Andersen.1", "partitionKey": "USA"});
//!     gateway.create_item("FamilyDatabase", "FamilyContainer", &item).await?;
//!
//!     let stored = gateway
//!         .read_item(
//!             "FamilyDatabase",
//!             "FamilyContainer",
//!             "Andersen.1",
//!             &PartitionKeyValue::from("USA"),
//!         )
//!         .await?;
//!     println!("{stored}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`]. Remote failures keep
//! the HTTP status the service answered with:
//!
//! ```rust,no_run
//! use cosmos_gateway::core::Gateway;
//!
//! # async fn example(gateway: &Gateway) -> cosmos_gateway::domain::Result<()> {
//! match gateway.read_database("missing").await {
//!     Ok(db) => println!("found {}", db.id),
//!     Err(e) if e.is_not_found() => println!("no such database"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Operations log through `tracing` at debug level on success:
//!
//! ```rust,no_run
//! use cosmos_gateway::config::LoggingConfig;
//! use cosmos_gateway::logging::init_logging;
//!
//! let _guard = init_logging("debug", &LoggingConfig::default()).unwrap();
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
