//! External system integrations
//!
//! - [`database`] - Document store abstraction (trait-based)
//! - [`cosmosdb`] - Azure Cosmos DB implementation
//!
//! # Design Pattern
//!
//! Adapters isolate the vendor SDK behind the [`database::DocumentStore`]
//! trait, so the gateway can be exercised against an in-memory store.
//!
//! ```rust,no_run
//! use cosmos_gateway::adapters::database::create_document_store;
//! use cosmos_gateway::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cosmos-gateway.toml")?;
//! let store = create_document_store(&config.cosmosdb)?;
//! let database = store.create_database_if_not_exists("ToDoList").await?;
//! println!("{}", database.id);
//! # Ok(())
//! # }
//! ```

pub mod cosmosdb;
pub mod database;
