//! Core gateway logic
//!
//! # Modules
//!
//! - [`gateway`] - The [`Gateway`] facade and its twelve operations
//! - [`partition`] - Item id and partition-key extraction
//! - [`throughput`] - Offer lookup for throughput scaling
//!
//! # Example
//!
//! ```rust,no_run
//! use cosmos_gateway::config::load_config;
//! use cosmos_gateway::core::Gateway;
//! use cosmos_gateway::domain::QuerySpec;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cosmos-gateway.toml")?;
//! let gateway = Gateway::from_config(&config.cosmosdb)?;
//!
//! gateway.create_database("ToDoList").await?;
//! gateway.create_container("ToDoList", "Items").await?;
//! gateway
//!     .create_item(
//!         "ToDoList",
//!         "Items",
//!         &json!({"id": "1", "partitionKey": "USA", "done": false}),
//!     )
//!     .await?;
//!
//! let query = QuerySpec::new("SELECT * FROM root r WHERE r.partitionKey = @pk")
//!     .with_parameter("@pk", "USA")?;
//! let items = gateway.query_items("ToDoList", "Items", &query).await?;
//! println!("{} item(s)", items.len());
//! # Ok(())
//! # }
//! ```

pub mod gateway;
pub mod partition;
pub mod throughput;

pub use gateway::Gateway;
