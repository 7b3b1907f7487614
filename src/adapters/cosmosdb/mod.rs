//! Azure Cosmos DB integration
//!
//! This module implements [`crate::adapters::database::DocumentStore`] on top
//! of the `azure_data_cosmos` SDK.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::CosmosDbAdapter;
pub use client::CosmosDbClient;
