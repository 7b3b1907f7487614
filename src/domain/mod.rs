//! Domain types for the gateway.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Resource shapes** ([`DatabaseDescriptor`], [`ContainerDescriptor`], [`Offer`])
//! - **Partitioning** ([`PartitionKeySpec`], [`PartitionKeyValue`])
//! - **Queries** ([`QuerySpec`], [`QueryParameter`])
//! - **Error types** ([`GatewayError`], [`CosmosDbError`])
//! - **Result type alias** ([`Result`])
//!
//! Items themselves are arbitrary JSON documents (`serde_json::Value`).
//!
//! # Example
//!
//! ```rust
//! use cosmos_gateway::domain::{QuerySpec, Result};
//!
//! fn usa_families() -> Result<QuerySpec> {
//!     QuerySpec::new("SELECT * FROM root r WHERE r.partitionKey = @pk")
//!         .with_parameter("@pk", "USA")
//! }
//! ```

pub mod context;
pub mod errors;
pub mod models;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{CosmosDbError, GatewayError};
pub use models::{
    ContainerDescriptor, DatabaseDescriptor, Offer, PartitionKeyKind, PartitionKeySpec,
    PartitionKeyValue, QueryParameter, QuerySpec, ScaleOutcome,
};
pub use result::Result;
