//! Document store factory
//!
//! Builds the long-lived store the gateway is constructed with.

use crate::adapters::cosmosdb::adapter::CosmosDbAdapter;
use crate::adapters::cosmosdb::client::CosmosDbClient;
use crate::adapters::database::traits::DocumentStore;
use crate::config::CosmosDbConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the Cosmos DB document store from configuration
///
/// The returned store owns a single SDK client for its whole lifetime.
///
/// # Errors
///
/// Returns an error if the SDK client cannot be created
pub fn create_document_store(config: &CosmosDbConfig) -> Result<Arc<dyn DocumentStore>> {
    tracing::debug!(endpoint = %config.endpoint, "Creating Cosmos DB client");

    let client = CosmosDbClient::new(config.clone())?;
    let adapter = CosmosDbAdapter::new(client);

    Ok(Arc::new(adapter) as Arc<dyn DocumentStore>)
}
