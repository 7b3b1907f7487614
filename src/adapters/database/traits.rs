//! Document store abstraction
//!
//! This trait is the method surface the gateway needs from a remote
//! document database. The Cosmos DB adapter implements it over the vendor
//! SDK; tests implement it in memory.

use crate::domain::{
    ContainerDescriptor, DatabaseDescriptor, Offer, PartitionKeySpec, PartitionKeyValue,
    QuerySpec, Result,
};
use async_trait::async_trait;
use serde_json::Value;

/// Remote document store
///
/// Every method is a single logical remote call (or a read-then-create pair
/// for the `*_if_not_exists` methods). Implementations must not retry on
/// their own beyond what the underlying client does.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Endpoint of the account this store talks to
    fn endpoint(&self) -> &str;

    /// Create the database if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the database can neither be read nor created.
    async fn create_database_if_not_exists(&self, database_id: &str)
        -> Result<DatabaseDescriptor>;

    /// Read a database definition
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the database is absent.
    async fn read_database(&self, database_id: &str) -> Result<DatabaseDescriptor>;

    /// Create the container if it does not exist
    ///
    /// An existing container is returned as is, whatever its partition key.
    async fn create_container_if_not_exists(
        &self,
        database_id: &str,
        container_id: &str,
        partition_key: &PartitionKeySpec,
    ) -> Result<ContainerDescriptor>;

    /// Read a container definition
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the container is absent.
    async fn read_container(
        &self,
        database_id: &str,
        container_id: &str,
    ) -> Result<ContainerDescriptor>;

    /// Read the throughput offers visible for a container
    ///
    /// Implementations may return offers of other resources too; callers
    /// match on [`Offer::offer_resource_id`].
    async fn read_offers(&self, database_id: &str, container_id: &str) -> Result<Vec<Offer>>;

    /// Replace an offer with the given definition
    async fn replace_offer(&self, database_id: &str, container_id: &str, offer: &Offer)
        -> Result<Offer>;

    /// Insert the item, or replace it if one with the same id and key exists
    async fn upsert_item(
        &self,
        database_id: &str,
        container_id: &str,
        partition_key: &PartitionKeyValue,
        item: &Value,
    ) -> Result<()>;

    /// Read an item by id and partition-key value
    async fn read_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
    ) -> Result<Value>;

    /// Replace an existing item wholesale
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no item matches id and partition key.
    async fn replace_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
        item: &Value,
    ) -> Result<()>;

    /// Delete an item by id and partition-key value
    async fn delete_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
    ) -> Result<()>;

    /// Run a query and drain every page of its result set
    async fn query_items(
        &self,
        database_id: &str,
        container_id: &str,
        query: &QuerySpec,
    ) -> Result<Vec<Value>>;

    /// Read every item of a container
    async fn read_all_items(&self, database_id: &str, container_id: &str) -> Result<Vec<Value>> {
        self.query_items(database_id, container_id, &QuerySpec::new("SELECT * FROM c"))
            .await
    }
}
