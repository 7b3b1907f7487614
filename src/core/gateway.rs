//! Gateway facade
//!
//! The facade exposes the database, container and item operations callers
//! use. Every operation is a thin pass-through to the shared
//! [`DocumentStore`]; the facade adds parameter shaping, the offer lookup
//! for scaling, the delete-by-query fan-out, and a debug log line on success.

use crate::adapters::database::{create_document_store, DocumentStore};
use crate::config::CosmosDbConfig;
use crate::core::partition::{extract_item_id, extract_partition_key, field_partition_key};
use crate::core::throughput::find_offer;
use crate::domain::context::ResultExt;
use crate::domain::{
    ContainerDescriptor, DatabaseDescriptor, GatewayError, PartitionKeySpec, PartitionKeyValue,
    QuerySpec, Result, ScaleOutcome,
};
use futures::future::try_join_all;
use serde_json::Value;
use std::sync::Arc;

/// CRUD gateway over a document store
///
/// Cheap to clone; clones share the same store and its client.
#[derive(Clone)]
pub struct Gateway {
    store: Arc<dyn DocumentStore>,
    partition_key: PartitionKeySpec,
}

impl Gateway {
    /// Create a gateway over an existing store
    ///
    /// Containers created through this gateway use `partition_key`, and item
    /// operations read each document's key from its first path.
    pub fn new(store: Arc<dyn DocumentStore>, partition_key: PartitionKeySpec) -> Self {
        Self {
            store,
            partition_key,
        }
    }

    /// Create a gateway backed by Cosmos DB
    ///
    /// # Errors
    ///
    /// Returns an error if the Cosmos client cannot be created.
    pub fn from_config(config: &CosmosDbConfig) -> Result<Self> {
        let store = create_document_store(config)?;
        Ok(Self::new(store, config.partition_key.to_spec()))
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Partition-key specification new containers get
    pub fn partition_key(&self) -> &PartitionKeySpec {
        &self.partition_key
    }

    fn key_path(&self) -> Result<&str> {
        self.partition_key.primary_path().ok_or_else(|| {
            GatewayError::Configuration("No partition-key path configured".to_string())
        })
    }

    /// Create a database if it does not exist yet
    pub async fn create_database(&self, database_id: &str) -> Result<DatabaseDescriptor> {
        let database = self.store.create_database_if_not_exists(database_id).await?;
        tracing::debug!(database = %database.id, "Created database");
        Ok(database)
    }

    /// Read a database definition
    pub async fn read_database(&self, database_id: &str) -> Result<DatabaseDescriptor> {
        let database = self.store.read_database(database_id).await?;
        tracing::debug!(database = %database.id, "Reading database");
        Ok(database)
    }

    /// Create a container if it does not exist yet
    ///
    /// The container is hash-partitioned on the configured paths. An existing
    /// container is returned unchanged.
    pub async fn create_container(
        &self,
        database_id: &str,
        container_id: &str,
    ) -> Result<ContainerDescriptor> {
        let container = self
            .store
            .create_container_if_not_exists(database_id, container_id, &self.partition_key)
            .await?;
        tracing::debug!(
            database = %database_id,
            container = %container.id,
            "Created container"
        );
        Ok(container)
    }

    /// Read a container definition
    pub async fn read_container(
        &self,
        database_id: &str,
        container_id: &str,
    ) -> Result<ContainerDescriptor> {
        let container = self.store.read_container(database_id, container_id).await?;
        tracing::debug!(
            database = %database_id,
            container = %container.id,
            "Reading container"
        );
        Ok(container)
    }

    /// Set the provisioned throughput of a container
    ///
    /// Only the offer referencing the container's resource id is touched.
    /// A container without such an offer is left alone. The value is not
    /// checked locally: a bad request from the service while reading or
    /// replacing the offer is logged and reported as
    /// [`ScaleOutcome::Rejected`]. Failures reading the container, and
    /// every other remote failure, propagate.
    pub async fn scale_container(
        &self,
        database_id: &str,
        container_id: &str,
        throughput: u32,
    ) -> Result<ScaleOutcome> {
        let container = self.store.read_container(database_id, container_id).await?;
        let Some(resource_id) = container.resource_id else {
            tracing::debug!(
                database = %database_id,
                container = %container_id,
                "Container has no resource id, nothing to scale"
            );
            return Ok(ScaleOutcome::NoMatchingOffer);
        };

        match self
            .replace_matching_offer(database_id, container_id, &resource_id, throughput)
            .await
        {
            Ok(outcome) => {
                tracing::debug!(
                    database = %database_id,
                    container = %container_id,
                    outcome = ?outcome,
                    "Scaled container"
                );
                Ok(outcome)
            }
            Err(e) if e.is_bad_request() => {
                tracing::debug!(
                    database = %database_id,
                    container = %container_id,
                    error = %e,
                    "Throughput change rejected"
                );
                Ok(ScaleOutcome::Rejected {
                    message: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn replace_matching_offer(
        &self,
        database_id: &str,
        container_id: &str,
        resource_id: &str,
        throughput: u32,
    ) -> Result<ScaleOutcome> {
        let offers = self.store.read_offers(database_id, container_id).await?;
        let Some(offer) = find_offer(&offers, resource_id) else {
            return Ok(ScaleOutcome::NoMatchingOffer);
        };

        let mut updated = offer.clone();
        updated.throughput = Some(throughput);
        let replaced = self
            .store
            .replace_offer(database_id, container_id, &updated)
            .await?;

        Ok(ScaleOutcome::Scaled {
            offer_id: replaced.id,
            throughput: replaced.throughput.unwrap_or(throughput),
        })
    }

    /// Upsert an item and return it as stored
    ///
    /// The partition-key value is read from the document itself.
    pub async fn create_item(
        &self,
        database_id: &str,
        container_id: &str,
        item: &Value,
    ) -> Result<Value> {
        let item_id = extract_item_id(item)?;
        let partition_key = extract_partition_key(item, self.key_path()?)?;

        self.store
            .upsert_item(database_id, container_id, &partition_key, item)
            .await?;
        let stored = self
            .store
            .read_item(database_id, container_id, item_id, &partition_key)
            .await?;

        tracing::debug!(
            container = %container_id,
            item = %item_id,
            partition_key = %partition_key,
            "Created item"
        );
        Ok(stored)
    }

    /// Read an item by id and partition-key value
    pub async fn read_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
    ) -> Result<Value> {
        let item = self
            .store
            .read_item(database_id, container_id, item_id, partition_key)
            .await?;
        tracing::debug!(container = %container_id, item = %item_id, "Reading item");
        Ok(item)
    }

    /// Read every item of a container
    pub async fn read_all_items(&self, database_id: &str, container_id: &str) -> Result<Vec<Value>> {
        let items = self.store.read_all_items(database_id, container_id).await?;
        tracing::debug!(
            container = %container_id,
            count = items.len(),
            "Read all items"
        );
        Ok(items)
    }

    /// Replace an existing item and return it as stored
    ///
    /// # Errors
    ///
    /// Fails locally if the new body has no `id`, and remotely if no item
    /// with that id exists under `partition_key`.
    pub async fn replace_item(
        &self,
        database_id: &str,
        container_id: &str,
        item: &Value,
        partition_key: &PartitionKeyValue,
    ) -> Result<Value> {
        let item_id = extract_item_id(item)?;

        self.store
            .replace_item(database_id, container_id, item_id, partition_key, item)
            .await?;
        let stored = self
            .store
            .read_item(database_id, container_id, item_id, partition_key)
            .await?;

        tracing::debug!(container = %container_id, item = %item_id, "Replaced item");
        Ok(stored)
    }

    /// Run a query and return every match
    pub async fn query_items(
        &self,
        database_id: &str,
        container_id: &str,
        query: &QuerySpec,
    ) -> Result<Vec<Value>> {
        let items = self
            .store
            .query_items(database_id, container_id, query)
            .await?;
        tracing::debug!(
            container = %container_id,
            query = %query.query,
            count = items.len(),
            "Queried items"
        );
        Ok(items)
    }

    /// Delete every item a query matches
    ///
    /// Each match is deleted under the value of its `partition_key_field`.
    /// Deletes run concurrently and the call fails on the first failed
    /// delete; deletes already applied stay applied.
    ///
    /// Returns the number of deleted items.
    pub async fn delete_items_by_query(
        &self,
        database_id: &str,
        container_id: &str,
        partition_key_field: &str,
        query: &QuerySpec,
    ) -> Result<usize> {
        let matches = self
            .store
            .query_items(database_id, container_id, query)
            .await?;

        let targets = matches
            .iter()
            .map(|item| {
                let item_id = extract_item_id(item)?;
                let partition_key = field_partition_key(item, partition_key_field)?;
                Ok::<_, GatewayError>((item_id, partition_key))
            })
            .collect::<Result<Vec<_>>>()?;

        let deletes = targets.iter().map(|(item_id, partition_key)| {
            self.store
                .delete_item(database_id, container_id, item_id, partition_key)
        });
        let deleted = try_join_all(deletes)
            .await
            .with_context(|| format!("Delete by query over {} match(es) stopped", targets.len()))?
            .len();

        tracing::debug!(
            container = %container_id,
            query = %query.query,
            deleted = deleted,
            "Deleted items by query"
        );
        Ok(deleted)
    }

    /// Delete an item
    ///
    /// Id and partition-key value are read from the document.
    pub async fn delete_item(
        &self,
        database_id: &str,
        container_id: &str,
        item: &Value,
    ) -> Result<()> {
        let item_id = extract_item_id(item)?;
        let partition_key = extract_partition_key(item, self.key_path()?)?;

        self.store
            .delete_item(database_id, container_id, item_id, &partition_key)
            .await?;

        tracing::debug!(container = %container_id, item = %item_id, "Deleted item");
        Ok(())
    }
}
