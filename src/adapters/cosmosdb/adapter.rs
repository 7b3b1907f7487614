//! Cosmos DB adapter implementing the document store trait

use crate::adapters::cosmosdb::client::{map_sdk_error, CosmosDbClient};
use crate::adapters::cosmosdb::models::{resource_field, sdk_partition_key, sdk_query};
use crate::adapters::database::traits::DocumentStore;
use crate::domain::{
    ContainerDescriptor, CosmosDbError, DatabaseDescriptor, GatewayError, Offer, PartitionKeySpec,
    PartitionKeyValue, QuerySpec, Result,
};
use async_trait::async_trait;
use azure_data_cosmos::models::ThroughputProperties;
use futures::stream::StreamExt;
use serde_json::Value;
use std::sync::Arc;

/// Cosmos DB implementation of [`DocumentStore`]
///
/// Offers are reached through the container throughput API, which exposes
/// exactly the offer whose resource id is the container's `_rid`.
pub struct CosmosDbAdapter {
    client: Arc<CosmosDbClient>,
}

impl CosmosDbAdapter {
    /// Create a new Cosmos DB adapter
    pub fn new(client: CosmosDbClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<CosmosDbClient> {
        &self.client
    }

    fn offer_from_properties(
        properties: &ThroughputProperties,
        container_rid: &str,
    ) -> Offer {
        Offer {
            id: resource_field(properties, "id").unwrap_or_else(|| container_rid.to_string()),
            offer_resource_id: resource_field(properties, "offerResourceId")
                .unwrap_or_else(|| container_rid.to_string()),
            throughput: properties
                .throughput()
                .and_then(|t| u32::try_from(t).ok()),
        }
    }
}

#[async_trait]
impl DocumentStore for CosmosDbAdapter {
    fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    async fn create_database_if_not_exists(
        &self,
        database_id: &str,
    ) -> Result<DatabaseDescriptor> {
        self.client.create_database_if_not_exists(database_id).await
    }

    async fn read_database(&self, database_id: &str) -> Result<DatabaseDescriptor> {
        self.client.read_database(database_id).await
    }

    async fn create_container_if_not_exists(
        &self,
        database_id: &str,
        container_id: &str,
        partition_key: &PartitionKeySpec,
    ) -> Result<ContainerDescriptor> {
        self.client
            .create_container_if_not_exists(database_id, container_id, partition_key)
            .await
    }

    async fn read_container(
        &self,
        database_id: &str,
        container_id: &str,
    ) -> Result<ContainerDescriptor> {
        self.client.read_container(database_id, container_id).await
    }

    async fn read_offers(&self, database_id: &str, container_id: &str) -> Result<Vec<Offer>> {
        let descriptor = self.client.read_container(database_id, container_id).await?;
        let Some(container_rid) = descriptor.resource_id else {
            return Ok(Vec::new());
        };

        let response = self
            .client
            .container_client(database_id, container_id)
            .read_throughput(None)
            .await
            .map_err(|e| {
                map_sdk_error(e, &format!("Failed to read offers of {container_id}"))
            })?;

        // Serverless accounts and shared-throughput databases have no offer
        let Some(response) = response else {
            return Ok(Vec::new());
        };

        let properties = response.into_body().map_err(|e| {
            CosmosDbError::DeserializationFailed(format!("Offer of {container_id}: {e}"))
        })?;

        Ok(vec![Self::offer_from_properties(&properties, &container_rid)])
    }

    async fn replace_offer(
        &self,
        database_id: &str,
        container_id: &str,
        offer: &Offer,
    ) -> Result<Offer> {
        let throughput = offer.throughput.ok_or_else(|| {
            GatewayError::Validation(format!("Offer {} carries no manual throughput", offer.id))
        })?;

        let response = self
            .client
            .container_client(database_id, container_id)
            .replace_throughput(ThroughputProperties::manual(throughput as usize), None)
            .await
            .map_err(|e| map_sdk_error(e, &format!("Failed to replace offer {}", offer.id)))?;

        let properties = response.into_body().map_err(|e| {
            CosmosDbError::DeserializationFailed(format!("Offer {}: {e}", offer.id))
        })?;

        Ok(Self::offer_from_properties(
            &properties,
            &offer.offer_resource_id,
        ))
    }

    async fn upsert_item(
        &self,
        database_id: &str,
        container_id: &str,
        partition_key: &PartitionKeyValue,
        item: &Value,
    ) -> Result<()> {
        self.client
            .container_client(database_id, container_id)
            .upsert_item(sdk_partition_key(partition_key), item, None)
            .await
            .map_err(|e| map_sdk_error(e, &format!("Failed to upsert item into {container_id}")))?;

        Ok(())
    }

    async fn read_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
    ) -> Result<Value> {
        let response = self
            .client
            .container_client(database_id, container_id)
            .read_item::<Value>(sdk_partition_key(partition_key), item_id, None)
            .await
            .map_err(|e| map_sdk_error(e, &format!("Failed to read item {item_id}")))?;

        let item = response.into_body().map_err(|e| {
            CosmosDbError::DeserializationFailed(format!("Item {item_id}: {e}"))
        })?;

        Ok(item)
    }

    async fn replace_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
        item: &Value,
    ) -> Result<()> {
        self.client
            .container_client(database_id, container_id)
            .replace_item(sdk_partition_key(partition_key), item_id, item, None)
            .await
            .map_err(|e| map_sdk_error(e, &format!("Failed to replace item {item_id}")))?;

        Ok(())
    }

    async fn delete_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
    ) -> Result<()> {
        self.client
            .container_client(database_id, container_id)
            .delete_item(sdk_partition_key(partition_key), item_id, None)
            .await
            .map_err(|e| map_sdk_error(e, &format!("Failed to delete item {item_id}")))?;

        Ok(())
    }

    async fn query_items(
        &self,
        database_id: &str,
        container_id: &str,
        query: &QuerySpec,
    ) -> Result<Vec<Value>> {
        let container = self.client.container_client(database_id, container_id);
        let sdk_query = sdk_query(query)?;

        let pager = match &query.partition_key {
            Some(pk) => container.query_items::<Value>(sdk_query, sdk_partition_key(pk), None),
            None => container.query_items::<Value>(sdk_query, (), None),
        };
        let mut query_response =
            pager.map_err(|e| map_sdk_error(e, "Failed to create query"))?;

        let mut documents = Vec::new();
        while let Some(item) = query_response.next().await {
            match item {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    return Err(map_sdk_error(
                        e,
                        &format!("Failed to query {database_id}/{container_id}"),
                    ));
                }
            }
        }

        Ok(documents)
    }
}
