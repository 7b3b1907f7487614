//! Cosmos DB client implementation
//!
//! This module owns the single `azure_data_cosmos` client the gateway uses
//! for its whole lifetime, and maps SDK failures onto [`CosmosDbError`].

use crate::adapters::cosmosdb::models::{container_descriptor, container_properties, database_descriptor};
use crate::config::CosmosDbConfig;
use crate::domain::{
    ContainerDescriptor, CosmosDbError, DatabaseDescriptor, GatewayError, PartitionKeySpec, Result,
};
use azure_core::credentials::Secret;
use azure_core::http::UserAgentOptions;
use azure_data_cosmos::clients::{ContainerClient, DatabaseClient};
use azure_data_cosmos::{CosmosClient, CosmosClientOptions};

/// Maps an SDK error onto the gateway error hierarchy
///
/// The HTTP status decides the variant; the SDK's message is kept verbatim
/// behind `context`.
pub(crate) fn map_sdk_error(error: azure_core::Error, context: &str) -> GatewayError {
    let message = format!("{context}: {error}");
    match error.http_status() {
        Some(status) => CosmosDbError::from_status(u16::from(status), message).into(),
        None => CosmosDbError::RequestFailed(message).into(),
    }
}

/// Cosmos DB client
///
/// Provides database and container management on top of one long-lived
/// SDK client. Item operations go through [`CosmosDbClient::container_client`].
pub struct CosmosDbClient {
    /// Cosmos DB client
    client: CosmosClient,

    /// Configuration
    config: CosmosDbConfig,
}

impl CosmosDbClient {
    /// Create a new Cosmos DB client
    ///
    /// No request is sent; the first remote call happens on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK rejects the endpoint or key.
    pub fn new(config: CosmosDbConfig) -> Result<Self> {
        use secrecy::ExposeSecret;

        let key_str = config.key.expose_secret().reveal();
        let key = Secret::new(key_str);

        let mut user_agent = UserAgentOptions::default();
        user_agent.application_id = Some(config.user_agent_suffix.clone());
        let mut options = CosmosClientOptions::default();
        options.client_options.user_agent = user_agent;

        let client = CosmosClient::with_key(&config.endpoint, key, Some(options)).map_err(|e| {
            GatewayError::CosmosDb(CosmosDbError::ConnectionFailed(format!(
                "Failed to create Cosmos client: {e}"
            )))
        })?;

        Ok(Self { client, config })
    }

    /// Get a database client
    pub fn database_client(&self, database_id: &str) -> DatabaseClient {
        self.client.database_client(database_id)
    }

    /// Get a container client
    pub fn container_client(&self, database_id: &str, container_id: &str) -> ContainerClient {
        self.database_client(database_id)
            .container_client(container_id)
    }

    /// Read a database definition
    pub async fn read_database(&self, database_id: &str) -> Result<DatabaseDescriptor> {
        let response = self
            .database_client(database_id)
            .read(None)
            .await
            .map_err(|e| map_sdk_error(e, &format!("Failed to read database {database_id}")))?;

        let properties = response.into_body().map_err(|e| {
            CosmosDbError::DeserializationFailed(format!("Database {database_id}: {e}"))
        })?;

        Ok(database_descriptor(&properties))
    }

    /// Ensure the database exists, creating it if necessary
    ///
    /// A conflict on create means another caller won the race; the database
    /// is read back in that case.
    pub async fn create_database_if_not_exists(
        &self,
        database_id: &str,
    ) -> Result<DatabaseDescriptor> {
        match self.read_database(database_id).await {
            Ok(descriptor) => {
                tracing::trace!(database = %database_id, "Database already exists");
                return Ok(descriptor);
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        tracing::trace!(database = %database_id, "Creating database");
        match self.client.create_database(database_id, None).await {
            Ok(response) => {
                let properties = response.into_body().map_err(|e| {
                    CosmosDbError::DeserializationFailed(format!("Database {database_id}: {e}"))
                })?;
                Ok(database_descriptor(&properties))
            }
            Err(e) => {
                let err = map_sdk_error(e, &format!("Failed to create database {database_id}"));
                if err.status() == Some(409) {
                    self.read_database(database_id).await
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Read a container definition
    pub async fn read_container(
        &self,
        database_id: &str,
        container_id: &str,
    ) -> Result<ContainerDescriptor> {
        let response = self
            .container_client(database_id, container_id)
            .read(None)
            .await
            .map_err(|e| {
                map_sdk_error(
                    e,
                    &format!("Failed to read container {database_id}/{container_id}"),
                )
            })?;

        let properties = response.into_body().map_err(|e| {
            CosmosDbError::DeserializationFailed(format!("Container {container_id}: {e}"))
        })?;

        Ok(container_descriptor(&properties))
    }

    /// Ensure a container exists, creating it with the given partition key
    pub async fn create_container_if_not_exists(
        &self,
        database_id: &str,
        container_id: &str,
        partition_key: &PartitionKeySpec,
    ) -> Result<ContainerDescriptor> {
        match self.read_container(database_id, container_id).await {
            Ok(descriptor) => {
                tracing::trace!(container = %container_id, "Container already exists");
                return Ok(descriptor);
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        tracing::trace!(
            container = %container_id,
            paths = ?partition_key.paths,
            "Creating container"
        );

        let properties = container_properties(container_id, partition_key);
        match self
            .database_client(database_id)
            .create_container(properties, None)
            .await
        {
            Ok(response) => {
                let properties = response.into_body().map_err(|e| {
                    CosmosDbError::DeserializationFailed(format!("Container {container_id}: {e}"))
                })?;
                Ok(container_descriptor(&properties))
            }
            Err(e) => {
                let err = map_sdk_error(
                    e,
                    &format!("Failed to create container {database_id}/{container_id}"),
                );
                if err.status() == Some(409) {
                    self.read_container(database_id, container_id).await
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Get the partition-key specification new containers are created with
    pub fn partition_key(&self) -> PartitionKeySpec {
        self.config.partition_key.to_spec()
    }
}
