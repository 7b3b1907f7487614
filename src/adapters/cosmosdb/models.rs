//! Conversions between gateway shapes and `azure_data_cosmos` models

use crate::domain::{
    ContainerDescriptor, DatabaseDescriptor, GatewayError, PartitionKeySpec, PartitionKeyValue,
    QuerySpec, Result,
};
use azure_data_cosmos::models::{
    ContainerProperties, DatabaseProperties, IndexingPolicy, PartitionKeyDefinition,
    PartitionKeyKind,
};
use azure_data_cosmos::{PartitionKey, Query};
use serde::Serialize;
use std::borrow::Cow;

/// Reads a top-level string field off a serializable SDK model
///
/// Used for `ThroughputProperties`, whose offer id and `offerResourceId`
/// are not public fields.
pub(crate) fn resource_field<T: Serialize>(resource: &T, field: &str) -> Option<String> {
    serde_json::to_value(resource)
        .ok()?
        .get(field)?
        .as_str()
        .map(String::from)
}

/// Builds the properties of a container to create
pub(crate) fn container_properties(
    container_id: &str,
    partition_key: &PartitionKeySpec,
) -> ContainerProperties {
    let partition_key_def = PartitionKeyDefinition {
        paths: partition_key.paths.clone(),
        kind: PartitionKeyKind::Hash,
        version: None,
    };

    ContainerProperties {
        id: Cow::Owned(container_id.to_string()),
        partition_key: partition_key_def,
        indexing_policy: Some(IndexingPolicy::default()),
        ..Default::default()
    }
}

pub(crate) fn database_descriptor(properties: &DatabaseProperties) -> DatabaseDescriptor {
    DatabaseDescriptor {
        id: properties.id.to_string(),
        resource_id: properties.system_properties.resource_id.clone(),
    }
}

pub(crate) fn container_descriptor(properties: &ContainerProperties) -> ContainerDescriptor {
    ContainerDescriptor {
        id: properties.id.to_string(),
        partition_key: PartitionKeySpec::hash(properties.partition_key.paths.iter().cloned()),
        resource_id: properties.system_properties.resource_id.clone(),
    }
}

pub(crate) fn sdk_partition_key(value: &PartitionKeyValue) -> PartitionKey {
    match value {
        PartitionKeyValue::String(s) => PartitionKey::from(s.clone()),
        PartitionKeyValue::Number(n) => PartitionKey::from(*n),
    }
}

/// Builds an SDK query, binding every named parameter in order
pub(crate) fn sdk_query(spec: &QuerySpec) -> Result<Query> {
    spec.parameters
        .iter()
        .try_fold(Query::from(spec.query.clone()), |query, parameter| {
            query
                .with_parameter(parameter.name.clone(), parameter.value.clone())
                .map_err(|e| {
                    GatewayError::Validation(format!(
                        "Failed to bind query parameter {}: {e}",
                        parameter.name
                    ))
                })
        })
}
