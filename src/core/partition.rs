//! Item identity helpers
//!
//! An item is addressed by its `id` plus its partition-key value. These
//! helpers pull both out of a JSON document before any remote call is made.

use crate::domain::{GatewayError, PartitionKeyValue, Result};
use serde_json::Value;

/// Returns the `id` of a document
///
/// # Errors
///
/// Returns a validation error if the document has no string `id`.
pub fn extract_item_id(item: &Value) -> Result<&str> {
    match item.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id),
        Some(other) => Err(GatewayError::Validation(format!(
            "Item id must be a non-empty string, got {other}"
        ))),
        None => Err(GatewayError::Validation(
            "Item has no 'id' field".to_string(),
        )),
    }
}

/// Resolves a partition-key path such as `/address/country` in a document
///
/// # Errors
///
/// Returns a validation error if the path is missing from the document or
/// doesn't hold a string or a number.
pub fn extract_partition_key(item: &Value, path: &str) -> Result<PartitionKeyValue> {
    let value = item.pointer(path).ok_or_else(|| {
        GatewayError::Validation(format!("Item has no value at partition-key path '{path}'"))
    })?;
    PartitionKeyValue::from_json(value)
}

/// Reads the partition-key value from a named field of a query match
///
/// A field starting with `/` is resolved as a path, anything else as a
/// top-level property.
pub fn field_partition_key(item: &Value, field: &str) -> Result<PartitionKeyValue> {
    if field.starts_with('/') {
        return extract_partition_key(item, field);
    }
    let value = item.get(field).ok_or_else(|| {
        GatewayError::Validation(format!("Item has no partition-key field '{field}'"))
    })?;
    PartitionKeyValue::from_json(value)
}
