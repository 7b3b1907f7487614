//! Result type alias for the gateway

use super::errors::GatewayError;

/// Result of every fallible gateway, store and configuration call
///
/// ```
/// use cosmos_gateway::domain::{GatewayError, Result};
/// use serde_json::Value;
///
/// fn require_id(item: &Value) -> Result<&str> {
///     item.get("id")
///         .and_then(Value::as_str)
///         .ok_or_else(|| GatewayError::Validation("Item has no 'id' field".to_string()))
/// }
///
/// assert!(require_id(&serde_json::json!({"id": "Andersen.1"})).is_ok());
/// assert!(require_id(&serde_json::json!({})).is_err());
/// ```
pub type Result<T> = std::result::Result<T, GatewayError>;
