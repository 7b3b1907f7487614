//! Request and response shapes exchanged with the document store
//!
//! These types are deliberately SDK-agnostic: the Cosmos DB adapter converts
//! to and from `azure_data_cosmos` models at its boundary.

use super::errors::GatewayError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Partitioning strategy of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PartitionKeyKind {
    /// Hash partitioning over the key paths
    #[default]
    Hash,
}

/// Partition-key specification of a container
///
/// Fixed at container creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionKeySpec {
    /// Partitioning strategy
    pub kind: PartitionKeyKind,

    /// Document paths the key is computed from, e.g. `/partitionKey`
    pub paths: Vec<String>,
}

impl PartitionKeySpec {
    /// Creates a hash partition-key specification over the given paths
    pub fn hash<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: PartitionKeyKind::Hash,
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The path item operations read the partition-key value from
    pub fn primary_path(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }
}

/// Value of an item's partition key
///
/// Only scalar JSON values can act as a partition key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartitionKeyValue {
    /// String key
    String(String),
    /// Numeric key
    Number(f64),
}

impl PartitionKeyValue {
    /// Converts a JSON value taken from a document into a partition-key value
    ///
    /// # Errors
    ///
    /// Returns a validation error for anything but a string or a number.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(PartitionKeyValue::String(s.clone())),
            Value::Number(n) => n.as_f64().map(PartitionKeyValue::Number).ok_or_else(|| {
                GatewayError::Validation(format!("Partition key value {n} is out of range"))
            }),
            other => Err(GatewayError::Validation(format!(
                "Partition key value must be a string or a number, got {other}"
            ))),
        }
    }

    /// Parses a command-line argument, accepting JSON literals and bare strings
    ///
    /// `42` becomes a number, `"42"` and `USA` become strings.
    pub fn parse_arg(raw: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(raw) {
            Ok(value @ (Value::String(_) | Value::Number(_))) => Self::from_json(&value),
            _ => Ok(PartitionKeyValue::String(raw.to_string())),
        }
    }

    /// Returns the value as JSON
    pub fn to_json(&self) -> Value {
        match self {
            PartitionKeyValue::String(s) => Value::String(s.clone()),
            PartitionKeyValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

impl fmt::Display for PartitionKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKeyValue::String(s) => write!(f, "{s}"),
            PartitionKeyValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for PartitionKeyValue {
    fn from(s: &str) -> Self {
        PartitionKeyValue::String(s.to_string())
    }
}

impl From<String> for PartitionKeyValue {
    fn from(s: String) -> Self {
        PartitionKeyValue::String(s)
    }
}

impl From<f64> for PartitionKeyValue {
    fn from(n: f64) -> Self {
        PartitionKeyValue::Number(n)
    }
}

/// Database resource as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDescriptor {
    /// Database id
    pub id: String,

    /// Internal resource id (`_rid`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// Container resource as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDescriptor {
    /// Container id
    pub id: String,

    /// Partition-key specification the container was created with
    pub partition_key: PartitionKeySpec,

    /// Internal resource id (`_rid`), referenced by the container's offer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// Provisioned-throughput resource of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Offer id
    pub id: String,

    /// Resource id of the container this offer belongs to
    pub offer_resource_id: String,

    /// Manual throughput in RU/s, `None` for autoscale offers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<u32>,
}

/// Result of scaling a container's throughput
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScaleOutcome {
    /// The matching offer was replaced
    Scaled { offer_id: String, throughput: u32 },

    /// No offer references the container; nothing was changed
    NoMatchingOffer,

    /// The service refused the request with 400; nothing was changed
    Rejected { message: String },
}

/// Named query parameter, e.g. `@pk`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameter {
    /// Parameter name including the leading `@`
    pub name: String,

    /// Parameter value
    pub value: Value,
}

/// Query text plus its ordered named parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Query text
    pub query: String,

    /// Named parameters, in the order they were supplied
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<QueryParameter>,

    /// Restricts the query to one logical partition; cross-partition when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<PartitionKeyValue>,
}

impl QuerySpec {
    /// Creates a query without parameters
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: Vec::new(),
            partition_key: None,
        }
    }

    /// Scopes the query to a single partition-key value
    pub fn with_partition_key(mut self, partition_key: impl Into<PartitionKeyValue>) -> Self {
        self.partition_key = Some(partition_key.into());
        self
    }

    /// Appends a named parameter
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name doesn't start with `@` or the
    /// value cannot be serialized.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        let name = name.into();
        if !name.starts_with('@') || name.len() < 2 {
            return Err(GatewayError::Validation(format!(
                "Query parameter name must start with '@', got '{name}'"
            )));
        }
        let value = serde_json::to_value(value)?;
        self.parameters.push(QueryParameter { name, value });
        Ok(self)
    }

    /// Looks up a parameter value by name
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

impl From<&str> for QuerySpec {
    fn from(query: &str) -> Self {
        QuerySpec::new(query)
    }
}

impl From<String> for QuerySpec {
    fn from(query: String) -> Self {
        QuerySpec::new(query)
    }
}
