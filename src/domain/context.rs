//! Error context extension trait
//!
//! Similar to `anyhow::Context`, but the error keeps its variant: context is
//! prepended to the message, so status codes and exit-code classification
//! survive.
//!
//! # Examples
//!
//! ```rust
//! use cosmos_gateway::domain::Result;
//! use cosmos_gateway::domain::context::ResultExt;
//!
//! fn read_item_file(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
//! }
//! ```

use crate::domain::errors::{CosmosDbError, GatewayError};
use crate::domain::result::Result;
use std::fmt::Display;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display;

    /// Add lazily evaluated context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<GatewayError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display,
    {
        self.map_err(|e| e.into().prefixed(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().prefixed(f()))
    }
}

fn prefix(context: &impl Display, message: String) -> String {
    format!("{context}: {message}")
}

impl GatewayError {
    /// Prepends `context` to the message, keeping the variant
    pub fn prefixed(self, context: impl Display) -> Self {
        match self {
            GatewayError::Configuration(m) => GatewayError::Configuration(prefix(&context, m)),
            GatewayError::CosmosDb(e) => GatewayError::CosmosDb(e.prefixed(context)),
            GatewayError::Validation(m) => GatewayError::Validation(prefix(&context, m)),
            GatewayError::Serialization(m) => GatewayError::Serialization(prefix(&context, m)),
            GatewayError::Io(m) => GatewayError::Io(prefix(&context, m)),
            GatewayError::Other(m) => GatewayError::Other(prefix(&context, m)),
        }
    }
}

impl CosmosDbError {
    /// Prepends `context` to the message, keeping the variant and status
    pub fn prefixed(self, context: impl Display) -> Self {
        match self {
            CosmosDbError::ConnectionFailed(m) => {
                CosmosDbError::ConnectionFailed(prefix(&context, m))
            }
            CosmosDbError::NotFound(m) => CosmosDbError::NotFound(prefix(&context, m)),
            CosmosDbError::Conflict(m) => CosmosDbError::Conflict(prefix(&context, m)),
            CosmosDbError::BadRequest(m) => CosmosDbError::BadRequest(prefix(&context, m)),
            CosmosDbError::Throttled(m) => CosmosDbError::Throttled(prefix(&context, m)),
            CosmosDbError::Remote { status, message } => CosmosDbError::Remote {
                status,
                message: prefix(&context, message),
            },
            CosmosDbError::RequestFailed(m) => CosmosDbError::RequestFailed(prefix(&context, m)),
            CosmosDbError::DeserializationFailed(m) => {
                CosmosDbError::DeserializationFailed(prefix(&context, m))
            }
        }
    }
}
