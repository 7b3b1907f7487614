//! Domain error types
//!
//! This module defines the error hierarchy for the gateway. Errors are
//! domain-specific and don't expose third-party SDK types to callers.

use thiserror::Error;

/// Main gateway error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cosmos DB-related errors
    #[error("Cosmos DB error: {0}")]
    CosmosDb(#[from] CosmosDbError),

    /// Caller input rejected before any remote call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl GatewayError {
    /// HTTP status reported by the remote service, if this error came from it
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::CosmosDb(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the remote service answered 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the remote service answered 400
    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }
}

/// Cosmos DB-specific errors
///
/// Every remote failure is classified by the HTTP status the service
/// answered with. The message carries the service's error body verbatim.
#[derive(Debug, Error)]
pub enum CosmosDbError {
    /// Failed to build the client or reach the account
    #[error("Failed to connect to Cosmos DB: {0}")]
    ConnectionFailed(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Throttling error (429)
    #[error("Request rate too large (429): {0}")]
    Throttled(String),

    /// Any other status returned by the service
    #[error("Remote error {status}: {message}")]
    Remote { status: u16, message: String },

    /// Failure without an HTTP status (transport, I/O, SDK-side)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to deserialize response
    #[error("Failed to deserialize response: {0}")]
    DeserializationFailed(String),
}

impl CosmosDbError {
    /// Classifies a remote failure by its HTTP status code
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => CosmosDbError::BadRequest(message),
            404 => CosmosDbError::NotFound(message),
            409 => CosmosDbError::Conflict(message),
            429 => CosmosDbError::Throttled(message),
            _ => CosmosDbError::Remote { status, message },
        }
    }

    /// HTTP status code of this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            CosmosDbError::BadRequest(_) => Some(400),
            CosmosDbError::NotFound(_) => Some(404),
            CosmosDbError::Conflict(_) => Some(409),
            CosmosDbError::Throttled(_) => Some(429),
            CosmosDbError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GatewayError {
    fn from(err: toml::de::Error) -> Self {
        GatewayError::Configuration(format!("TOML parse error: {err}"))
    }
}
