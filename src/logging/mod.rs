//! Logging and observability
//!
//! Structured logging via `tracing`. Every gateway operation logs at debug
//! level on success, naming the resource it touched; run with
//! `--log-level debug` (or `RUST_LOG=cosmos_gateway=debug`) to see them.
//!
//! # Example
//!
//! ```no_run
//! use cosmos_gateway::logging::init_logging;
//! use cosmos_gateway::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("debug", &config).expect("Failed to initialize logging");
//!
//! tracing::debug!(database = "families", "Created database");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cosmos_gateway::log_error_with_context;
/// use cosmos_gateway::domain::GatewayError;
///
/// let error = GatewayError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            status = ?$error.status(),
            context = $context,
            "Error occurred"
        );
    };
}
