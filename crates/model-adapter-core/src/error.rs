//! Error types for the model adapter core library
//!
//! This module defines the error handling for the adapter engine, using
//! thiserror for the error definitions and anyhow for errors raised by
//! caller-supplied transformers and restorers.
//!
//! Validation failures are never errors: they are reported through a
//! [`DiagnosticSink`](crate::diagnostics::DiagnosticSink) instead.

use thiserror::Error;

/// Main error type for model adapter operations
#[derive(Error, Debug)]
pub enum Error {
    /// Caller input of the wrong shape (e.g. a declarative path that is not a string)
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
        field: Option<String>,
    },

    /// A transformer failed while adapting or reading a bound field
    #[error("Transformer failed for '{key}': {message}")]
    Transform {
        key: String,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// A restorer failed while restoring a model
    #[error("Restorer failed for '{key}': {message}")]
    Restore {
        key: String,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// Declarative adapter configuration could not be resolved
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a transformer failure for the given model key
    pub fn transform(key: impl Into<String>, source: anyhow::Error) -> Self {
        Error::Transform {
            key: key.into(),
            message: source.to_string(),
            source,
        }
    }

    /// Wrap a restorer failure for the given model key
    pub fn restore(key: impl Into<String>, source: anyhow::Error) -> Self {
        Error::Restore {
            key: key.into(),
            message: source.to_string(),
            source,
        }
    }

    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid argument error for a named field
    pub fn invalid_argument(message: impl Into<String>, field: Option<&str>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
