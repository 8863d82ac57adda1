//! Error types for Azure API calls

use http::StatusCode;
use thiserror::Error;

/// Errors returned by the Azure clients
#[derive(Debug, Error)]
pub enum ClientError {
    /// The Azure API rejected or failed a request
    #[error("azure request failed: {message}")]
    Request {
        /// Description of what failed
        message: String,
    },

    /// A long-running operation did not complete
    #[error("waiting for operation {operation} failed: {message}")]
    Operation {
        /// Identifier of the pending operation
        operation: String,
        /// Description of what failed
        message: String,
    },

    /// Deleting a network interface ended with an unexpected status
    #[error("deletion of network interfaces {name} failed. statuscode={}", status.as_u16())]
    DeletionFailed {
        /// Network interface name
        name: String,
        /// Final HTTP status of the delete operation
        status: StatusCode,
    },

    /// A response body could not be decoded
    #[error("could not decode {what}: {source}")]
    Decode {
        /// What was being decoded
        what: String,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Create a request error
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request {
            message: msg.into(),
        }
    }

    /// Create an operation error
    pub fn operation(operation: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Operation {
            operation: operation.into(),
            message: msg.into(),
        }
    }
}

/// Result type for Azure client calls
pub type Result<T> = std::result::Result<T, ClientError>;
