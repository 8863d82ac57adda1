//! Error types for the Azure provider extension webhooks
//!
//! Errors carry the context needed to answer an admission request with a
//! useful denial message: which kind was expected, which namespace the
//! cluster lookup ran against, which payload failed to decode.

use thiserror::Error;

/// Main error type for webhook operations
#[derive(Debug, Error)]
pub enum Error {
    /// A mutator received an object of a kind it does not handle
    #[error("could not mutate: object is not of type {expected} (got {actual})")]
    TypeMismatch {
        /// Kind the mutator handles
        expected: String,
        /// Kind that was admitted
        actual: String,
    },

    /// Resolving the owning shoot/seed context failed
    #[error("cluster context lookup failed for {namespace}: {message}")]
    ContextLookup {
        /// Namespace the admitted object lives in (also the Cluster name)
        namespace: String,
        /// Description of what failed
        message: String,
    },

    /// An embedded provider config payload could not be decoded
    #[error("could not decode {kind} provider config: {message}")]
    PayloadDecode {
        /// Kind of payload being decoded (e.g. "cilium NetworkConfig")
        kind: String,
        /// Description of what failed
        message: String,
    },

    /// Serialization/deserialization error outside of provider payloads
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
    },
}

impl Error {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a context lookup error for the given namespace
    pub fn context_lookup(namespace: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ContextLookup {
            namespace: namespace.into(),
            message: msg.into(),
        }
    }

    /// Create a payload decode error
    pub fn payload_decode(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::PayloadDecode {
            kind: kind.into(),
            message: msg.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::serialization(e.to_string())
    }
}
