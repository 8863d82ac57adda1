//! Common types for the Azure provider extension: Gardener API types,
//! errors, sentinel keys and telemetry

#![deny(missing_docs)]

pub mod crd;
pub mod error;
pub mod telemetry;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Shoot annotation forcing the legacy terraformer reconciliation path
pub const ANNOTATION_KEY_USE_TF: &str = "azure.provider.extensions.gardener.cloud/use-tf";

/// Infrastructure annotation requesting the flow reconciliation engine
pub const ANNOTATION_KEY_USE_FLOW: &str = "azure.provider.extensions.gardener.cloud/use-flow";

/// Seed label selecting the flow engine for newly created infrastructures
pub const SEED_LABEL_KEY_USE_FLOW: &str = ANNOTATION_KEY_USE_FLOW;

/// Seed label value meaning "use flow for new infrastructures"
pub const SEED_LABEL_USE_FLOW_VALUE_NEW: &str = "new";
