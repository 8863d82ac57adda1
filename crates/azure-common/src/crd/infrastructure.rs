//! Infrastructure resource (`extensions.gardener.cloud/v1alpha1`)

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Specification of an Infrastructure extension resource
///
/// Lives in the shoot's control-plane namespace on the seed. The flow
/// mutator only reads and writes its annotations.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "extensions.gardener.cloud",
    version = "v1alpha1",
    kind = "Infrastructure",
    plural = "infrastructures",
    namespaced,
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSpec {
    /// Extension type tag (e.g. "azure")
    #[serde(rename = "type")]
    pub type_: String,

    /// Cloud region
    #[serde(default)]
    pub region: String,

    /// Secret holding the cloud provider credentials
    #[serde(default)]
    pub secret_ref: SecretReference,

    /// Opaque provider-specific infrastructure configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,
}

/// Reference to a secret by name and namespace
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretReference {
    /// Secret name
    #[serde(default)]
    pub name: String,

    /// Secret namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}
