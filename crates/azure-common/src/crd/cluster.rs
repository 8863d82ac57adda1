//! Cluster resource (`extensions.gardener.cloud/v1alpha1`)
//!
//! The cluster-scoped Cluster object is named after a shoot's control-plane
//! namespace and embeds the raw shoot, seed and cloud profile documents. It is
//! how extension webhooks on the seed learn about the owning shoot.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Specification of a Cluster extension resource
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "extensions.gardener.cloud",
    version = "v1alpha1",
    kind = "Cluster",
    plural = "clusters",
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Raw cloud profile document
    #[serde(default)]
    pub cloud_profile: serde_json::Value,

    /// Raw seed document
    #[serde(default)]
    pub seed: serde_json::Value,

    /// Raw shoot document
    #[serde(default)]
    pub shoot: serde_json::Value,
}

/// Metadata-only view of an embedded document
#[derive(Deserialize)]
struct EmbeddedMeta {
    #[serde(default)]
    metadata: ObjectMeta,
}

/// Read-only join of an admitted object to its owning shoot and seed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterContext {
    /// Metadata of the owning shoot
    pub shoot: ObjectMeta,
    /// Metadata of the seed hosting the shoot's control plane
    pub seed: ObjectMeta,
}

impl ClusterContext {
    /// Whether the shoot carries the given annotation (any value)
    pub fn shoot_has_annotation(&self, key: &str) -> bool {
        self.shoot
            .annotations
            .as_ref()
            .is_some_and(|a| a.contains_key(key))
    }

    /// Value of a seed label, if present
    pub fn seed_label(&self, key: &str) -> Option<&str> {
        self.seed.labels.as_ref()?.get(key).map(String::as_str)
    }
}

impl TryFrom<&Cluster> for ClusterContext {
    type Error = Error;

    fn try_from(cluster: &Cluster) -> Result<Self> {
        let name = cluster.metadata.name.clone().unwrap_or_default();
        let decode = |what: &str, raw: &serde_json::Value| -> Result<ObjectMeta> {
            if raw.is_null() {
                return Err(Error::context_lookup(
                    &name,
                    format!("cluster has no embedded {what}"),
                ));
            }
            serde_json::from_value::<EmbeddedMeta>(raw.clone())
                .map(|m| m.metadata)
                .map_err(|e| Error::context_lookup(&name, format!("could not decode {what}: {e}")))
        };

        Ok(Self {
            shoot: decode("shoot", &cluster.spec.shoot)?,
            seed: decode("seed", &cluster.spec.seed)?,
        })
    }
}
