//! Shoot resource (`core.gardener.cloud/v1beta1`)
//!
//! Only the parts of the Shoot API the Azure webhooks read or write are
//! modelled. Patches are computed from this typed view, so fields outside of
//! it are never touched on the admitted object.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Specification of a Shoot cluster
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "Shoot",
    plural = "shoots",
    status = "ShootStatus",
    namespaced,
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct ShootSpec {
    /// Name of the cloud profile the shoot is built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_profile_name: Option<String>,

    /// Seed the shoot should be scheduled to (desired seed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_name: Option<String>,

    /// Infrastructure provider and worker pools
    pub provider: Provider,

    /// Cloud region
    #[serde(default)]
    pub region: String,

    /// Pod network configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking: Option<Networking>,
}

/// Provider block of a Shoot
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// Provider type tag (e.g. "azure")
    #[serde(rename = "type")]
    pub type_: String,

    /// Worker pools; empty for workerless shoots
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workers: Vec<Worker>,
}

/// A worker pool
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Pool name
    pub name: String,

    /// Machine configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<Machine>,

    /// Minimum number of machines
    #[serde(default)]
    pub minimum: i32,

    /// Maximum number of machines
    #[serde(default)]
    pub maximum: i32,
}

/// Machine type of a worker pool
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Machine type name (e.g. "Standard_D4s_v3")
    #[serde(rename = "type")]
    pub type_: String,
}

/// Networking block of a Shoot
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    /// Network plugin type tag (e.g. "cilium", "calico")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Opaque configuration for the network plugin extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,

    /// Node CIDR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<String>,

    /// Pod CIDR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pods: Option<String>,

    /// Service CIDR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
}

/// Observed state of a Shoot
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShootStatus {
    /// Seed currently hosting the control plane
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_name: Option<String>,

    /// Most recent lifecycle operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_operation: Option<LastOperation>,
}

/// Record of the most recent lifecycle operation on a shoot
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LastOperation {
    /// Operation kind
    #[serde(rename = "type")]
    pub type_: LastOperationType,

    /// Progress state of the operation
    pub state: LastOperationState,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Completion percentage
    #[serde(default)]
    pub progress: i32,

    /// When the operation was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<Time>,
}

impl LastOperation {
    /// Create a last operation record without description or timestamp
    pub fn new(type_: LastOperationType, state: LastOperationState) -> Self {
        Self {
            type_,
            state,
            description: String::new(),
            progress: 0,
            last_update_time: None,
        }
    }
}

/// Kind of lifecycle operation
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum LastOperationType {
    /// Initial creation
    Create,
    /// Regular reconciliation
    Reconcile,
    /// Deletion
    Delete,
    /// Control plane migration away from the current seed
    Migrate,
    /// Control plane restore on the new seed
    Restore,
    /// Any value this extension does not know about
    #[serde(other)]
    Unknown,
}

/// Progress state of a lifecycle operation
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum LastOperationState {
    /// Operation is running
    Processing,
    /// Operation finished successfully
    Succeeded,
    /// Operation hit a retriable error
    Error,
    /// Operation failed permanently
    Failed,
    /// Operation is queued
    Pending,
    /// Operation was aborted
    Aborted,
    /// Any value this extension does not know about
    #[serde(other)]
    Unknown,
}

impl Shoot {
    /// Worker pools declared by the provider block
    pub fn workers(&self) -> &[Worker] {
        &self.spec.provider.workers
    }

    /// The networking type tag, if networking is configured
    pub fn networking_type(&self) -> Option<&str> {
        self.spec.networking.as_ref()?.type_.as_deref()
    }

    /// The most recent lifecycle operation, if any
    pub fn last_operation(&self) -> Option<&LastOperation> {
        self.status.as_ref()?.last_operation.as_ref()
    }

    /// The seed currently hosting the control plane
    pub fn status_seed_name(&self) -> Option<&str> {
        self.status.as_ref()?.seed_name.as_deref()
    }
}
