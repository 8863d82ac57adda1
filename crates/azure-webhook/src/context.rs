//! Cluster context lookup
//!
//! Extension resources on a seed live in the shoot's control-plane namespace.
//! The cluster-scoped `Cluster` of the same name carries the owning shoot and
//! seed, which is where cross-cutting flags (shoot annotations, seed labels)
//! are read from.

use async_trait::async_trait;
use kube::api::Api;
use kube::Client;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use azure_common::crd::{Cluster, ClusterContext};
use azure_common::{Error, Result};

/// Read-only resolution of an object's owning shoot and seed
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterLookup: Send + Sync {
    /// Resolve the cluster context for an object in `namespace`
    async fn get_cluster(&self, namespace: &str) -> Result<ClusterContext>;
}

/// Cluster lookup backed by the Kubernetes API
pub struct KubeClusterLookup {
    client: Client,
}

impl KubeClusterLookup {
    /// Create a lookup using the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterLookup for KubeClusterLookup {
    async fn get_cluster(&self, namespace: &str) -> Result<ClusterContext> {
        let clusters: Api<Cluster> = Api::all(self.client.clone());
        let cluster = clusters
            .get(namespace)
            .await
            .map_err(|e| Error::context_lookup(namespace, e.to_string()))?;

        debug!(cluster = %namespace, "Resolved cluster context");
        ClusterContext::try_from(&cluster)
    }
}
