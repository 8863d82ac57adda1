//! Infrastructure flow mutator
//!
//! Newly created Infrastructures on seeds labelled for the flow engine get
//! the `use-flow` annotation, unless the shoot forces the terraformer path.

use std::sync::Arc;

use async_trait::async_trait;
use kube::ResourceExt;
use tracing::{debug, info};

use azure_common::{Error, Result};

use crate::context::ClusterLookup;
use crate::keys::SentinelKeys;
use crate::lifecycle::is_being_deleted;
use crate::object::{AdmittedObject, Mutator};

/// Mutator for Infrastructure resources
pub struct FlowMutator {
    lookup: Arc<dyn ClusterLookup>,
    keys: SentinelKeys,
}

impl FlowMutator {
    /// Create a flow mutator resolving cluster context through `lookup`
    pub fn new(lookup: Arc<dyn ClusterLookup>, keys: SentinelKeys) -> Self {
        Self { lookup, keys }
    }
}

#[async_trait]
impl Mutator for FlowMutator {
    fn name(&self) -> &'static str {
        "infrastructure-flow"
    }

    async fn mutate(&self, new: &mut AdmittedObject, old: Option<&AdmittedObject>) -> Result<()> {
        if old.is_some() || is_being_deleted(new.meta()) {
            return Ok(());
        }

        let kind = new.kind();
        let AdmittedObject::Infrastructure(infra) = new else {
            return Err(Error::type_mismatch("Infrastructure", kind));
        };

        let namespace = infra
            .namespace()
            .ok_or_else(|| Error::context_lookup(infra.name_any(), "object has no namespace"))?;
        let cluster = self.lookup.get_cluster(&namespace).await?;

        if cluster.shoot_has_annotation(&self.keys.legacy_annotation) {
            debug!(infrastructure = %infra.name_any(), namespace = %namespace, "Shoot forces terraformer, not requesting flow");
            return Ok(());
        }

        if cluster.seed_label(&self.keys.flow_seed_label) == Some(self.keys.flow_seed_label_value.as_str()) {
            info!(infrastructure = %infra.name_any(), namespace = %namespace, "Requesting flow reconciliation");
            infra.annotations_mut().insert(
                self.keys.flow_annotation.clone(),
                self.keys.flow_annotation_value.clone(),
            );
        }

        Ok(())
    }
}
