//! Admission review handling
//!
//! Decodes an `AdmissionReview`, runs the route's mutator on the typed
//! object and answers with a JSON patch between the object before and after
//! mutation. The patch only ever covers fields of the typed view.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use kube::api::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use tracing::{debug, error, info, warn};

use azure_common::Result;

use crate::object::{AdmittedObject, Mutator};

/// Handler state: the mutator serving one route
#[derive(Clone)]
pub struct MutatorState {
    mutator: Arc<dyn Mutator>,
}

impl MutatorState {
    /// Wrap a mutator for use as router state
    pub fn new(mutator: Arc<dyn Mutator>) -> Self {
        Self { mutator }
    }
}

/// Handle a mutating admission review
pub async fn mutate_handler(
    State(state): State<MutatorState>,
    Json(body): Json<AdmissionReview<DynamicObject>>,
) -> Json<AdmissionReview<DynamicObject>> {
    let req: AdmissionRequest<DynamicObject> = match body.try_into() {
        Ok(req) => req,
        Err(e) => {
            error!(error = %e, "Failed to parse admission request");
            return Json(AdmissionResponse::invalid(e.to_string()).into_review());
        }
    };

    let response = review(state.mutator.as_ref(), &req).await;
    Json(response.into_review())
}

/// Run `mutator` against a single admission request
pub async fn review(
    mutator: &dyn Mutator,
    request: &AdmissionRequest<DynamicObject>,
) -> AdmissionResponse {
    let uid = request.uid.clone();

    if request.operation == Operation::Delete {
        debug!(uid = %uid, mutator = mutator.name(), "Delete request, allowing unchanged");
        return AdmissionResponse::from(request);
    }

    let Some(obj) = request.object.as_ref() else {
        debug!(uid = %uid, mutator = mutator.name(), "No object in request, allowing unchanged");
        return AdmissionResponse::from(request);
    };

    match mutate_object(mutator, obj, request.old_object.as_ref()).await {
        Ok(None) => {
            debug!(uid = %uid, mutator = mutator.name(), name = ?obj.metadata.name, "No mutation required");
            AdmissionResponse::from(request)
        }
        Ok(Some(patch)) => {
            info!(
                uid = %uid,
                mutator = mutator.name(),
                name = ?obj.metadata.name,
                namespace = ?obj.metadata.namespace,
                patch_ops = patch.0.len(),
                "Applying patch"
            );
            match AdmissionResponse::from(request).with_patch(patch) {
                Ok(response) => response,
                Err(e) => {
                    error!(uid = %uid, error = %e, "Failed to serialize patch");
                    AdmissionResponse::from(request).deny(format!("patch serialization error: {e}"))
                }
            }
        }
        Err(e) => {
            warn!(
                uid = %uid,
                mutator = mutator.name(),
                name = ?obj.metadata.name,
                error = %e,
                "Mutation failed"
            );
            AdmissionResponse::from(request).deny(format!("{}: {}", mutator.name(), e))
        }
    }
}

/// Mutate the admitted object and diff it against its typed form before mutation
async fn mutate_object(
    mutator: &dyn Mutator,
    obj: &DynamicObject,
    old: Option<&DynamicObject>,
) -> Result<Option<json_patch::Patch>> {
    let mut new = AdmittedObject::try_from(obj)?;
    let old = old.map(AdmittedObject::try_from).transpose()?;

    let before = new.to_value()?;
    mutator.mutate(&mut new, old.as_ref()).await?;
    let after = new.to_value()?;

    let patch = json_patch::diff(&before, &after);
    Ok((!patch.0.is_empty()).then_some(patch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShootMutator;
    use async_trait::async_trait;
    use azure_common::Error;
    use serde_json::json;

    struct FailingMutator;

    #[async_trait]
    impl Mutator for FailingMutator {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn mutate(&self, _: &mut AdmittedObject, _: Option<&AdmittedObject>) -> Result<()> {
            Err(Error::context_lookup("shoot--dev--foo", "boom"))
        }
    }

    fn shoot_json(provider_config: Option<serde_json::Value>) -> serde_json::Value {
        let mut networking = json!({"type": "cilium", "nodes": "10.250.0.0/16"});
        if let Some(pc) = provider_config {
            networking["providerConfig"] = pc;
        }
        json!({
            "apiVersion": "core.gardener.cloud/v1beta1",
            "kind": "Shoot",
            "metadata": {"name": "foo", "namespace": "garden-dev"},
            "spec": {
                "seedName": "azure",
                "provider": {"type": "azure", "workers": [{"name": "test"}]},
                "region": "eastus",
                "networking": networking
            }
        })
    }

    fn request(
        operation: &str,
        object: Option<serde_json::Value>,
        old: Option<serde_json::Value>,
    ) -> AdmissionRequest<DynamicObject> {
        let mut req = json!({
            "uid": "test-uid",
            "kind": {"group": "core.gardener.cloud", "version": "v1beta1", "kind": "Shoot"},
            "resource": {"group": "core.gardener.cloud", "version": "v1beta1", "resource": "shoots"},
            "name": "foo",
            "namespace": "garden-dev",
            "operation": operation,
            "userInfo": {}
        });
        if let Some(obj) = object {
            req["object"] = obj;
        }
        if let Some(old) = old {
            req["oldObject"] = old;
        }
        let review: AdmissionReview<DynamicObject> = serde_json::from_value(json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview",
            "request": req
        }))
        .unwrap();
        review.try_into().unwrap()
    }

    fn decode_patch(response: &AdmissionResponse) -> serde_json::Value {
        serde_json::from_slice(response.patch.as_ref().expect("patch")).unwrap()
    }

    #[tokio::test]
    async fn create_yields_overlay_patch() {
        let req = request("CREATE", Some(shoot_json(None)), None);
        let resp = review(&ShootMutator::new(), &req).await;

        assert!(resp.allowed);
        assert_eq!(
            decode_patch(&resp),
            json!([{
                "op": "add",
                "path": "/spec/networking/providerConfig",
                "value": {
                    "apiVersion": "cilium.networking.extensions.gardener.cloud/v1alpha1",
                    "kind": "NetworkConfig",
                    "overlay": {"enabled": false}
                }
            }])
        );
    }

    #[tokio::test]
    async fn unchanged_update_has_no_patch() {
        let req = request("UPDATE", Some(shoot_json(None)), Some(shoot_json(None)));
        let resp = review(&ShootMutator::new(), &req).await;
        assert!(resp.allowed);
        assert!(resp.patch.is_none());
    }

    #[tokio::test]
    async fn delete_is_allowed_unchanged() {
        let req = request("DELETE", None, Some(shoot_json(None)));
        let resp = review(&ShootMutator::new(), &req).await;
        assert!(resp.allowed);
        assert!(resp.patch.is_none());
    }

    #[tokio::test]
    async fn mutator_errors_deny() {
        let req = request("CREATE", Some(shoot_json(None)), None);
        let resp = review(&FailingMutator, &req).await;
        assert!(!resp.allowed);
        assert!(resp.result.message.contains("failing"));
        assert!(resp.result.message.contains("boom"));
    }

    #[tokio::test]
    async fn malformed_payload_denies() {
        let req = request("CREATE", Some(shoot_json(Some(json!({"overlay": 1})))), None);
        let resp = review(&ShootMutator::new(), &req).await;
        assert!(!resp.allowed);
        assert!(resp.result.message.contains("cilium NetworkConfig"));
    }

    #[tokio::test]
    async fn unknown_kind_denies() {
        let obj = json!({"apiVersion": "v1", "kind": "ConfigMap", "metadata": {"name": "foo"}});
        let req = request("CREATE", Some(obj), None);
        let resp = review(&ShootMutator::new(), &req).await;
        assert!(!resp.allowed);
        assert!(resp.result.message.contains("v1/ConfigMap"));
    }
}
