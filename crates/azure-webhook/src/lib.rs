//! Mutating admission webhooks for the Azure provider extension
//!
//! Two webhooks are served:
//! - Shoots (garden cluster): the network plugin's overlay mode is made
//!   explicit, defaulting to disabled for new shoots
//! - Infrastructures (seed cluster): new objects on flow-enabled seeds are
//!   annotated to use the flow reconciliation engine
//!
//! Both share the same shape: a lifecycle gate, a read of context, and an
//! in-place edit of the new object that is returned as a JSON patch.

#![deny(missing_docs)]

pub mod admission;
pub mod context;
pub mod flow;
pub mod keys;
pub mod lifecycle;
pub mod object;
pub mod shoot;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

pub use admission::{mutate_handler, MutatorState};
pub use context::{ClusterLookup, KubeClusterLookup};
pub use flow::FlowMutator;
pub use keys::SentinelKeys;
pub use object::{AdmittedObject, Mutator};
pub use shoot::ShootMutator;

/// Path of the shoot mutating webhook
pub const SHOOT_WEBHOOK_PATH: &str = "/webhooks/shoots";

/// Path of the infrastructure mutating webhook
pub const INFRASTRUCTURE_WEBHOOK_PATH: &str = "/webhooks/infrastructures";

/// Create the webhook router with all mutation endpoints
///
/// - POST /webhooks/shoots - Shoot network config mutation
/// - POST /webhooks/infrastructures - Infrastructure flow annotation
/// - GET /healthz - liveness
pub fn webhook_router(shoot: Arc<dyn Mutator>, infrastructure: Arc<dyn Mutator>) -> Router {
    let shoots = Router::new()
        .route(SHOOT_WEBHOOK_PATH, post(mutate_handler))
        .with_state(MutatorState::new(shoot));
    let infrastructures = Router::new()
        .route(INFRASTRUCTURE_WEBHOOK_PATH, post(mutate_handler))
        .with_state(MutatorState::new(infrastructure));

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .merge(shoots)
        .merge(infrastructures)
}
