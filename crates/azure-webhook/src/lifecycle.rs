//! Lifecycle gate for shoot mutations
//!
//! Decides from the shoot's own state whether a mutation may run at all.
//! Every predicate is a pure function of the object snapshots.

use std::fmt;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use azure_common::crd::{LastOperationState, LastOperationType, Shoot};

/// Why a shoot mutation was skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The shoot has no worker pools
    Workerless,
    /// The shoot carries a deletion timestamp
    Deleting,
    /// A migrate or restore operation has not finished
    MigrationOrRestore,
    /// The shoot is moving to the seed named in its spec
    RescheduledToNewSeed,
    /// The networking block did not change against the old version
    NetworkingUnchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Workerless => "workerless shoot",
            Self::Deleting => "shoot is being deleted",
            Self::MigrationOrRestore => "shoot is in migration or restore phase",
            Self::RescheduledToNewSeed => "shoot is scheduled to a new seed",
            Self::NetworkingUnchanged => "networking has not changed",
        };
        f.write_str(reason)
    }
}

/// Whether the shoot declares no worker pools
pub fn is_workerless(shoot: &Shoot) -> bool {
    shoot.workers().is_empty()
}

/// Whether the object carries a deletion timestamp
pub fn is_being_deleted(meta: &ObjectMeta) -> bool {
    meta.deletion_timestamp.is_some()
}

/// Whether a migrate or restore operation is in flight
///
/// A migrate counts in every state, including succeeded: the restore on the
/// new seed has not started yet. A restore counts until it has succeeded.
pub fn is_in_migration_or_restore_phase(shoot: &Shoot) -> bool {
    shoot.last_operation().is_some_and(|op| match op.type_ {
        LastOperationType::Migrate => true,
        LastOperationType::Restore => op.state != LastOperationState::Succeeded,
        _ => false,
    })
}

/// Whether the shoot's desired seed differs from the seed hosting it
///
/// Only meaningful outside of a migration: during a migrate the seeds are
/// expected to differ and [`is_in_migration_or_restore_phase`] applies.
pub fn was_rescheduled_to_new_seed(shoot: &Shoot) -> bool {
    let Some(op) = shoot.last_operation() else {
        return false;
    };
    if op.type_ == LastOperationType::Migrate {
        return false;
    }
    match (shoot.spec.seed_name.as_deref(), shoot.status_seed_name()) {
        (Some(desired), Some(current)) => desired != current,
        _ => false,
    }
}

/// Whether the networking block is equal between two versions
pub fn networking_unchanged(new: &Shoot, old: &Shoot) -> bool {
    new.spec.networking == old.spec.networking
}

/// First reason for skipping a mutation of `new`, if any
pub fn skip_reason(new: &Shoot, old: Option<&Shoot>) -> Option<SkipReason> {
    if is_workerless(new) {
        return Some(SkipReason::Workerless);
    }
    if is_being_deleted(&new.metadata) {
        return Some(SkipReason::Deleting);
    }
    if is_in_migration_or_restore_phase(new) {
        return Some(SkipReason::MigrationOrRestore);
    }
    if was_rescheduled_to_new_seed(new) {
        return Some(SkipReason::RescheduledToNewSeed);
    }
    if old.is_some_and(|old| networking_unchanged(new, old)) {
        return Some(SkipReason::NetworkingUnchanged);
    }
    None
}

/// Whether a mutation of `new` may run
///
/// `old` is `None` on creation.
pub fn should_mutate(new: &Shoot, old: Option<&Shoot>) -> bool {
    skip_reason(new, old).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use azure_common::crd::{LastOperation, Networking, Provider, ShootSpec, ShootStatus, Worker};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
    use std::collections::BTreeMap;

    fn sample_shoot() -> Shoot {
        let mut shoot = Shoot::new(
            "foo",
            ShootSpec {
                seed_name: Some("azure".to_string()),
                provider: Provider {
                    type_: "azure".to_string(),
                    workers: vec![Worker {
                        name: "test".to_string(),
                        ..Default::default()
                    }],
                },
                region: "eastus".to_string(),
                networking: Some(Networking {
                    type_: Some("cilium".to_string()),
                    nodes: Some("10.250.0.0/16".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        shoot.metadata.namespace = Some("garden-dev".to_string());
        shoot
    }

    fn with_operation(
        mut shoot: Shoot,
        type_: LastOperationType,
        state: LastOperationState,
        status_seed: &str,
    ) -> Shoot {
        shoot.status = Some(ShootStatus {
            seed_name: Some(status_seed.to_string()),
            last_operation: Some(LastOperation::new(type_, state)),
        });
        shoot
    }

    #[test]
    fn fresh_shoot_is_mutated() {
        assert_eq!(skip_reason(&sample_shoot(), None), None);
        assert!(should_mutate(&sample_shoot(), None));
    }

    #[test]
    fn workerless_shoot_is_skipped() {
        let mut shoot = sample_shoot();
        shoot.spec.provider.workers.clear();
        assert!(is_workerless(&shoot));
        assert_eq!(skip_reason(&shoot, None), Some(SkipReason::Workerless));
    }

    #[test]
    fn deleting_shoot_is_skipped_regardless_of_old() {
        let mut shoot = sample_shoot();
        shoot.metadata.deletion_timestamp = Some(Time(k8s_openapi::chrono::Utc::now()));
        let mut old = sample_shoot();
        old.spec.networking = None;

        assert_eq!(skip_reason(&shoot, None), Some(SkipReason::Deleting));
        assert_eq!(skip_reason(&shoot, Some(&old)), Some(SkipReason::Deleting));
    }

    #[test]
    fn migrate_and_restore_in_progress_are_skipped() {
        for type_ in [LastOperationType::Migrate, LastOperationType::Restore] {
            for state in [
                LastOperationState::Processing,
                LastOperationState::Error,
                LastOperationState::Pending,
            ] {
                let shoot = with_operation(sample_shoot(), type_, state, "azure");
                assert!(
                    is_in_migration_or_restore_phase(&shoot),
                    "{type_:?}/{state:?} should be in migration or restore"
                );
            }
        }
    }

    /// Story: the migrate finished but the restore has not started
    ///
    /// The control plane has left the old seed and the shoot already names
    /// its new seed. Until the restore runs there the shoot stays untouched.
    #[test]
    fn story_succeeded_migrate_waits_for_restore() {
        let mut shoot = with_operation(
            sample_shoot(),
            LastOperationType::Migrate,
            LastOperationState::Succeeded,
            "old-seed",
        );
        shoot.spec.seed_name = Some("new-seed".to_string());

        assert!(is_in_migration_or_restore_phase(&shoot));
        assert_eq!(
            skip_reason(&shoot, None),
            Some(SkipReason::MigrationOrRestore)
        );
        assert!(!should_mutate(&shoot, None));
    }

    #[test]
    fn succeeded_restore_is_steady_state() {
        let shoot = with_operation(
            sample_shoot(),
            LastOperationType::Restore,
            LastOperationState::Succeeded,
            "azure",
        );
        assert!(!is_in_migration_or_restore_phase(&shoot));
        assert!(should_mutate(&shoot, None));
    }

    #[test]
    fn reconcile_towards_other_seed_is_skipped() {
        let shoot = with_operation(
            sample_shoot(),
            LastOperationType::Reconcile,
            LastOperationState::Processing,
            "aws",
        );
        assert!(was_rescheduled_to_new_seed(&shoot));
        assert_eq!(
            skip_reason(&shoot, None),
            Some(SkipReason::RescheduledToNewSeed)
        );
    }

    #[test]
    fn seed_mismatch_without_operation_is_not_a_reschedule() {
        let mut shoot = sample_shoot();
        shoot.status = Some(ShootStatus {
            seed_name: Some("aws".to_string()),
            last_operation: None,
        });
        assert!(!was_rescheduled_to_new_seed(&shoot));
    }

    #[test]
    fn unscheduled_shoot_is_not_a_reschedule() {
        let mut shoot = with_operation(
            sample_shoot(),
            LastOperationType::Create,
            LastOperationState::Processing,
            "aws",
        );
        shoot.spec.seed_name = None;
        assert!(!was_rescheduled_to_new_seed(&shoot));
    }

    /// Story: editing only metadata does not touch networking
    ///
    /// A user adds an annotation to a running shoot. The networking block is
    /// byte-identical, so the gate skips and the object is left alone.
    #[test]
    fn story_annotation_only_update_is_skipped() {
        let old = sample_shoot();
        let mut new = sample_shoot();
        new.metadata.annotations = Some(BTreeMap::from([("foo".to_string(), "bar".to_string())]));

        assert!(networking_unchanged(&new, &old));
        assert_eq!(
            skip_reason(&new, Some(&old)),
            Some(SkipReason::NetworkingUnchanged)
        );
    }

    #[test]
    fn networking_change_passes_the_gate() {
        let old = sample_shoot();
        let mut new = sample_shoot();
        new.spec.networking.as_mut().unwrap().pods = Some("100.96.0.0/11".to_string());
        assert!(should_mutate(&new, Some(&old)));
    }

    #[test]
    fn skip_reasons_are_readable() {
        assert_eq!(
            SkipReason::MigrationOrRestore.to_string(),
            "shoot is in migration or restore phase"
        );
    }
}
