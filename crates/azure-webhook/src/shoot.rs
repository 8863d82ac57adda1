//! Shoot mutator
//!
//! Makes the overlay mode of the shoot's network plugin explicit. For Azure
//! shoots overlay networking defaults to disabled, so pods are routed
//! natively through the VNet route tables.

use async_trait::async_trait;
use tracing::{debug, info};

use azure_common::crd::{
    CalicoNetworkConfig, CiliumNetworkConfig, NetworkProviderConfig, Overlay, ProviderConfig,
    Shoot, CALICO_NETWORKING_TYPE, CILIUM_NETWORKING_TYPE,
};
use azure_common::{Error, Result};

use crate::lifecycle;
use crate::object::{AdmittedObject, Mutator};

/// Overlay mode written when neither the new nor the old shoot has one
pub const DEFAULT_OVERLAY_ENABLED: bool = false;

/// Mutator for Shoot resources
#[derive(Clone, Debug, Default)]
pub struct ShootMutator;

impl ShootMutator {
    /// Create a new shoot mutator
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mutator for ShootMutator {
    fn name(&self) -> &'static str {
        "shoot"
    }

    async fn mutate(&self, new: &mut AdmittedObject, old: Option<&AdmittedObject>) -> Result<()> {
        let kind = new.kind();
        let AdmittedObject::Shoot(shoot) = new else {
            return Err(Error::type_mismatch("Shoot", kind));
        };
        let old = match old {
            None => None,
            Some(AdmittedObject::Shoot(old)) => Some(old.as_ref()),
            Some(other) => return Err(Error::type_mismatch("Shoot", other.kind())),
        };

        mutate_network_config(shoot, old)
    }
}

/// Make the overlay mode of the shoot's network config explicit
///
/// Decodes the existing payload, keeps an explicit overlay, otherwise carries
/// the old shoot's overlay forward, otherwise writes the default. The payload
/// is only replaced when the re-encoded form differs.
pub fn mutate_network_config(shoot: &mut Shoot, old: Option<&Shoot>) -> Result<()> {
    if let Some(reason) = lifecycle::skip_reason(shoot, old) {
        debug!(shoot = ?shoot.metadata.name, %reason, "Skipping network config mutation");
        return Ok(());
    }

    match shoot.networking_type() {
        Some(CILIUM_NETWORKING_TYPE) => resolve_overlay::<CiliumNetworkConfig>(shoot, old),
        Some(CALICO_NETWORKING_TYPE) => resolve_overlay::<CalicoNetworkConfig>(shoot, old),
        other => {
            debug!(shoot = ?shoot.metadata.name, networking = ?other, "Networking type not managed");
            Ok(())
        }
    }
}

fn resolve_overlay<T: NetworkProviderConfig>(shoot: &mut Shoot, old: Option<&Shoot>) -> Result<()> {
    let name = shoot.metadata.name.clone();
    let networking_type = shoot.networking_type().map(str::to_string);
    let Some(networking) = shoot.spec.networking.as_mut() else {
        return Ok(());
    };

    let mut config =
        ProviderConfig::<T>::decode(networking.provider_config.as_ref(), T::DESCRIPTION)?;

    if config.object().overlay().is_none() {
        let overlay = match previous_overlay::<T>(old, networking_type.as_deref())? {
            Some(overlay) => overlay,
            None => Overlay::enabled(DEFAULT_OVERLAY_ENABLED),
        };
        config.object_mut().set_overlay(overlay);
    }
    config.object_mut().set_type_meta();

    if config.differs_from_raw()? {
        let encoded = config.encode()?;
        info!(shoot = ?name, provider_config = %encoded, "Mutating network provider config");
        networking.provider_config = Some(encoded);
    }

    Ok(())
}

/// Explicit overlay of the old shoot, if it used the same network plugin
fn previous_overlay<T: NetworkProviderConfig>(
    old: Option<&Shoot>,
    networking_type: Option<&str>,
) -> Result<Option<Overlay>> {
    let Some(old) = old else {
        return Ok(None);
    };
    if old.networking_type() != networking_type {
        return Ok(None);
    }
    let raw = old
        .spec
        .networking
        .as_ref()
        .and_then(|n| n.provider_config.as_ref());

    let config = ProviderConfig::<T>::decode(raw, T::DESCRIPTION)?;
    Ok(config.object().overlay().cloned())
}
