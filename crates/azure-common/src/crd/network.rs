//! Network plugin provider configs
//!
//! Structured forms of `spec.networking.providerConfig` for the network
//! plugins whose overlay mode the Azure extension manages.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Networking type tag of the cilium extension
pub const CILIUM_NETWORKING_TYPE: &str = "cilium";

/// Networking type tag of the calico extension
pub const CALICO_NETWORKING_TYPE: &str = "calico";

/// Kind of both network plugin configs
pub const NETWORK_CONFIG_KIND: &str = "NetworkConfig";

/// Overlay (encapsulation) settings shared by the network plugins
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// Whether pod traffic is encapsulated; false means direct routing
    #[serde(default)]
    pub enabled: bool,

    /// Whether pod routes are created on the nodes (cilium only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_pod_routes: Option<bool>,
}

impl Overlay {
    /// An overlay block with only `enabled` set
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            create_pod_routes: None,
        }
    }
}

/// A network plugin config whose overlay mode can be resolved
pub trait NetworkProviderConfig: DeserializeOwned + Serialize + Default {
    /// API version written on re-encode
    const API_VERSION: &'static str;
    /// Human-readable payload kind used in decode errors
    const DESCRIPTION: &'static str;

    /// The explicit overlay block, if any
    fn overlay(&self) -> Option<&Overlay>;

    /// Replace the overlay block
    fn set_overlay(&mut self, overlay: Overlay);

    /// Stamp apiVersion/kind so the network extension can decode the payload
    fn set_type_meta(&mut self);
}

/// Hubble observability settings of cilium
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hubble {
    /// Whether hubble is deployed
    #[serde(default)]
    pub enabled: bool,
}

/// cilium `NetworkConfig`
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CiliumNetworkConfig {
    /// API version of the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Kind of the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Overlay settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Overlay>,

    /// Hubble settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hubble: Option<Hubble>,

    /// Tunnel mode (e.g. "vxlan", "geneve", "disabled")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tunnel: Option<String>,
}

impl NetworkProviderConfig for CiliumNetworkConfig {
    const API_VERSION: &'static str = "cilium.networking.extensions.gardener.cloud/v1alpha1";
    const DESCRIPTION: &'static str = "cilium NetworkConfig";

    fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    fn set_type_meta(&mut self) {
        self.api_version = Some(Self::API_VERSION.to_string());
        self.kind = Some(NETWORK_CONFIG_KIND.to_string());
    }
}

/// SNAT settings for upstream DNS traffic of calico
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnatToUpstreamDns {
    /// Whether SNAT to upstream DNS is enabled
    #[serde(default)]
    pub enabled: bool,
}

/// calico `NetworkConfig`
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalicoNetworkConfig {
    /// API version of the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Kind of the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Routing backend (e.g. "bird", "none")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,

    /// Overlay settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Overlay>,

    /// SNAT settings for upstream DNS
    #[serde(
        default,
        rename = "snatToUpstreamDNS",
        skip_serializing_if = "Option::is_none"
    )]
    pub snat_to_upstream_dns: Option<SnatToUpstreamDns>,
}

impl NetworkProviderConfig for CalicoNetworkConfig {
    const API_VERSION: &'static str = "calico.networking.extensions.gardener.cloud/v1alpha1";
    const DESCRIPTION: &'static str = "calico NetworkConfig";

    fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    fn set_type_meta(&mut self) {
        self.api_version = Some(Self::API_VERSION.to_string());
        self.kind = Some(NETWORK_CONFIG_KIND.to_string());
    }
}
