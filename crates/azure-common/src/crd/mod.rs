//! Gardener API types consumed by the Azure extension webhooks

mod cluster;
mod infrastructure;
mod network;
mod provider_config;
mod shoot;

pub use cluster::{Cluster, ClusterContext, ClusterSpec};
pub use infrastructure::{Infrastructure, InfrastructureSpec, SecretReference};
pub use network::{
    CalicoNetworkConfig, CiliumNetworkConfig, Hubble, NetworkProviderConfig, Overlay,
    SnatToUpstreamDns, CALICO_NETWORKING_TYPE, CILIUM_NETWORKING_TYPE, NETWORK_CONFIG_KIND,
};
pub use provider_config::ProviderConfig;
pub use shoot::{
    LastOperation, LastOperationState, LastOperationType, Machine, Networking, Provider, Shoot,
    ShootSpec, ShootStatus, Worker,
};
