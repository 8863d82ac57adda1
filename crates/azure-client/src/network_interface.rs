//! Network interface client
//!
//! Create-or-update blocks until the long-running operation completes and
//! returns the resulting interface. Delete treats an interface that is
//! already gone as success.

use async_trait::async_trait;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[cfg(test)]
use mockall::automock;

use crate::error::{ClientError, Result};

/// A network interface resource (only the fields the extension uses)
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    /// Fully qualified resource ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Resource name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Azure location (e.g. "westeurope")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Interface properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<NetworkInterfaceProperties>,
}

/// Properties of a network interface
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceProperties {
    /// IP configurations attached to the interface
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_configurations: Vec<IpConfiguration>,

    /// Whether IP forwarding is enabled
    #[serde(
        rename = "enableIPForwarding",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_ip_forwarding: Option<bool>,

    /// Whether accelerated networking is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_accelerated_networking: Option<bool>,

    /// Provisioning state reported by Azure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// An IP configuration of a network interface
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpConfiguration {
    /// Configuration name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Raw configuration properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
}

/// Handle to a long-running Azure operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingOperation {
    /// Operation identifier (the polling URL in the Azure API)
    pub id: String,
}

/// Final state of a completed long-running operation
#[derive(Clone, Debug, PartialEq)]
pub struct OperationOutcome {
    /// Final HTTP status
    pub status: StatusCode,
    /// Final response body, if any
    pub body: Option<serde_json::Value>,
}

/// Raw network interface API of the Azure SDK
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NetworkInterfaceApi: Send + Sync {
    /// Start creating or updating an interface
    async fn begin_create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &NetworkInterface,
    ) -> Result<PendingOperation>;

    /// Fetch an interface, optionally expanding referenced resources
    async fn get(
        &self,
        resource_group: &str,
        name: &str,
        expand: Option<String>,
    ) -> Result<NetworkInterface>;

    /// Start deleting an interface
    async fn begin_delete(&self, resource_group: &str, name: &str) -> Result<PendingOperation>;

    /// Poll a pending operation until it completes
    async fn wait_for_completion(&self, operation: &PendingOperation) -> Result<OperationOutcome>;
}

/// Network interface client over a raw API capability
pub struct NetworkInterfaceClient<A> {
    api: A,
}

impl<A: NetworkInterfaceApi> NetworkInterfaceClient<A> {
    /// Create a client over `api`
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Create or update an interface and return the result once provisioned
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &NetworkInterface,
    ) -> Result<NetworkInterface> {
        let pending = self
            .api
            .begin_create_or_update(resource_group, name, parameters)
            .await?;
        debug!(resource_group, name, operation = %pending.id, "Waiting for network interface");

        let outcome = self.api.wait_for_completion(&pending).await?;
        let body = outcome
            .body
            .ok_or_else(|| ClientError::operation(&pending.id, "completed without a body"))?;

        let nic = serde_json::from_value(body).map_err(|source| ClientError::Decode {
            what: format!("network interface {name}"),
            source,
        })?;
        info!(resource_group, name, "Network interface created or updated");
        Ok(nic)
    }

    /// Get an interface
    pub async fn get(
        &self,
        resource_group: &str,
        name: &str,
        expand: Option<&str>,
    ) -> Result<NetworkInterface> {
        self.api
            .get(resource_group, name, expand.map(str::to_string))
            .await
    }

    /// Delete an interface; an interface that no longer exists is not an error
    pub async fn delete(&self, resource_group: &str, name: &str) -> Result<()> {
        let pending = self.api.begin_delete(resource_group, name).await?;
        let outcome = self.api.wait_for_completion(&pending).await?;

        match outcome.status {
            StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => {
                info!(resource_group, name, status = %outcome.status, "Network interface deleted");
                Ok(())
            }
            status => Err(ClientError::DeletionFailed {
                name: name.to_string(),
                status,
            }),
        }
    }
}
