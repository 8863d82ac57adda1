//! Admitted objects and the mutator contract
//!
//! The admission endpoint receives untyped objects. They are decoded into a
//! closed set of kinds up front so each mutator works on typed data and
//! rejects kinds it does not serve.

use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::DynamicObject;
use kube::Resource;

use azure_common::crd::{Infrastructure, Shoot};
use azure_common::{Error, Result};

/// An object admitted by one of the webhooks
#[derive(Clone, Debug, PartialEq)]
pub enum AdmittedObject {
    /// A Shoot from the garden cluster
    Shoot(Box<Shoot>),
    /// An Infrastructure extension resource from the seed
    Infrastructure(Box<Infrastructure>),
}

impl AdmittedObject {
    /// Kind of the wrapped object
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Shoot(_) => "Shoot",
            Self::Infrastructure(_) => "Infrastructure",
        }
    }

    /// Metadata of the wrapped object
    pub fn meta(&self) -> &ObjectMeta {
        match self {
            Self::Shoot(s) => s.meta(),
            Self::Infrastructure(i) => i.meta(),
        }
    }

    /// Serialize the wrapped object to JSON
    pub fn to_value(&self) -> Result<serde_json::Value> {
        let value = match self {
            Self::Shoot(s) => serde_json::to_value(s.as_ref())?,
            Self::Infrastructure(i) => serde_json::to_value(i.as_ref())?,
        };
        Ok(value)
    }
}

impl From<Shoot> for AdmittedObject {
    fn from(shoot: Shoot) -> Self {
        Self::Shoot(Box::new(shoot))
    }
}

impl From<Infrastructure> for AdmittedObject {
    fn from(infra: Infrastructure) -> Self {
        Self::Infrastructure(Box::new(infra))
    }
}

/// Whether a dynamic object's type meta names the typed resource `K`
fn is_kind<K: Resource<DynamicType = ()>>(api_version: &str, kind: &str) -> bool {
    api_version == K::api_version(&()) && kind == K::kind(&())
}

impl TryFrom<&DynamicObject> for AdmittedObject {
    type Error = Error;

    fn try_from(obj: &DynamicObject) -> Result<Self> {
        let (api_version, kind) = obj
            .types
            .as_ref()
            .map(|t| (t.api_version.as_str(), t.kind.as_str()))
            .unwrap_or_default();

        let value = serde_json::to_value(obj)?;
        if is_kind::<Shoot>(api_version, kind) {
            Ok(serde_json::from_value::<Shoot>(value)?.into())
        } else if is_kind::<Infrastructure>(api_version, kind) {
            Ok(serde_json::from_value::<Infrastructure>(value)?.into())
        } else {
            Err(Error::type_mismatch(
                "Shoot or Infrastructure",
                format!("{api_version}/{kind}"),
            ))
        }
    }
}

/// Contract shared by all mutators
///
/// `new` may be modified in place. `old` is `None` on creation.
#[async_trait]
pub trait Mutator: Send + Sync {
    /// Name of this mutator for logging and denial messages
    fn name(&self) -> &'static str;

    /// Mutate `new`, optionally comparing against `old`
    async fn mutate(&self, new: &mut AdmittedObject, old: Option<&AdmittedObject>) -> Result<()>;
}
