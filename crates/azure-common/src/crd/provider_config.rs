//! Opaque provider config payloads
//!
//! Gardener embeds extension-specific configuration as untyped JSON
//! (`runtime.RawExtension`). [`ProviderConfig`] keeps the raw value next to
//! the decoded structured view; when re-encoding, the structured view is
//! authoritative and raw fields outside of its schema are not carried over.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Error, Result};

/// A provider config payload with its raw and decoded forms
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProviderConfig<T> {
    raw: Option<serde_json::Value>,
    object: T,
}

impl<T> ProviderConfig<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    /// Decode a raw payload
    ///
    /// An absent or `null` payload decodes to `T::default()` (all fields
    /// unset). A payload that does not match the schema is an error tagged
    /// with `kind`.
    pub fn decode(raw: Option<&serde_json::Value>, kind: &str) -> Result<Self> {
        let object = match raw {
            None | Some(serde_json::Value::Null) => T::default(),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| Error::payload_decode(kind, e.to_string()))?,
        };

        Ok(Self {
            raw: raw.cloned(),
            object,
        })
    }

    /// The raw payload as it was admitted
    pub fn raw(&self) -> Option<&serde_json::Value> {
        self.raw.as_ref()
    }

    /// The decoded structured view
    pub fn object(&self) -> &T {
        &self.object
    }

    /// The decoded structured view, mutably
    pub fn object_mut(&mut self) -> &mut T {
        &mut self.object
    }

    /// Encode the structured view back to JSON
    pub fn encode(&self) -> Result<serde_json::Value> {
        serde_json::to_value(&self.object).map_err(Into::into)
    }

    /// Whether encoding the structured view would change the raw payload
    pub fn differs_from_raw(&self) -> Result<bool> {
        Ok(self.raw.as_ref() != Some(&self.encode()?))
    }
}
