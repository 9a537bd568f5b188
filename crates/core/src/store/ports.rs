//! Port interface for the persistent key-value store
//!
//! The trait itself is object-safe and speaks raw JSON strings; the typed
//! accessors are layered on top by [`StoreExt`] so services can work with
//! domain types against an `Arc<dyn KeyValueStore>`.

use fieldops_domain::{FieldOpsError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Change notification emitted after every store write or removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub key: String,
}

/// Durable string-keyed store holding one JSON document per key.
///
/// Contract for implementations: `set_raw` and `remove` publish a
/// [`StoreEvent`] on the shared bus *after* the write lands and *after*
/// releasing any internal locks, because observers synchronously re-enter
/// the store from their callbacks.
pub trait KeyValueStore: Send + Sync {
    /// Raw JSON read; `None` when the key is absent.
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Raw JSON write.
    fn set_raw(&self, key: &str, json: &str) -> Result<()>;

    /// Removes a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed convenience layer over [`KeyValueStore`].
pub trait StoreExt: KeyValueStore {
    /// Typed read: returns `default` when the key is absent, unreadable, or
    /// holds a payload that does not deserialize. Reads never fail — a
    /// malformed value logs a warning and falls back, so one corrupt key
    /// cannot take down a caller.
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get_raw(key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(error) => {
                    warn!(key, error = %error, "stored value failed to deserialize, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(error) => {
                warn!(key, error = %error, "store read failed, using default");
                default
            }
        }
    }

    /// Typed write through JSON.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| FieldOpsError::Serialization(e.to_string()))?;
        self.set_raw(key, &json)
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}
