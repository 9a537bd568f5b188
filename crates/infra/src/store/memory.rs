//! In-memory store adapter.

use std::collections::BTreeMap;
use std::sync::Arc;

use fieldops_core::store::{KeyValueStore, StoreEvent, StoreEventBus};
use fieldops_domain::Result;
use parking_lot::RwLock;

/// Volatile `KeyValueStore` over a guarded map.
///
/// Backs ephemeral sessions and previews where nothing should outlive the
/// process. Writes never fail; the map lock is dropped before the bus is
/// notified.
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
    bus: Arc<StoreEventBus>,
}

impl MemoryStore {
    pub fn new(bus: Arc<StoreEventBus>) -> Self {
        Self { entries: RwLock::new(BTreeMap::new()), bus }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_raw(&self, key: &str, json: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), json.to_string());
        self.bus.publish(&StoreEvent { key: key.to_string() });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        self.bus.publish(&StoreEvent { key: key.to_string() });
        Ok(())
    }
}
