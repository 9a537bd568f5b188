//! Store change notification bus
//!
//! Synchronous fan-out of [`StoreEvent`]s to subscribed observers. The bus
//! holds observers weakly: a service subscribes itself without creating a
//! reference cycle through the store, and dropped observers are pruned on
//! the next publish.

use std::sync::Weak;

use parking_lot::RwLock;

use super::ports::StoreEvent;

/// Observer notified synchronously after every store write.
pub trait StoreObserver: Send + Sync {
    fn on_store_event(&self, event: &StoreEvent);
}

/// Fan-out point for store change notifications.
#[derive(Default)]
pub struct StoreEventBus {
    observers: RwLock<Vec<Weak<dyn StoreObserver>>>,
}

impl StoreEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Generic over the concrete observer type so
    /// callers pass `Arc::downgrade(&service)` directly.
    pub fn subscribe<O: StoreObserver + 'static>(&self, observer: Weak<O>) {
        let observer: Weak<dyn StoreObserver> = observer;
        self.observers.write().push(observer);
    }

    /// Delivers the event to every live observer, including the one whose
    /// write produced it. Observers are invoked outside the bus lock, so a
    /// callback may write to the store (and publish again) freely.
    pub fn publish(&self, event: &StoreEvent) {
        let live = {
            let mut observers = self.observers.write();
            observers.retain(|observer| observer.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect::<Vec<_>>()
        };

        for observer in live {
            observer.on_store_event(event);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().iter().filter(|observer| observer.strong_count() > 0).count()
    }
}
