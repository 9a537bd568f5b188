//! Persistent store port and change notification bus
//!
//! Every durable value in the system lives under a string key in one
//! keyed store (season collections, territory tables, the active-season
//! and active-profile pointers). Adapters implement [`KeyValueStore`] and
//! publish a [`StoreEvent`] on the shared [`StoreEventBus`] after every
//! write, so every execution context — including the writer — observes
//! changes the same way.

pub mod bus;
pub mod ports;

pub use bus::{StoreEventBus, StoreObserver};
pub use ports::{KeyValueStore, StoreEvent, StoreExt};
