//! Store adapters implementing the `KeyValueStore` port.
//!
//! Both adapters publish a `StoreEvent` on the shared bus after a write
//! has landed and their own lock or connection has been released, so an
//! observer reacting to the event can re-enter the store freely.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
