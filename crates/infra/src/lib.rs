//! # FieldOps Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Store adapters implementing the `KeyValueStore` port (pooled SQLite
//!   for durable use, an in-memory map for ephemeral sessions)
//! - Configuration loading (environment variables, then config files)
//!
//! ## Architecture
//! - Implements traits defined in `fieldops-core`
//! - Depends on `fieldops-domain` and `fieldops-core`
//! - Contains all "impure" code (filesystem, SQLite)

pub mod config;
pub mod store;

// Re-export commonly used items
pub use store::{MemoryStore, SqliteStore};
