//! # FieldOps App
//!
//! Application layer - command surface and composition root.
//!
//! This crate contains:
//! - Commands (embedding shell → service bridge)
//! - Application context (dependency injection)
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Exposes plain-function commands for an embedding shell

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::AppContext;
