//! Season-scoped booking repository
//!
//! One authoritative in-process view of "the active season's records,
//! filtered to what the logged-in operator may see", kept consistent with
//! foreign writes through the store event bus.

pub mod invalidation;
pub mod service;

pub use service::{BookingService, RepositoryPhase};
