//! Worker payroll lifecycle
//!
//! Roster reads, per-worker and per-cart payout computation, end-of-day
//! finalization into immutable history, and the start-of-day reset.

pub mod service;

pub use service::PayrollService;
