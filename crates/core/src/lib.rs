//! # FieldOps Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The season-scoped, territory-filtered booking repository
//! - The payout/equivalent computation engine
//! - The worker payroll lifecycle
//! - Port/adapter interfaces (traits) for persistence
//!
//! ## Architecture Principles
//! - Only depends on `fieldops-domain`
//! - No database or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod bookings;
pub mod payout;
pub mod payroll;
pub mod store;
pub mod territory;

// Re-export specific items to avoid ambiguity
pub use bookings::invalidation::{classify_store_key, InvalidationAction};
pub use bookings::{BookingService, RepositoryPhase};
pub use payout::{classify_payment_method, compute_equivalent, gross_sales, record_contribution};
pub use payroll::PayrollService;
pub use store::{KeyValueStore, StoreEvent, StoreEventBus, StoreExt, StoreObserver};
pub use territory::{visible_maps, RouteIndex};
