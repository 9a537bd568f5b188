//! Payout / equivalent engine
//!
//! Stateless computation: booking records plus a payout policy in,
//! normalized net sales and equivalent units out. The engine never touches
//! the store and never fails — malformed inputs degrade to documented
//! defaults.

pub mod buckets;
pub mod engine;

pub use buckets::classify_payment_method;
pub use engine::{compute_equivalent, gross_sales, record_contribution};
