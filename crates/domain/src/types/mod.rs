//! Domain types and models

pub mod booking;
pub mod payout;
pub mod season;
pub mod territory;
pub mod worker;

// Re-export the working set so callers can use `fieldops_domain::BookingRecord`
pub use booking::{BookingDraft, BookingRecord, BookingStatus};
pub use payout::{
    CartPayout, MethodRule, PaymentBucket, PayoutAdjustments, PayoutBreakdown, PayoutPolicy,
    UpsellMenu, WorkerPayout,
};
pub use season::{SeasonDescriptor, SeasonKind, SEASON_DESCRIPTORS};
pub use territory::{OperatorProfile, RouteAssignments, TerritoryAssignments, TerritoryStructure};
pub use worker::{Cart, PayoutRecord, Worker};
