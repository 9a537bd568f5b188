//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

use rust_decimal::Decimal;

// Store keys for app-wide singletons
pub const ACTIVE_SEASON_KEY: &str = "active_season_id";
pub const ACTIVE_PROFILE_KEY: &str = "active_profile_id";
pub const OPERATOR_PROFILES_KEY: &str = "operator_profiles";
pub const TERRITORY_STRUCTURE_KEY: &str = "territory_structure";
pub const TERRITORY_ASSIGNMENTS_KEY: &str = "territory_assignments";
pub const ROUTE_ASSIGNMENTS_KEY: &str = "route_assignments";
pub const UPSELL_MENUS_KEY: &str = "upsell_menus";
pub const WORKERS_KEY: &str = "workers";
pub const CARTS_KEY: &str = "carts";

// Payout math
pub const DOLLARS_PER_EQUIVALENT: Decimal = Decimal::from_parts(25, 0, 0, false, 0);
pub const FALLBACK_UPSELL_EQ_PERCENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

// Booking id synthesis
pub const BOOKING_ID_SUFFIX_LEN: usize = 6;

/// Store key holding the payout policy for one season's booking collection.
pub fn payout_policy_key(storage_key: &str) -> String {
    format!("{storage_key}_payout_policy")
}
