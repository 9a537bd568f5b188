//! Store-key invalidation dispatch
//!
//! When any execution context writes a store key, every repository instance
//! hears about it and must decide how much work the change implies. The
//! decision is a pure function over the key so the two invalidation tiers
//! stay explicit and testable: reloading raw records when the season data
//! itself changed, refiltering when only visibility inputs changed.

use fieldops_domain::constants::{
    ACTIVE_PROFILE_KEY, ACTIVE_SEASON_KEY, OPERATOR_PROFILES_KEY, TERRITORY_ASSIGNMENTS_KEY,
};

/// What a written store key means for the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationAction {
    /// Reload the raw collection from the store, then refilter.
    Resync,
    /// Recompute the filtered view only; raw records are still current.
    Refilter,
    /// The key feeds nothing the repository derives.
    Ignore,
}

/// Routes a written key to its invalidation tier.
///
/// The active-season pointer and the active collection's own key invalidate
/// the raw records; the operator pointer, the profile list, and the
/// territory assignment table only change what is visible. A write to an
/// *inactive* season's collection is ignored — it will be loaded fresh if
/// that season ever becomes active.
pub fn classify_store_key(key: &str, active_storage_key: Option<&str>) -> InvalidationAction {
    if key == ACTIVE_SEASON_KEY || Some(key) == active_storage_key {
        return InvalidationAction::Resync;
    }

    if key == ACTIVE_PROFILE_KEY || key == TERRITORY_ASSIGNMENTS_KEY || key == OPERATOR_PROFILES_KEY
    {
        return InvalidationAction::Refilter;
    }

    InvalidationAction::Ignore
}
