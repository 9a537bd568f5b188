//! Season descriptors
//!
//! A season is one independently-stored collection of booking records plus
//! its payout rules. The table here is immutable reference data; the store
//! only ever holds the *pointer* to the active season id.

use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

/// Payout shape of a season: individual workers, team carts, or a service
/// line with no payout step at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeasonKind {
    Individual,
    Team,
    Service,
}

impl_label_conversions!(SeasonKind {
    Individual => "individual",
    Team => "team",
    Service => "service",
});

/// One entry of the static season table.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SeasonDescriptor {
    pub id: &'static str,
    /// Store key under which this season's booking collection is persisted.
    pub storage_key: &'static str,
    pub kind: SeasonKind,
    /// Service lines have no payout step; their records are tracked only.
    pub has_payout_logic: bool,
}

/// The full season table. Order is presentation order.
pub const SEASON_DESCRIPTORS: &[SeasonDescriptor] = &[
    SeasonDescriptor {
        id: "spring",
        storage_key: "spring_bookings",
        kind: SeasonKind::Individual,
        has_payout_logic: true,
    },
    SeasonDescriptor {
        id: "summer",
        storage_key: "summer_bookings",
        kind: SeasonKind::Team,
        has_payout_logic: true,
    },
    SeasonDescriptor {
        id: "fall",
        storage_key: "fall_bookings",
        kind: SeasonKind::Individual,
        has_payout_logic: true,
    },
    SeasonDescriptor {
        id: "service",
        storage_key: "service_bookings",
        kind: SeasonKind::Service,
        has_payout_logic: false,
    },
];

impl SeasonDescriptor {
    /// Resolves a season id (the value of the active-season pointer) to its
    /// descriptor. Unknown ids return `None`; callers treat that as a
    /// recoverable configuration error.
    pub fn by_id(id: &str) -> Option<&'static SeasonDescriptor> {
        SEASON_DESCRIPTORS.iter().find(|descriptor| descriptor.id == id)
    }

    /// Resolves a storage key back to its descriptor.
    pub fn by_storage_key(key: &str) -> Option<&'static SeasonDescriptor> {
        SEASON_DESCRIPTORS.iter().find(|descriptor| descriptor.storage_key == key)
    }

    pub fn is_team(&self) -> bool {
        self.kind == SeasonKind::Team
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_id_resolves_every_descriptor() {
        for descriptor in SEASON_DESCRIPTORS {
            let found = SeasonDescriptor::by_id(descriptor.id).expect("descriptor should resolve");
            assert_eq!(found.storage_key, descriptor.storage_key);
        }
    }

    #[test]
    fn by_id_rejects_unknown_season() {
        assert!(SeasonDescriptor::by_id("winter").is_none());
    }

    #[test]
    fn by_storage_key_round_trips() {
        let descriptor =
            SeasonDescriptor::by_storage_key("summer_bookings").expect("summer should resolve");
        assert_eq!(descriptor.id, "summer");
        assert!(descriptor.is_team());
    }

    #[test]
    fn storage_keys_are_unique() {
        for (i, a) in SEASON_DESCRIPTORS.iter().enumerate() {
            for b in &SEASON_DESCRIPTORS[i + 1..] {
                assert_ne!(a.storage_key, b.storage_key);
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn season_kind_parses_case_insensitively() {
        use std::str::FromStr;

        assert_eq!(SeasonKind::from_str("TEAM").unwrap(), SeasonKind::Team);
        assert_eq!(SeasonKind::Individual.to_string(), "individual");
    }

    #[test]
    fn service_line_carries_no_payout_logic() {
        let descriptor = SeasonDescriptor::by_id("service").expect("service should resolve");
        assert!(!descriptor.has_payout_logic);
    }
}
