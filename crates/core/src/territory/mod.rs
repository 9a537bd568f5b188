//! Territory resolution
//!
//! Pure functions over the territory structure and assignment tables.
//! Nothing here touches the store; callers pass in the snapshots they hold.

use std::collections::{BTreeMap, BTreeSet};

use fieldops_domain::{TerritoryAssignments, TerritoryStructure};
use tracing::warn;

/// Maps visible to an operator profile: exactly those whose assignment list
/// names the profile id. No operator means no visible maps — a map with an
/// empty or absent list is hidden from everyone, never "open to all".
pub fn visible_maps(
    assignments: &TerritoryAssignments,
    profile_id: Option<i64>,
) -> BTreeSet<String> {
    let Some(profile_id) = profile_id else {
        return BTreeSet::new();
    };

    assignments
        .iter()
        .filter(|(_, profiles)| profiles.contains(&profile_id))
        .map(|(map, _)| map.clone())
        .collect()
}

/// Flattened `route → (group, map)` lookup built from one structure
/// snapshot.
pub struct RouteIndex {
    routes: BTreeMap<String, (String, String)>,
}

impl RouteIndex {
    /// Builds the index. A route code is expected under exactly one map in
    /// one group; a duplicate keeps its first occurrence and logs.
    pub fn build(structure: &TerritoryStructure) -> Self {
        let mut routes: BTreeMap<String, (String, String)> = BTreeMap::new();

        for (group, maps) in structure {
            for (map, codes) in maps {
                for code in codes {
                    if let Some((first_group, first_map)) = routes.get(code) {
                        warn!(
                            route = %code,
                            first_group = %first_group,
                            first_map = %first_map,
                            duplicate_group = %group,
                            duplicate_map = %map,
                            "duplicate route code in territory structure, keeping first occurrence"
                        );
                        continue;
                    }
                    routes.insert(code.clone(), (group.clone(), map.clone()));
                }
            }
        }

        Self { routes }
    }

    /// `(group, map)` a route code belongs to.
    pub fn lookup(&self, route: &str) -> Option<(&str, &str)> {
        self.routes.get(route).map(|(group, map)| (group.as_str(), map.as_str()))
    }

    /// Just the map a route code belongs to.
    pub fn map_for_route(&self, route: &str) -> Option<&str> {
        self.routes.get(route).map(|(_, map)| map.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
