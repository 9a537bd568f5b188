//! Territory and operator types
//!
//! Territory is a two-level grouping (`group` → `map`) of route codes.
//! Assignments gate which maps an operator profile can see. Ordered maps
//! keep derived iteration deterministic across sessions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `group → map → [route code]`, as fetched from the external source and
/// cached in the store. Every route code appears under exactly one map
/// within one group in a given snapshot.
pub type TerritoryStructure = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// `map name → [operator profile id]`. A map with an empty or absent list is
/// visible to no operator profile.
pub type TerritoryAssignments = BTreeMap<String, Vec<i64>>;

/// `route code → worker id`, consulted only for records carrying no direct
/// worker assignment.
pub type RouteAssignments = BTreeMap<String, i64>;

/// The logged-in management context whose territory assignments gate record
/// visibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperatorProfile {
    pub id: i64,
    pub title: String,
    pub region: String,
}
