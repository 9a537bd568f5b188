//! Operator and territory commands
//!
//! The active operator is validated here, at the point the pointer is
//! written; the repository itself takes the pointer at face value and
//! fails closed when it dangles.

use std::time::Instant;

use fieldops_core::store::StoreExt;
use fieldops_core::RouteIndex;
use fieldops_domain::constants::{
    ACTIVE_PROFILE_KEY, OPERATOR_PROFILES_KEY, TERRITORY_ASSIGNMENTS_KEY, TERRITORY_STRUCTURE_KEY,
};
use fieldops_domain::{
    FieldOpsError, OperatorProfile, Result, TerritoryAssignments, TerritoryStructure,
};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// All operator profiles in the shared store.
pub fn list_operator_profiles(ctx: &AppContext) -> Result<Vec<OperatorProfile>> {
    let start = Instant::now();
    let result = Ok(ctx.store.get(OPERATOR_PROFILES_KEY, Vec::new()));
    log_command_execution("operators::list_operator_profiles", start.elapsed(), &result);
    result
}

/// Point this session's filtered views at another operator profile.
///
/// The id must exist in the stored profile list; the repository refilters
/// through the bus once the pointer lands.
pub fn set_active_operator(ctx: &AppContext, profile_id: i64) -> Result<()> {
    let start = Instant::now();
    let profiles: Vec<OperatorProfile> = ctx.store.get(OPERATOR_PROFILES_KEY, Vec::new());
    let result = if profiles.iter().any(|profile| profile.id == profile_id) {
        ctx.store.set(ACTIVE_PROFILE_KEY, &profile_id)
    } else {
        Err(FieldOpsError::NotFound(format!("operator profile {profile_id}")))
    };
    log_command_execution("operators::set_active_operator", start.elapsed(), &result);
    result
}

/// Replace the map → operator assignment table.
pub fn set_territory_assignments(
    ctx: &AppContext,
    assignments: &TerritoryAssignments,
) -> Result<()> {
    let start = Instant::now();
    let result = ctx.store.set(TERRITORY_ASSIGNMENTS_KEY, assignments);
    log_command_execution("operators::set_territory_assignments", start.elapsed(), &result);
    result
}

/// Cache an externally fetched territory structure snapshot.
pub fn set_territory_structure(ctx: &AppContext, structure: &TerritoryStructure) -> Result<()> {
    let start = Instant::now();
    let result = ctx.store.set(TERRITORY_STRUCTURE_KEY, structure);
    log_command_execution("operators::set_territory_structure", start.elapsed(), &result);
    result
}

/// Resolve a route code to its `(group, map)` through the cached
/// territory structure. `None` when the code is unknown or no snapshot
/// has been cached yet.
pub fn resolve_route(ctx: &AppContext, route: &str) -> Result<Option<(String, String)>> {
    let start = Instant::now();
    let structure: TerritoryStructure =
        ctx.store.get(TERRITORY_STRUCTURE_KEY, TerritoryStructure::new());
    let index = RouteIndex::build(&structure);
    let result =
        Ok(index.lookup(route).map(|(group, map)| (group.to_string(), map.to_string())));
    log_command_execution("operators::resolve_route", start.elapsed(), &result);
    result
}
