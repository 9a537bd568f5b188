//! Season commands
//!
//! The active season is a single store pointer; switching it is one write,
//! and the store bus makes every subscribed repository resync.

use std::time::Instant;

use fieldops_core::store::StoreExt;
use fieldops_domain::constants::ACTIVE_SEASON_KEY;
use fieldops_domain::{BookingRecord, FieldOpsError, Result, SeasonDescriptor, SEASON_DESCRIPTORS};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// The static season table, in presentation order.
pub fn list_seasons(_ctx: &AppContext) -> Result<&'static [SeasonDescriptor]> {
    let start = Instant::now();
    let result = Ok(SEASON_DESCRIPTORS);
    log_command_execution("seasons::list_seasons", start.elapsed(), &result);
    result
}

/// The season the repository currently serves, `None` while the pointer is
/// missing or unresolvable.
pub fn active_season(ctx: &AppContext) -> Result<Option<SeasonDescriptor>> {
    let start = Instant::now();
    let result = Ok(ctx
        .bookings
        .active_storage_key()
        .as_deref()
        .and_then(SeasonDescriptor::by_storage_key)
        .copied());
    log_command_execution("seasons::active_season", start.elapsed(), &result);
    result
}

/// Point the shared store at another season. The write fans out through
/// the bus, so every open session reloads before this returns.
pub fn set_active_season(ctx: &AppContext, season_id: &str) -> Result<()> {
    let start = Instant::now();
    let result = match SeasonDescriptor::by_id(season_id) {
        Some(_) => ctx.store.set(ACTIVE_SEASON_KEY, &season_id),
        None => Err(FieldOpsError::InvalidInput(format!("unknown season id: {season_id}"))),
    };
    log_command_execution("seasons::set_active_season", start.elapsed(), &result);
    result
}

/// Bulk-replace one season's persisted collection.
pub fn import_season_records(
    ctx: &AppContext,
    records: Vec<BookingRecord>,
    storage_key: &str,
) -> Result<()> {
    let start = Instant::now();
    let result = ctx.bookings.replace_all_for_key(records, storage_key);
    log_command_execution("seasons::import_season_records", start.elapsed(), &result);
    result
}
