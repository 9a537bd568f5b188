//! Booking commands
//!
//! Reads serve the operator-filtered view; writes go through the
//! repository so the persisted collection and the view stay in step.

use std::time::Instant;

use fieldops_domain::{BookingDraft, BookingRecord, Result};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// All bookings of the active season visible to the active operator.
pub fn get_bookings(ctx: &AppContext) -> Result<Vec<BookingRecord>> {
    let start = Instant::now();
    let result = Ok(ctx.bookings.get_all());
    log_command_execution("bookings::get_bookings", start.elapsed(), &result);
    result
}

/// One visible booking by id, or `None` when it is absent or out of view.
pub fn get_booking(ctx: &AppContext, id: &str) -> Result<Option<BookingRecord>> {
    let start = Instant::now();
    let result = Ok(ctx.bookings.get_by_id(id));
    log_command_execution("bookings::get_booking", start.elapsed(), &result);
    result
}

/// Visible bookings belonging to a worker (directly assigned, or through
/// the route table when no direct assignment exists).
pub fn get_bookings_for_worker(ctx: &AppContext, worker_id: i64) -> Result<Vec<BookingRecord>> {
    let start = Instant::now();
    let result = Ok(ctx.bookings.get_for_worker(worker_id));
    log_command_execution("bookings::get_bookings_for_worker", start.elapsed(), &result);
    result
}

/// Create a booking in the active season from a draft.
pub fn add_booking(ctx: &AppContext, draft: BookingDraft) -> Result<BookingRecord> {
    let start = Instant::now();
    let result = ctx.bookings.add(draft);
    log_command_execution("bookings::add_booking", start.elapsed(), &result);
    result
}

/// Apply a draft to an existing booking.
pub fn update_booking(ctx: &AppContext, id: &str, draft: &BookingDraft) -> Result<()> {
    let start = Instant::now();
    let result = ctx.bookings.update(id, draft);
    log_command_execution("bookings::update_booking", start.elapsed(), &result);
    result
}
