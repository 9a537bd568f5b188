//! Payout commands
//!
//! Policy edits address the active season's policy key; previews and
//! finalization delegate to the payroll service.

use std::time::Instant;

use chrono::NaiveDate;
use fieldops_core::store::StoreExt;
use fieldops_domain::constants::payout_policy_key;
use fieldops_domain::{
    CartPayout, FieldOpsError, PayoutAdjustments, PayoutPolicy, PayoutRecord, Result, WorkerPayout,
};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

fn active_policy_key(ctx: &AppContext) -> Result<String> {
    ctx.bookings
        .active_storage_key()
        .map(|key| payout_policy_key(&key))
        .ok_or_else(|| FieldOpsError::Config("no active season".to_string()))
}

/// The active season's payout policy; a missing policy reads as empty.
pub fn get_payout_policy(ctx: &AppContext) -> Result<PayoutPolicy> {
    let start = Instant::now();
    let result =
        active_policy_key(ctx).map(|key| ctx.store.get(&key, PayoutPolicy::default()));
    log_command_execution("payout::get_payout_policy", start.elapsed(), &result);
    result
}

/// Replace the active season's payout policy.
pub fn set_payout_policy(ctx: &AppContext, policy: &PayoutPolicy) -> Result<()> {
    let start = Instant::now();
    let result = active_policy_key(ctx).and_then(|key| ctx.store.set(&key, policy));
    log_command_execution("payout::set_payout_policy", start.elapsed(), &result);
    result
}

/// Compute (without persisting) one worker's payout for a day.
pub fn worker_payout_preview(
    ctx: &AppContext,
    worker_id: i64,
    day: NaiveDate,
) -> Result<WorkerPayout> {
    let start = Instant::now();
    let result = ctx.payroll.payout_for_worker(worker_id, day);
    log_command_execution("payout::worker_payout_preview", start.elapsed(), &result);
    result
}

/// Compute (without persisting) a cart's payout for a day.
pub fn cart_payout_preview(ctx: &AppContext, cart_id: i64, day: NaiveDate) -> Result<CartPayout> {
    let start = Instant::now();
    let result = ctx.payroll.payout_for_cart(cart_id, day);
    log_command_execution("payout::cart_payout_preview", start.elapsed(), &result);
    result
}

/// Finalize one worker's day: append the history entry and persist the
/// roster snapshot.
pub fn finalize_worker_payout(
    ctx: &AppContext,
    worker_id: i64,
    day: NaiveDate,
    adjustments: PayoutAdjustments,
) -> Result<PayoutRecord> {
    let start = Instant::now();
    let result = ctx.payroll.finalize_worker(worker_id, day, adjustments);
    log_command_execution("payout::finalize_worker_payout", start.elapsed(), &result);
    result
}

/// Finalize every member of a cart with the same adjustments.
pub fn finalize_cart_payout(
    ctx: &AppContext,
    cart_id: i64,
    day: NaiveDate,
    adjustments: PayoutAdjustments,
) -> Result<Vec<PayoutRecord>> {
    let start = Instant::now();
    let result = ctx.payroll.finalize_cart(cart_id, day, adjustments);
    log_command_execution("payout::finalize_cart_payout", start.elapsed(), &result);
    result
}

/// Zero every worker's daily derived fields for a new work day.
pub fn reset_payout_day(ctx: &AppContext) -> Result<()> {
    let start = Instant::now();
    let result = ctx.payroll.reset_day();
    log_command_execution("payout::reset_payout_day", start.elapsed(), &result);
    result
}
