//! Payout commands over an in-memory context.

mod support;

use std::str::FromStr;

use fieldops_app::{self as app, AppContext};
use fieldops_domain::{Cart, FieldOpsError, PayoutAdjustments};
use rust_decimal::Decimal;

use support::{cash_policy, completed_draft, day, seed_carts, seed_workers, seeded_context, worker};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("test literal should parse")
}

#[test]
fn policy_round_trips_for_the_active_season() {
    let ctx = seeded_context("spring");
    let policy = cash_policy(13, 100, true);

    app::set_payout_policy(&ctx, &policy).expect("set policy");

    assert_eq!(app::get_payout_policy(&ctx).expect("get policy"), policy);
}

#[test]
fn policy_commands_require_an_active_season() {
    let ctx = AppContext::initialize_in_memory();

    let error = app::get_payout_policy(&ctx).expect_err("no active season");

    assert!(matches!(error, FieldOpsError::Config(_)));
}

#[test]
fn missing_policy_reads_as_empty() {
    let ctx = seeded_context("spring");

    let policy = app::get_payout_policy(&ctx).expect("get policy");

    assert_eq!(policy.tax_rate, Decimal::ZERO);
    assert!(policy.payment_method_percentages.is_empty());
}

#[test]
fn worker_preview_matches_the_worked_example() {
    let ctx = seeded_context("spring");
    seed_workers(&ctx, &[worker(7, "A. Tremblay", None)]);
    app::set_payout_policy(&ctx, &cash_policy(13, 100, true)).expect("set policy");
    let work_day = day(2024, 6, 15);
    app::add_booking(&ctx, completed_draft("North Ridge", 7, "100.00", "Cash", work_day))
        .expect("add");

    let payout = app::worker_payout_preview(&ctx, 7, work_day).expect("preview");

    assert_eq!(payout.gross_sales, dec("100.00"));
    assert_eq!(payout.net_sales.round_dp(4), dec("88.4956"));
    assert_eq!(payout.equivalent.round_dp(5), dec("3.53982"));
}

#[test]
fn cart_preview_sums_its_members() {
    let ctx = seeded_context("summer");
    seed_workers(
        &ctx,
        &[worker(7, "A. Tremblay", Some(2)), worker(8, "B. Okafor", Some(2))],
    );
    seed_carts(&ctx, &[Cart { id: 2, name: "East cart".to_string() }]);
    app::set_payout_policy(&ctx, &cash_policy(0, 100, false)).expect("set policy");
    let work_day = day(2024, 7, 2);
    app::add_booking(&ctx, completed_draft("North Ridge", 7, "100.00", "Cash", work_day))
        .expect("add");
    app::add_booking(&ctx, completed_draft("North Ridge", 8, "150.00", "Cash", work_day))
        .expect("add");

    let cart = app::cart_payout_preview(&ctx, 2, work_day).expect("preview");
    let first = app::worker_payout_preview(&ctx, 7, work_day).expect("preview");
    let second = app::worker_payout_preview(&ctx, 8, work_day).expect("preview");

    assert_eq!(cart.members.len(), 2);
    assert_eq!(cart.gross_sales, dec("250.00"));
    assert_eq!(cart.equivalent, first.equivalent + second.equivalent);
}

#[test]
fn finalize_and_reset_walk_the_daily_lifecycle() {
    let ctx = seeded_context("spring");
    seed_workers(&ctx, &[worker(7, "A. Tremblay", None)]);
    let work_day = day(2024, 6, 15);
    app::add_booking(&ctx, completed_draft("North Ridge", 7, "100.00", "Cash", work_day))
        .expect("add");

    let entry = app::finalize_worker_payout(
        &ctx,
        7,
        work_day,
        PayoutAdjustments { commission: dec("45.00"), ..Default::default() },
    )
    .expect("finalize");
    assert_eq!(entry.gross_sales, dec("100.00"));
    assert_eq!(entry.commission, dec("45.00"));

    let after_finalize = ctx.payroll.worker(7).expect("worker on file");
    assert_eq!(after_finalize.gross_sales, dec("100.00"));
    assert_eq!(after_finalize.history.len(), 1);

    app::reset_payout_day(&ctx).expect("reset");

    let after_reset = ctx.payroll.worker(7).expect("worker on file");
    assert_eq!(after_reset.gross_sales, Decimal::ZERO);
    assert_eq!(after_reset.history.len(), 1);
}

#[test]
fn finalize_cart_touches_every_member() {
    let ctx = seeded_context("summer");
    seed_workers(
        &ctx,
        &[worker(7, "A. Tremblay", Some(2)), worker(8, "B. Okafor", Some(2))],
    );
    seed_carts(&ctx, &[Cart { id: 2, name: "East cart".to_string() }]);
    let work_day = day(2024, 7, 2);
    app::add_booking(&ctx, completed_draft("North Ridge", 7, "100.00", "Cash", work_day))
        .expect("add");

    let entries = app::finalize_cart_payout(&ctx, 2, work_day, PayoutAdjustments::default())
        .expect("finalize cart");

    assert_eq!(entries.len(), 2);
    assert_eq!(ctx.payroll.worker(7).expect("member").history.len(), 1);
    assert_eq!(ctx.payroll.worker(8).expect("member").history.len(), 1);
}

#[test]
fn preview_for_an_unknown_worker_is_not_found() {
    let ctx = seeded_context("spring");
    seed_workers(&ctx, &[worker(7, "A. Tremblay", None)]);

    let error =
        app::worker_payout_preview(&ctx, 99, day(2024, 6, 15)).expect_err("unknown worker");

    assert!(matches!(error, FieldOpsError::NotFound(_)));
}
