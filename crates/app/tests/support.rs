//! Shared helpers for app-level integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fieldops_app::{self as app, AppContext};
use fieldops_core::store::StoreExt;
use fieldops_domain::constants::{CARTS_KEY, OPERATOR_PROFILES_KEY, WORKERS_KEY};
use fieldops_domain::{
    BookingDraft, Cart, MethodRule, OperatorProfile, PaymentBucket, PayoutPolicy,
    TerritoryAssignments, Worker,
};
use rust_decimal::Decimal;

pub fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).expect("valid test date")
}

pub fn at_noon(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).expect("valid time"))
}

pub fn profile(id: i64, title: &str) -> OperatorProfile {
    OperatorProfile { id, title: title.to_string(), region: "North".to_string() }
}

pub fn assignments(entries: &[(&str, &[i64])]) -> TerritoryAssignments {
    entries.iter().map(|(map, profiles)| (map.to_string(), profiles.to_vec())).collect()
}

pub fn draft(map: &str, route: &str) -> BookingDraft {
    BookingDraft {
        map: Some(map.to_string()),
        route: Some(route.to_string()),
        customer_name: Some("Test customer".to_string()),
        ..Default::default()
    }
}

pub fn completed_draft(
    map: &str,
    worker_id: i64,
    price: &str,
    payment_method: &str,
    date: NaiveDate,
) -> BookingDraft {
    BookingDraft {
        map: Some(map.to_string()),
        worker_id: Some(worker_id),
        price: Some(price.to_string()),
        payment_method: Some(payment_method.to_string()),
        completed: Some(true),
        completed_at: Some(at_noon(date)),
        ..Default::default()
    }
}

pub fn worker(id: i64, name: &str, cart_id: Option<i64>) -> Worker {
    Worker {
        id,
        name: name.to_string(),
        cart_id,
        gross_sales: Decimal::ZERO,
        equivalent: Decimal::ZERO,
        commission: Decimal::ZERO,
        history: Vec::new(),
    }
}

pub fn cash_policy(tax_rate: i64, percentage: i64, apply_taxes: bool) -> PayoutPolicy {
    let mut percentages = BTreeMap::new();
    percentages.insert(
        PaymentBucket::Cash,
        MethodRule { percentage: Decimal::new(percentage, 0), apply_taxes },
    );
    PayoutPolicy {
        tax_rate: Decimal::new(tax_rate, 0),
        product_cost: None,
        payment_method_percentages: percentages,
    }
}

/// In-memory context with operators 1 and 2 on file, operator 1 active
/// over "North Ridge", and the given season active.
pub fn seeded_context(season_id: &str) -> AppContext {
    let ctx = AppContext::initialize_in_memory();

    ctx.store
        .set(OPERATOR_PROFILES_KEY, &vec![profile(1, "Day lead"), profile(2, "Night lead")])
        .expect("seed operator profiles");
    app::set_territory_assignments(&ctx, &assignments(&[("North Ridge", &[1])]))
        .expect("seed assignments");
    app::set_active_operator(&ctx, 1).expect("activate operator");
    app::set_active_season(&ctx, season_id).expect("activate season");

    ctx
}

pub fn seed_workers(ctx: &AppContext, workers: &[Worker]) {
    ctx.store.set(WORKERS_KEY, &workers).expect("seed workers");
}

pub fn seed_carts(ctx: &AppContext, carts: &[Cart]) {
    ctx.store.set(CARTS_KEY, &carts).expect("seed carts");
}
