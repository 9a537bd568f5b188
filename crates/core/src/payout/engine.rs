//! Equivalent-unit computation
//!
//! Converts completed booking records into net sales and equivalent units
//! under a payout policy. All arithmetic is `Decimal`; results are exact
//! and independent of record order and of which session computes them.

use std::str::FromStr;

use fieldops_domain::constants::{DOLLARS_PER_EQUIVALENT, FALLBACK_UPSELL_EQ_PERCENT};
use fieldops_domain::{BookingRecord, PayoutBreakdown, PayoutPolicy, UpsellMenu};
use rust_decimal::Decimal;
use tracing::warn;

use super::buckets::classify_payment_method;

/// Parses a price string; missing or malformed prices count as zero so one
/// bad record cannot abort a payout run.
fn parse_price(price: &str) -> Decimal {
    let trimmed = price.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(trimmed).unwrap_or_else(|_| {
        warn!(price = %price, "unparseable price, treating as zero");
        Decimal::ZERO
    })
}

/// `1 + tax_rate/100`, guarded: a degenerate rate (-100% or below) would
/// divide by zero or flip signs, so it falls back to no tax adjustment.
fn tax_divisor(policy: &PayoutPolicy) -> Decimal {
    let divisor = policy.tax_divisor();
    if divisor <= Decimal::ZERO {
        warn!(tax_rate = %policy.tax_rate, "degenerate tax rate, skipping tax adjustment");
        return Decimal::ONE;
    }
    divisor
}

/// Net-sales contribution of a single record under a policy.
///
/// Regular sales: classify the payment label into a bucket, weight the
/// price by the bucket's percentage, and strip tax if the bucket says so.
/// A bucket with no configured rule takes the full price with tax removed.
/// Contract/upsell sales skip bucket weighting entirely: they contribute
/// the menu's percentage of the tax-adjusted price, or a fixed 50% when
/// the referenced menu cannot be found.
pub fn record_contribution(
    record: &BookingRecord,
    policy: &PayoutPolicy,
    menus: &[UpsellMenu],
) -> Decimal {
    let price = parse_price(&record.price);
    let divisor = tax_divisor(policy);

    if record.is_upsell {
        let tax_adjusted = price / divisor;
        let percent = record
            .upsell_menu_id
            .as_deref()
            .and_then(|id| menus.iter().find(|menu| menu.id == id))
            .map(|menu| menu.eq_percentage)
            .unwrap_or_else(|| {
                warn!(
                    booking_id = %record.id,
                    menu_id = record.upsell_menu_id.as_deref().unwrap_or("<none>"),
                    "upsell menu not found, using 50% heuristic"
                );
                FALLBACK_UPSELL_EQ_PERCENT
            });
        return tax_adjusted * percent / Decimal::ONE_HUNDRED;
    }

    let bucket = classify_payment_method(record.payment_method.as_deref(), record.prepaid);
    match policy.rule_for(bucket) {
        Some(rule) => {
            let weighted = price * rule.clamped_percentage() / Decimal::ONE_HUNDRED;
            if rule.apply_taxes {
                weighted / divisor
            } else {
                weighted
            }
        }
        // Unconfigured bucket: full weight with tax removed.
        None => price / divisor,
    }
}

/// Converts a record set into net sales and equivalent units.
///
/// Team seasons deduct the policy's product cost from the summed net sales
/// before the equivalent division. Twenty-five dollars of net sales make
/// one equivalent unit; non-positive net sales yield zero equivalents.
pub fn compute_equivalent(
    records: &[BookingRecord],
    policy: &PayoutPolicy,
    is_team_season: bool,
    menus: &[UpsellMenu],
) -> PayoutBreakdown {
    let mut net_sales: Decimal =
        records.iter().map(|record| record_contribution(record, policy, menus)).sum();

    if is_team_season {
        if let Some(product_cost) = policy.product_cost {
            net_sales *= Decimal::ONE - product_cost / Decimal::ONE_HUNDRED;
        }
    }

    let equivalent = if net_sales > Decimal::ZERO {
        net_sales / DOLLARS_PER_EQUIVALENT
    } else {
        Decimal::ZERO
    };

    PayoutBreakdown { net_sales, equivalent }
}

/// Plain sum of parsed prices, before any weighting.
pub fn gross_sales(records: &[BookingRecord]) -> Decimal {
    records.iter().map(|record| parse_price(&record.price)).sum()
}
