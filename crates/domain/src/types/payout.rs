//! Payout policy and result types
//!
//! All monetary math runs on `rust_decimal::Decimal` so results are
//! reproducible regardless of which session computed them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

/// Canonical payment bucket a free-text payment-method label classifies
/// into. Closed set; anything unrecognized lands in `Custom`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentBucket {
    Prepaid,
    Cash,
    Cheque,
    Transfer,
    Credit,
    Billed,
    Ios,
    Custom,
}

impl_label_conversions!(PaymentBucket {
    Prepaid => "prepaid",
    Cash => "cash",
    Cheque => "cheque",
    Transfer => "transfer",
    Credit => "credit",
    Billed => "billed",
    Ios => "ios",
    Custom => "custom",
});

/// Weighting applied to one payment bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MethodRule {
    /// Percentage of the price that counts toward net sales, [0, 100].
    pub percentage: Decimal,
    /// When set, the weighted value additionally has tax removed.
    pub apply_taxes: bool,
}

impl MethodRule {
    /// Percentage clamped to [0, 100]. Stored values are operator-entered,
    /// so clamping happens on use rather than on write.
    pub fn clamped_percentage(&self) -> Decimal {
        self.percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}

/// Per-season payout configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PayoutPolicy {
    /// Tax rate in percent (13 means 13%).
    #[serde(default)]
    pub tax_rate: Decimal,
    /// Team seasons deduct this percentage of net sales for product cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_cost: Option<Decimal>,
    #[serde(default)]
    pub payment_method_percentages: BTreeMap<PaymentBucket, MethodRule>,
}

impl PayoutPolicy {
    /// `1 + tax_rate/100`, the divisor that strips tax from a gross price.
    pub fn tax_divisor(&self) -> Decimal {
        Decimal::ONE + self.tax_rate / Decimal::ONE_HUNDRED
    }

    pub fn rule_for(&self, bucket: PaymentBucket) -> Option<&MethodRule> {
        self.payment_method_percentages.get(&bucket)
    }
}

/// Reference table entry for contract/upsell sales.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpsellMenu {
    pub id: String,
    pub name: String,
    /// Percentage of the tax-adjusted price credited as net sales.
    pub eq_percentage: Decimal,
}

/// Net result of one payout computation over a record set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutBreakdown {
    pub net_sales: Decimal,
    pub equivalent: Decimal,
}

/// One worker's computed payout for a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerPayout {
    pub worker_id: i64,
    /// Plain sum of parsed prices, before weighting.
    pub gross_sales: Decimal,
    pub net_sales: Decimal,
    pub equivalent: Decimal,
}

/// A cart's payout: the sum of its members' already-computed payouts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPayout {
    pub cart_id: i64,
    pub gross_sales: Decimal,
    pub net_sales: Decimal,
    pub equivalent: Decimal,
    pub members: Vec<WorkerPayout>,
}

/// Operator-entered amounts recorded alongside a finalized payout.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PayoutAdjustments {
    pub commission: Decimal,
    pub deductions: Decimal,
    pub bonuses: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_percentage_stays_inside_bounds() {
        let over = MethodRule { percentage: Decimal::new(150, 0), apply_taxes: false };
        let under = MethodRule { percentage: Decimal::new(-10, 0), apply_taxes: false };
        let plain = MethodRule { percentage: Decimal::new(625, 1), apply_taxes: false };

        assert_eq!(over.clamped_percentage(), Decimal::ONE_HUNDRED);
        assert_eq!(under.clamped_percentage(), Decimal::ZERO);
        assert_eq!(plain.clamped_percentage(), Decimal::new(625, 1));
    }

    #[test]
    fn tax_divisor_follows_the_rate() {
        let policy = PayoutPolicy { tax_rate: Decimal::new(13, 0), ..Default::default() };
        assert_eq!(policy.tax_divisor(), Decimal::new(113, 2));

        let untaxed = PayoutPolicy::default();
        assert_eq!(untaxed.tax_divisor(), Decimal::ONE);
    }

    #[test]
    fn policy_serializes_buckets_as_snake_case_keys() {
        let mut policy = PayoutPolicy { tax_rate: Decimal::new(13, 0), ..Default::default() };
        policy.payment_method_percentages.insert(
            PaymentBucket::Cash,
            MethodRule { percentage: Decimal::ONE_HUNDRED, apply_taxes: true },
        );

        let json = serde_json::to_string(&policy).expect("policy should serialize");
        assert!(json.contains(r#""cash""#), "bucket keys should be snake_case: {json}");

        let parsed: PayoutPolicy = serde_json::from_str(&json).expect("round trip");
        assert_eq!(parsed, policy);
    }

    #[test]
    fn payment_bucket_labels_round_trip() {
        use std::str::FromStr;

        for bucket in [
            PaymentBucket::Prepaid,
            PaymentBucket::Cash,
            PaymentBucket::Cheque,
            PaymentBucket::Transfer,
            PaymentBucket::Credit,
            PaymentBucket::Billed,
            PaymentBucket::Ios,
            PaymentBucket::Custom,
        ] {
            let parsed = PaymentBucket::from_str(&bucket.to_string()).expect("label should parse");
            assert_eq!(parsed, bucket);
        }
    }
}
