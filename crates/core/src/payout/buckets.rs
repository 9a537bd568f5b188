//! Payment-method classification
//!
//! Payment methods arrive as free text typed by operators ("Cash",
//! "e-transfer sent", "will pay by cheque"). Classification into the closed
//! [`PaymentBucket`] set is a pure function so the matching rules stay
//! testable in isolation from the rest of the engine.

use fieldops_domain::PaymentBucket;

/// Substring rules checked in fixed priority order. The first match wins,
/// so a label like "cash or cheque" classifies as `Cash`.
const BUCKET_RULES: &[(&str, PaymentBucket)] = &[
    ("cash", PaymentBucket::Cash),
    ("cheque", PaymentBucket::Cheque),
    ("transfer", PaymentBucket::Transfer),
    ("credit", PaymentBucket::Credit),
    ("billed", PaymentBucket::Billed),
    ("ios", PaymentBucket::Ios),
];

/// Classifies a free-text payment label into its canonical bucket.
///
/// The prepaid flag wins outright regardless of the label. Otherwise the
/// label is matched case-insensitively against the substring rules in
/// priority order; anything unmatched (including a missing label) lands in
/// `Custom`.
pub fn classify_payment_method(payment_method: Option<&str>, prepaid: bool) -> PaymentBucket {
    if prepaid {
        return PaymentBucket::Prepaid;
    }

    let Some(label) = payment_method else {
        return PaymentBucket::Custom;
    };
    let label = label.to_lowercase();

    for (needle, bucket) in BUCKET_RULES {
        if label.contains(needle) {
            return *bucket;
        }
    }

    PaymentBucket::Custom
}
