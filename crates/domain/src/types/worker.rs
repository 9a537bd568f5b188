//! Workers, carts, and payout history

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field personnel. The daily payout fields are derived snapshots — reset at
/// the start of each work day, written when the payout step is finalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    /// Team seasons group workers into carts by this foreign key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<i64>,
    #[serde(default)]
    pub gross_sales: Decimal,
    #[serde(default)]
    pub equivalent: Decimal,
    #[serde(default)]
    pub commission: Decimal,
    #[serde(default)]
    pub history: Vec<PayoutRecord>,
}

impl Worker {
    /// Zeroes the daily derived fields. History is never touched.
    pub fn reset_daily(&mut self) {
        self.gross_sales = Decimal::ZERO;
        self.equivalent = Decimal::ZERO;
        self.commission = Decimal::ZERO;
    }
}

/// Team unit for Team-kind seasons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    pub id: i64,
    pub name: String,
}

/// Immutable history entry appended when a worker's payout is finalized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub gross_sales: Decimal,
    pub equivalent: Decimal,
    pub commission: Decimal,
    pub deductions: Decimal,
    pub bonuses: Decimal,
}
