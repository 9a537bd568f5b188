//! Booking records
//!
//! The atomic unit of work: one customer job inside one season's collection.
//! Records arrive from spreadsheet import or same-day sale entry, so every
//! field deserializes leniently — a sparse or legacy payload fills in with
//! type-correct defaults instead of failing the whole collection.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Cancelled,
    Redo,
    /// Refused / do-not-book.
    #[serde(rename = "ref/dnb")]
    RefDnb,
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl_label_conversions!(BookingStatus {
    Pending => "pending",
    Cancelled => "cancelled",
    Redo => "redo",
    RefDnb => "ref/dnb",
});

/// One booking record as persisted in a season collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    #[serde(default)]
    pub id: String,
    /// Route code placing the booking inside the territory structure.
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub map: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Decimal string as imported; parsed at computation time with a zero
    /// fallback.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: BookingStatus,
    /// Free-text label as entered; classified into a payment bucket by the
    /// payout engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub prepaid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<i64>,
    /// Contract/upsell sales take the menu-percentage payout path.
    #[serde(default)]
    pub is_upsell: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upsell_menu_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Partial booking payload used by `add` and `update`. Absent fields mean
/// "leave unchanged" on update and "use the default" on add.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDraft {
    pub route: Option<String>,
    pub map: Option<String>,
    pub group: Option<String>,
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub price: Option<String>,
    pub completed: Option<bool>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
    pub payment_method: Option<String>,
    pub prepaid: Option<bool>,
    pub worker_id: Option<i64>,
    pub is_upsell: Option<bool>,
    pub upsell_menu_id: Option<String>,
    pub note: Option<String>,
}

impl BookingRecord {
    /// Builds a full record from a draft, filling every missing field with a
    /// type-correct default. This is the single place default-filling
    /// happens; `add`, bulk import, and test fixtures all go through it.
    pub fn normalize(draft: BookingDraft, id: impl Into<String>) -> Self {
        let now = Utc::now();
        let completed = draft.completed.unwrap_or(false);

        Self {
            id: id.into(),
            route: draft.route.unwrap_or_default(),
            map: draft.map.unwrap_or_default(),
            group: draft.group.unwrap_or_default(),
            customer_name: draft.customer_name.unwrap_or_default(),
            address: draft.address.unwrap_or_default(),
            phone: draft.phone.unwrap_or_default(),
            email: draft.email,
            price: draft.price.unwrap_or_default(),
            completed,
            completed_at: draft.completed_at.or(completed.then_some(now)),
            status: draft.status.unwrap_or_default(),
            payment_method: draft.payment_method,
            prepaid: draft.prepaid.unwrap_or(false),
            worker_id: draft.worker_id,
            is_upsell: draft.is_upsell.unwrap_or(false),
            upsell_menu_id: draft.upsell_menu_id,
            note: draft.note,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the provided fields of a draft onto this record and stamps
    /// the update timestamp. Absent draft fields leave the record untouched.
    pub fn apply_draft(&mut self, draft: &BookingDraft) {
        if let Some(route) = &draft.route {
            self.route = route.clone();
        }
        if let Some(map) = &draft.map {
            self.map = map.clone();
        }
        if let Some(group) = &draft.group {
            self.group = group.clone();
        }
        if let Some(customer_name) = &draft.customer_name {
            self.customer_name = customer_name.clone();
        }
        if let Some(address) = &draft.address {
            self.address = address.clone();
        }
        if let Some(phone) = &draft.phone {
            self.phone = phone.clone();
        }
        if let Some(email) = &draft.email {
            self.email = Some(email.clone());
        }
        if let Some(price) = &draft.price {
            self.price = price.clone();
        }
        if let Some(completed) = draft.completed {
            self.completed = completed;
            if !completed {
                self.completed_at = None;
            } else if self.completed_at.is_none() && draft.completed_at.is_none() {
                // Completion without an explicit timestamp stamps "now" once;
                // re-applying the same draft later must not move it.
                self.completed_at = Some(Utc::now());
            }
        }
        if let Some(completed_at) = draft.completed_at {
            self.completed_at = Some(completed_at);
        }
        if let Some(status) = draft.status {
            self.status = status;
        }
        if let Some(payment_method) = &draft.payment_method {
            self.payment_method = Some(payment_method.clone());
        }
        if let Some(prepaid) = draft.prepaid {
            self.prepaid = prepaid;
        }
        if let Some(worker_id) = draft.worker_id {
            self.worker_id = Some(worker_id);
        }
        if let Some(is_upsell) = draft.is_upsell {
            self.is_upsell = is_upsell;
        }
        if let Some(upsell_menu_id) = &draft.upsell_menu_id {
            self.upsell_menu_id = Some(upsell_menu_id.clone());
        }
        if let Some(note) = &draft.note {
            self.note = Some(note.clone());
        }
        self.updated_at = Utc::now();
    }

    /// True when the booking was completed on the given calendar day.
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        self.completed && self.completed_at.is_some_and(|at| at.date_naive() == day)
    }
}
