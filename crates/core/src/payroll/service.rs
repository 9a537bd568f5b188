//! Payroll service

use std::sync::Arc;

use chrono::NaiveDate;
use fieldops_domain::constants::{payout_policy_key, CARTS_KEY, UPSELL_MENUS_KEY, WORKERS_KEY};
use fieldops_domain::{
    Cart, CartPayout, FieldOpsError, PayoutAdjustments, PayoutPolicy, PayoutRecord, Result,
    SeasonDescriptor, UpsellMenu, Worker, WorkerPayout,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::bookings::BookingService;
use crate::payout::{compute_equivalent, gross_sales};
use crate::store::{KeyValueStore, StoreExt};

/// Daily payout lifecycle over the worker roster.
///
/// Works entirely through the booking repository's filtered view, so a
/// worker's payout only ever counts records the requesting operator can
/// see. Computation itself never fails; only unknown roster ids do.
pub struct PayrollService {
    store: Arc<dyn KeyValueStore>,
    bookings: Arc<BookingService>,
}

impl PayrollService {
    pub fn new(store: Arc<dyn KeyValueStore>, bookings: Arc<BookingService>) -> Self {
        Self { store, bookings }
    }

    // ========================================================================
    // Roster
    // ========================================================================

    pub fn workers(&self) -> Vec<Worker> {
        self.store.get(WORKERS_KEY, Vec::new())
    }

    pub fn worker(&self, worker_id: i64) -> Result<Worker> {
        self.workers()
            .into_iter()
            .find(|worker| worker.id == worker_id)
            .ok_or_else(|| FieldOpsError::NotFound(format!("worker {worker_id}")))
    }

    pub fn carts(&self) -> Vec<Cart> {
        self.store.get(CARTS_KEY, Vec::new())
    }

    // ========================================================================
    // Payout computation
    // ========================================================================

    /// One worker's payout for a day, computed from their completed visible
    /// records under the active season's policy.
    pub fn payout_for_worker(&self, worker_id: i64, day: NaiveDate) -> Result<WorkerPayout> {
        self.worker(worker_id)?;
        Ok(self.computed_payout(worker_id, day))
    }

    /// A cart's payout for a day: every member computed individually, then
    /// the already-divided member results summed. Summing after the
    /// per-member division is the contract — it is not the same number as
    /// dividing a combined sum once rounding is involved.
    pub fn payout_for_cart(&self, cart_id: i64, day: NaiveDate) -> Result<CartPayout> {
        if !self.carts().iter().any(|cart| cart.id == cart_id) {
            return Err(FieldOpsError::NotFound(format!("cart {cart_id}")));
        }

        let members: Vec<WorkerPayout> = self
            .workers()
            .iter()
            .filter(|worker| worker.cart_id == Some(cart_id))
            .map(|worker| self.computed_payout(worker.id, day))
            .collect();

        if members.is_empty() {
            warn!(cart_id, "cart has no members, payout is zero");
        }

        Ok(CartPayout {
            cart_id,
            gross_sales: members.iter().map(|member| member.gross_sales).sum(),
            net_sales: members.iter().map(|member| member.net_sales).sum(),
            equivalent: members.iter().map(|member| member.equivalent).sum(),
            members,
        })
    }

    fn computed_payout(&self, worker_id: i64, day: NaiveDate) -> WorkerPayout {
        let records: Vec<_> = self
            .bookings
            .get_for_worker(worker_id)
            .into_iter()
            .filter(|record| record.completed_on(day))
            .collect();

        let policy = self.active_policy();
        let menus: Vec<UpsellMenu> = self.store.get(UPSELL_MENUS_KEY, Vec::new());
        let breakdown = compute_equivalent(&records, &policy, self.active_is_team(), &menus);

        WorkerPayout {
            worker_id,
            gross_sales: gross_sales(&records),
            net_sales: breakdown.net_sales,
            equivalent: breakdown.equivalent,
        }
    }

    fn active_policy(&self) -> PayoutPolicy {
        match self.bookings.active_storage_key() {
            Some(key) => self.store.get(&payout_policy_key(&key), PayoutPolicy::default()),
            None => {
                warn!("no active season, payout runs with an empty policy");
                PayoutPolicy::default()
            }
        }
    }

    fn active_is_team(&self) -> bool {
        self.bookings
            .active_storage_key()
            .as_deref()
            .and_then(SeasonDescriptor::by_storage_key)
            .is_some_and(SeasonDescriptor::is_team)
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    /// Finalizes a worker's day: appends an immutable history entry carrying
    /// the computed numbers plus the operator-entered adjustments, snapshots
    /// the worker's daily derived fields, and persists the roster.
    pub fn finalize_worker(
        &self,
        worker_id: i64,
        day: NaiveDate,
        adjustments: PayoutAdjustments,
    ) -> Result<PayoutRecord> {
        let payout = self.payout_for_worker(worker_id, day)?;
        let entry = PayoutRecord {
            id: Uuid::new_v4(),
            date: day,
            gross_sales: payout.gross_sales,
            equivalent: payout.equivalent,
            commission: adjustments.commission,
            deductions: adjustments.deductions,
            bonuses: adjustments.bonuses,
        };

        let mut workers = self.workers();
        let Some(worker) = workers.iter_mut().find(|worker| worker.id == worker_id) else {
            return Err(FieldOpsError::NotFound(format!("worker {worker_id}")));
        };
        worker.gross_sales = payout.gross_sales;
        worker.equivalent = payout.equivalent;
        worker.commission = adjustments.commission;
        worker.history.push(entry);

        self.store.set(WORKERS_KEY, &workers)?;
        info!(worker_id, date = %day, equivalent = %entry.equivalent, "worker payout finalized");
        Ok(entry)
    }

    /// Finalizes every member of a cart with the same adjustments.
    pub fn finalize_cart(
        &self,
        cart_id: i64,
        day: NaiveDate,
        adjustments: PayoutAdjustments,
    ) -> Result<Vec<PayoutRecord>> {
        if !self.carts().iter().any(|cart| cart.id == cart_id) {
            return Err(FieldOpsError::NotFound(format!("cart {cart_id}")));
        }

        let member_ids: Vec<i64> = self
            .workers()
            .iter()
            .filter(|worker| worker.cart_id == Some(cart_id))
            .map(|worker| worker.id)
            .collect();

        member_ids
            .into_iter()
            .map(|worker_id| self.finalize_worker(worker_id, day, adjustments))
            .collect()
    }

    /// Start-of-day reset: zeroes every worker's daily derived fields and
    /// persists the roster. History is untouched.
    pub fn reset_day(&self) -> Result<()> {
        let mut workers = self.workers();
        for worker in &mut workers {
            worker.reset_daily();
        }

        self.store.set(WORKERS_KEY, &workers)?;
        info!(count = workers.len(), "daily payout fields reset");
        Ok(())
    }
}
