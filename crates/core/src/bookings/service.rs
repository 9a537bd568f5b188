//! Booking repository service

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fieldops_domain::constants::{
    ACTIVE_PROFILE_KEY, ACTIVE_SEASON_KEY, BOOKING_ID_SUFFIX_LEN, ROUTE_ASSIGNMENTS_KEY,
    TERRITORY_ASSIGNMENTS_KEY,
};
use fieldops_domain::{
    BookingDraft, BookingRecord, FieldOpsError, Result, RouteAssignments, SeasonDescriptor,
    TerritoryAssignments,
};
use parking_lot::RwLock;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{debug, info, warn};

use super::invalidation::{classify_store_key, InvalidationAction};
use crate::store::{KeyValueStore, StoreEvent, StoreExt, StoreObserver};
use crate::territory::visible_maps;

/// Repository lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryPhase {
    Uninitialized,
    Loading,
    Ready,
}

struct RepositoryState {
    raw_records: Vec<BookingRecord>,
    filtered_records: Vec<BookingRecord>,
    active_storage_key: Option<String>,
    operator_profile_id: Option<i64>,
    territory_assignments: TerritoryAssignments,
    phase: RepositoryPhase,
}

impl Default for RepositoryState {
    fn default() -> Self {
        Self {
            raw_records: Vec::new(),
            filtered_records: Vec::new(),
            active_storage_key: None,
            operator_profile_id: None,
            territory_assignments: TerritoryAssignments::new(),
            phase: RepositoryPhase::Uninitialized,
        }
    }
}

/// Season-scoped, territory-filtered booking repository.
///
/// Owns the raw record lifecycle for the active season and the
/// operator-scoped filtered view derived from it. Subscribed to the store
/// event bus, it reacts to foreign writes (other sessions sharing the same
/// store) by reloading or refiltering as the written key demands.
///
/// The interior lock exists for shared ownership, not coordination, and is
/// never held across a store write: writes fan out notifications
/// synchronously, so the service's own observer callback re-enters it.
pub struct BookingService {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<RepositoryState>,
    id_counter: AtomicU64,
}

impl BookingService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, state: RwLock::new(RepositoryState::default()), id_counter: AtomicU64::new(0) }
    }

    // ========================================================================
    // Synchronization
    // ========================================================================

    /// Reloads the raw collection for the active season, then refilters.
    ///
    /// Fails soft when the active-season pointer is missing or does not
    /// resolve to a known season: that is a recoverable configuration state
    /// (startup, mid-switch), so the repository logs a warning and serves
    /// empty views until the pointer is corrected. Idempotent: a second call
    /// with no external change lands in the same state.
    pub fn resync(&self) {
        self.state.write().phase = RepositoryPhase::Loading;

        let season_id = self.store.get::<Option<String>>(ACTIVE_SEASON_KEY, None);
        let descriptor = match season_id.as_deref() {
            None => {
                warn!("no active season pointer, serving an empty collection");
                None
            }
            Some(id) => {
                let descriptor = SeasonDescriptor::by_id(id);
                if descriptor.is_none() {
                    warn!(season_id = %id, "active season does not resolve to a known season, serving an empty collection");
                }
                descriptor
            }
        };

        let (active_storage_key, raw_records) = match descriptor {
            Some(descriptor) => {
                let records =
                    self.store.get::<Vec<BookingRecord>>(descriptor.storage_key, Vec::new());
                debug!(
                    storage_key = descriptor.storage_key,
                    count = records.len(),
                    "season collection loaded"
                );
                (Some(descriptor.storage_key.to_string()), records)
            }
            None => (None, Vec::new()),
        };

        {
            let mut state = self.state.write();
            state.active_storage_key = active_storage_key;
            state.raw_records = raw_records;
        }

        self.refilter();
    }

    /// Recomputes the filtered view from the current raw records.
    ///
    /// Re-resolves only the visibility inputs (operator pointer, territory
    /// assignments) from the store — never the raw collection, which is the
    /// whole point of the cheaper invalidation tier. With no operator
    /// resolved the view is empty: fail closed, not open.
    pub fn refilter(&self) {
        let operator_profile_id = self.store.get::<Option<i64>>(ACTIVE_PROFILE_KEY, None);
        let territory_assignments =
            self.store.get::<TerritoryAssignments>(TERRITORY_ASSIGNMENTS_KEY, TerritoryAssignments::new());

        let visible = visible_maps(&territory_assignments, operator_profile_id);

        let mut state = self.state.write();
        state.filtered_records = state
            .raw_records
            .iter()
            .filter(|record| visible.contains(record.map.as_str()))
            .cloned()
            .collect();
        state.operator_profile_id = operator_profile_id;
        state.territory_assignments = territory_assignments;
        state.phase = RepositoryPhase::Ready;

        debug!(
            operator = ?operator_profile_id,
            visible_maps = visible.len(),
            filtered = state.filtered_records.len(),
            "filtered view recomputed"
        );
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// All records visible to the current operator.
    pub fn get_all(&self) -> Vec<BookingRecord> {
        self.state.read().filtered_records.clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<BookingRecord> {
        self.state.read().filtered_records.iter().find(|record| record.id == id).cloned()
    }

    /// Visible records belonging to a worker. A record's direct assignment
    /// wins; only records with no direct assignment fall back to the
    /// route→worker table, which is read fresh from the store per call.
    pub fn get_for_worker(&self, worker_id: i64) -> Vec<BookingRecord> {
        let route_assignments =
            self.store.get::<RouteAssignments>(ROUTE_ASSIGNMENTS_KEY, RouteAssignments::new());

        self.state
            .read()
            .filtered_records
            .iter()
            .filter(|record| match record.worker_id {
                Some(direct) => direct == worker_id,
                None => route_assignments.get(record.route.as_str()) == Some(&worker_id),
            })
            .cloned()
            .collect()
    }

    pub fn phase(&self) -> RepositoryPhase {
        self.state.read().phase
    }

    pub fn active_storage_key(&self) -> Option<String> {
        self.state.read().active_storage_key.clone()
    }

    pub fn operator_profile_id(&self) -> Option<i64> {
        self.state.read().operator_profile_id
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Applies a draft to one raw record, persists the collection, and
    /// refilters.
    ///
    /// An unknown id is a logged no-op rather than an error: callers race
    /// with concurrent deletions and season switches, and losing that race
    /// must not abort their flow.
    pub fn update(&self, id: &str, draft: &BookingDraft) -> Result<()> {
        let persist = {
            let mut state = self.state.write();
            let Some(record) = state.raw_records.iter_mut().find(|record| record.id == id) else {
                warn!(booking_id = %id, "update for unknown booking id, ignoring");
                return Ok(());
            };
            record.apply_draft(draft);
            state.active_storage_key.clone().map(|key| (key, state.raw_records.clone()))
        };

        let Some((storage_key, records)) = persist else {
            // Raw records only ever exist under a resolved key; guard anyway.
            return Err(FieldOpsError::Internal(
                "booking present without an active storage key".to_string(),
            ));
        };

        self.store.set(&storage_key, &records)?;
        self.refilter();
        debug!(booking_id = %id, "booking updated");
        Ok(())
    }

    /// Creates a record from a draft, persists it, and refilters.
    ///
    /// Unlike `update`, calling this with no active storage key is an error:
    /// it means the caller ran ahead of initialization, which has to be
    /// fixed at the call site rather than papered over.
    pub fn add(&self, draft: BookingDraft) -> Result<BookingRecord> {
        let Some(storage_key) = self.state.read().active_storage_key.clone() else {
            return Err(FieldOpsError::Config(
                "cannot add a booking without an active season".to_string(),
            ));
        };

        let id = self.next_booking_id(&storage_key);
        let record = BookingRecord::normalize(draft, id);

        let records = {
            let mut state = self.state.write();
            state.raw_records.push(record.clone());
            state.raw_records.clone()
        };

        self.store.set(&storage_key, &records)?;
        self.refilter();
        info!(booking_id = %record.id, storage_key = %storage_key, "booking added");
        Ok(record)
    }

    /// Bulk-overwrites one season's persisted collection.
    ///
    /// The key must belong to the season table — bulk import must not be
    /// able to clobber auxiliary keys. When the key is the active one, the
    /// in-memory collection is replaced as well and the view refiltered.
    pub fn replace_all_for_key(&self, records: Vec<BookingRecord>, key: &str) -> Result<()> {
        if SeasonDescriptor::by_storage_key(key).is_none() {
            return Err(FieldOpsError::InvalidInput(format!("unknown season storage key: {key}")));
        }

        let count = records.len();
        self.store.set(key, &records)?;

        let is_active = self.state.read().active_storage_key.as_deref() == Some(key);
        if is_active {
            self.state.write().raw_records = records;
            self.refilter();
        }

        info!(storage_key = %key, count, is_active, "season collection replaced");
        Ok(())
    }

    /// Collision-resistant booking id: season key prefix, monotonic
    /// counter, random suffix. Wall-clock time alone would collide across
    /// sessions importing at the same moment.
    fn next_booking_id(&self, storage_key: &str) -> String {
        let sequence = self.id_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(BOOKING_ID_SUFFIX_LEN)
            .map(char::from)
            .collect();
        format!("{storage_key}-{sequence}-{suffix}")
    }

    // ========================================================================
    // Invalidation
    // ========================================================================

    /// Observer entry point: routes a written key through the dispatch
    /// table. Also re-entered for this service's own writes (the bus echoes
    /// to the writer), which is harmless because resync and refilter are
    /// idempotent.
    pub fn handle_store_event(&self, key: &str) {
        let active = self.active_storage_key();
        match classify_store_key(key, active.as_deref()) {
            InvalidationAction::Resync => {
                debug!(key, "store change invalidates raw records, resyncing");
                self.resync();
            }
            InvalidationAction::Refilter => {
                debug!(key, "store change invalidates visibility, refiltering");
                self.refilter();
            }
            InvalidationAction::Ignore => {}
        }
    }
}

impl StoreObserver for BookingService {
    fn on_store_event(&self, event: &StoreEvent) {
        self.handle_store_event(&event.key);
    }
}
