//! Shared test helpers for `fieldops-core` integration tests.
//!
//! Provides an in-memory store double wired to a real event bus, plus
//! fixture builders, so tests can focus on repository and payroll
//! behaviour instead of setup boilerplate.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fieldops_core::store::{KeyValueStore, StoreEvent, StoreEventBus, StoreExt};
use fieldops_core::BookingService;
use fieldops_domain::constants::{
    ACTIVE_PROFILE_KEY, ACTIVE_SEASON_KEY, TERRITORY_ASSIGNMENTS_KEY,
};
use fieldops_domain::{BookingDraft, BookingRecord, Result, TerritoryAssignments};
use parking_lot::RwLock;

/// In-memory store double following the production adapter contract:
/// publish after the write lands, after the internal lock is released.
pub struct MockStore {
    entries: RwLock<BTreeMap<String, String>>,
    bus: Arc<StoreEventBus>,
}

impl MockStore {
    pub fn new(bus: Arc<StoreEventBus>) -> Self {
        Self { entries: RwLock::new(BTreeMap::new()), bus }
    }
}

impl KeyValueStore for MockStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_raw(&self, key: &str, json: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), json.to_string());
        self.bus.publish(&StoreEvent { key: key.to_string() });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        self.bus.publish(&StoreEvent { key: key.to_string() });
        Ok(())
    }
}

/// One wired execution context: bus, store, subscribed booking service.
pub struct TestSession {
    pub bus: Arc<StoreEventBus>,
    pub store: Arc<dyn KeyValueStore>,
    pub bookings: Arc<BookingService>,
}

pub fn session() -> TestSession {
    let bus = Arc::new(StoreEventBus::new());
    let store: Arc<dyn KeyValueStore> = Arc::new(MockStore::new(bus.clone()));
    let bookings = Arc::new(BookingService::new(store.clone()));
    bus.subscribe(Arc::downgrade(&bookings));
    TestSession { bus, store, bookings }
}

/// A second service instance over an existing store/bus pair — another
/// open session sharing the same persisted key space. Runs its initial
/// sync the way a freshly opened session would.
pub fn join_session(existing: &TestSession) -> Arc<BookingService> {
    let bookings = Arc::new(BookingService::new(existing.store.clone()));
    existing.bus.subscribe(Arc::downgrade(&bookings));
    bookings.resync();
    bookings
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).expect("valid test date")
}

pub fn at_noon(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).expect("valid time"))
}

pub fn booking(id: &str, map: &str, route: &str, worker_id: Option<i64>) -> BookingRecord {
    BookingRecord::normalize(
        BookingDraft {
            map: Some(map.to_string()),
            route: Some(route.to_string()),
            worker_id,
            ..Default::default()
        },
        id,
    )
}

pub fn completed_booking(
    id: &str,
    map: &str,
    worker_id: Option<i64>,
    price: &str,
    payment_method: &str,
    date: NaiveDate,
) -> BookingRecord {
    BookingRecord::normalize(
        BookingDraft {
            map: Some(map.to_string()),
            worker_id,
            price: Some(price.to_string()),
            payment_method: Some(payment_method.to_string()),
            completed: Some(true),
            completed_at: Some(at_noon(date)),
            ..Default::default()
        },
        id,
    )
}

pub fn upsell_booking(
    id: &str,
    map: &str,
    worker_id: Option<i64>,
    price: &str,
    menu_id: Option<&str>,
    date: NaiveDate,
) -> BookingRecord {
    BookingRecord::normalize(
        BookingDraft {
            map: Some(map.to_string()),
            worker_id,
            price: Some(price.to_string()),
            is_upsell: Some(true),
            upsell_menu_id: menu_id.map(str::to_string),
            completed: Some(true),
            completed_at: Some(at_noon(date)),
            ..Default::default()
        },
        id,
    )
}

pub fn assignments(entries: &[(&str, &[i64])]) -> TerritoryAssignments {
    entries.iter().map(|(map, profiles)| (map.to_string(), profiles.to_vec())).collect()
}

// ============================================================================
// Store seeding (each write fans out through the bus, exactly like a
// foreign session writing the shared store)
// ============================================================================

pub fn seed_active_season(store: &Arc<dyn KeyValueStore>, season_id: &str) {
    store.set(ACTIVE_SEASON_KEY, &season_id).expect("seed active season");
}

pub fn seed_operator(store: &Arc<dyn KeyValueStore>, profile_id: i64) {
    store.set(ACTIVE_PROFILE_KEY, &profile_id).expect("seed operator pointer");
}

pub fn seed_assignments(store: &Arc<dyn KeyValueStore>, table: &TerritoryAssignments) {
    store.set(TERRITORY_ASSIGNMENTS_KEY, table).expect("seed territory assignments");
}

pub fn seed_collection(
    store: &Arc<dyn KeyValueStore>,
    storage_key: &str,
    records: &[BookingRecord],
) {
    store.set(storage_key, &records).expect("seed season collection");
}
