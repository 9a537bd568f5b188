//! Application context - dependency injection container

use std::sync::Arc;

use fieldops_core::store::{KeyValueStore, StoreEventBus};
use fieldops_core::{BookingService, PayrollService};
use fieldops_domain::{AppConfig, Result};
use fieldops_infra::{MemoryStore, SqliteStore};
use tracing::info;

/// Application context - holds all services and dependencies.
///
/// One context is one session: it owns the store handle, the event bus,
/// and the services subscribed to it. Several contexts sharing a store and
/// bus behave like several open sessions over the same data.
pub struct AppContext {
    pub config: AppConfig,
    pub bus: Arc<StoreEventBus>,
    pub store: Arc<dyn KeyValueStore>,
    pub bookings: Arc<BookingService>,
    pub payroll: Arc<PayrollService>,
}

impl AppContext {
    /// Build a context over the durable SQLite store at the configured
    /// path, ensure the schema, and run the repository's initial sync.
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let bus = Arc::new(StoreEventBus::new());
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(
            &config.database.path,
            config.database.pool_size,
            bus.clone(),
        )?);
        Ok(Self::wire(config, bus, store))
    }

    /// Build a context over a volatile in-memory store (tests, previews).
    pub fn initialize_in_memory() -> Self {
        let bus = Arc::new(StoreEventBus::new());
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new(bus.clone()));
        Self::wire(AppConfig::default(), bus, store)
    }

    fn wire(config: AppConfig, bus: Arc<StoreEventBus>, store: Arc<dyn KeyValueStore>) -> Self {
        let bookings = Arc::new(BookingService::new(store.clone()));
        bus.subscribe(Arc::downgrade(&bookings));

        let payroll = Arc::new(PayrollService::new(store.clone(), bookings.clone()));

        // Initial sync so the repository serves the active season right away
        bookings.resync();

        info!(log_level = %config.log_level, "application context initialized");
        Self { config, bus, store, bookings, payroll }
    }
}
