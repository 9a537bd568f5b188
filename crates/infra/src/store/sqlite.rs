//! SQLite-backed store adapter.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use fieldops_core::store::{KeyValueStore, StoreEvent, StoreEventBus};
use fieldops_domain::{FieldOpsError, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::info;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Durable `KeyValueStore` over a pooled SQLite database.
///
/// One `kv_store` table, one row per key, JSON payloads. Notifications go
/// out after the write has committed and the connection has returned to
/// the pool, so an observer re-entering the store never contends with the
/// writing connection.
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
    bus: Arc<StoreEventBus>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open<P: AsRef<Path>>(path: P, pool_size: u32, bus: Arc<StoreEventBus>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // WAL for cross-session concurrency, NORMAL sync for balance,
        // busy timeout so parallel sessions wait instead of failing.
        let manager = SqliteConnectionManager::file(&path).with_init(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;\n\
                 PRAGMA synchronous=NORMAL;\n\
                 PRAGMA foreign_keys=ON;",
            )?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)
            .map_err(map_pool_error)?;

        let store = Self { pool, path, bus };
        store.run_migrations()?;

        info!(
            db_path = %store.path.display(),
            max_connections = pool_size.max(1),
            "sqlite store opened"
        );
        Ok(store)
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a connection and execute a liveness query.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0))
            .map_err(map_sql_error)?;
        Ok(())
    }

    /// Ensure the full schema exists on the current database.
    fn run_migrations(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at)
             VALUES (?1, CAST(strftime('%s','now') AS INTEGER))",
            params![SCHEMA_VERSION],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }

    fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(map_pool_error)
    }
}

impl KeyValueStore for SqliteStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connection()?;
        match conn.query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| {
            row.get::<_, String>(0)
        }) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(map_sql_error(err)),
        }
    }

    fn set_raw(&self, key: &str, json: &str) -> Result<()> {
        {
            let conn = self.connection()?;
            // Upsert pattern (SQLite 3.24.0+)
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, CAST(strftime('%s','now') AS INTEGER))
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, json],
            )
            .map_err(map_sql_error)?;
        }
        self.bus.publish(&StoreEvent { key: key.to_string() });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        {
            let conn = self.connection()?;
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
                .map_err(map_sql_error)?;
        }
        self.bus.publish(&StoreEvent { key: key.to_string() });
        Ok(())
    }
}

fn map_sql_error(err: rusqlite::Error) -> FieldOpsError {
    FieldOpsError::Database(err.to_string())
}

fn map_pool_error(err: r2d2::Error) -> FieldOpsError {
    FieldOpsError::Database(err.to_string())
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use tempfile::TempDir;

    use super::*;

    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    impl fieldops_core::store::StoreObserver for Recorder {
        fn on_store_event(&self, event: &StoreEvent) {
            self.seen.lock().push(event.key.clone());
        }
    }

    fn open_store(dir: &TempDir) -> SqliteStore {
        SqliteStore::open(dir.path().join("test.db"), 4, Arc::new(StoreEventBus::new()))
            .expect("store opened")
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = TempDir::new().expect("temp dir created");
        let store = open_store(&dir);

        store.set_raw("greeting", r#""hello""#).expect("set");

        assert_eq!(store.get_raw("greeting").expect("get"), Some(r#""hello""#.to_string()));
        assert_eq!(store.get_raw("absent").expect("get"), None);
    }

    #[test]
    fn set_overwrites_an_existing_key() {
        let dir = TempDir::new().expect("temp dir created");
        let store = open_store(&dir);

        store.set_raw("counter", "1").expect("set");
        store.set_raw("counter", "2").expect("overwrite");

        assert_eq!(store.get_raw("counter").expect("get"), Some("2".to_string()));
    }

    #[test]
    fn remove_clears_the_key() {
        let dir = TempDir::new().expect("temp dir created");
        let store = open_store(&dir);
        store.set_raw("greeting", r#""hello""#).expect("set");

        store.remove("greeting").expect("remove");

        assert_eq!(store.get_raw("greeting").expect("get"), None);
    }

    #[test]
    fn values_survive_a_reopen() {
        let dir = TempDir::new().expect("temp dir created");
        let path = dir.path().join("test.db");

        {
            let store = SqliteStore::open(&path, 2, Arc::new(StoreEventBus::new()))
                .expect("store opened");
            store.set_raw("persisted", "true").expect("set");
        }

        let reopened =
            SqliteStore::open(&path, 2, Arc::new(StoreEventBus::new())).expect("store reopened");
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.get_raw("persisted").expect("get"), Some("true".to_string()));
    }

    #[test]
    fn writes_notify_the_bus() {
        let dir = TempDir::new().expect("temp dir created");
        let bus = Arc::new(StoreEventBus::new());
        let recorder = Arc::new(Recorder { seen: Mutex::new(Vec::new()) });
        bus.subscribe(Arc::downgrade(&recorder));
        let store =
            SqliteStore::open(dir.path().join("test.db"), 4, bus).expect("store opened");

        store.set_raw("a", "1").expect("set");
        store.remove("a").expect("remove");

        assert_eq!(*recorder.seen.lock(), vec!["a".to_string(), "a".to_string()]);
    }

    #[test]
    fn health_check_succeeds_for_valid_database() {
        let dir = TempDir::new().expect("temp dir created");
        let store = open_store(&dir);

        store.health_check().expect("health check passed");
    }
}
