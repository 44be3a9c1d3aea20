//! SQLite-backed key/value persistence.
//!
//! The whole persisted state is three independently serialized JSON blobs in
//! a single `kv` table: the task collection, the sync-phase flag, and the
//! study-plan range. Blobs are rewritten wholesale on every mutation and
//! re-read once at startup; a corrupt blob deserializes to its default value
//! rather than failing startup.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::error::StorageError;
use crate::scheduling::StudyPlanConfig;

/// Key under which the serialized task collection is stored.
pub const TASKS_KEY: &str = "studyhouse_tasks";
/// Key for the boolean sync-phase flag.
pub const SYNC_PHASE_KEY: &str = "studyhouse_sync_phase";
/// Key for the study-plan date range.
pub const PLAN_CONFIG_KEY: &str = "studyhouse_plan_config";

/// SQLite database holding the application's key/value state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/studyhouse/studyhouse.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("studyhouse.db");
        Self::open_at(path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests and ephemeral runs).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Load the study-plan range; missing or corrupt blobs yield the
    /// unconfigured default.
    pub fn load_plan_config(&self) -> StudyPlanConfig {
        self.load_blob_or_default(PLAN_CONFIG_KEY)
    }

    pub fn save_plan_config(&self, config: &StudyPlanConfig) -> crate::error::Result<()> {
        let json = serde_json::to_string(config)?;
        self.kv_set(PLAN_CONFIG_KEY, &json)?;
        Ok(())
    }

    /// Load the sync-phase flag; defaults to true (still syncing).
    pub fn load_sync_phase(&self) -> bool {
        match self.kv_get(SYNC_PHASE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(key = SYNC_PHASE_KEY, error = %err, "discarding corrupt blob");
                true
            }),
            Ok(None) => true,
            Err(err) => {
                tracing::warn!(key = SYNC_PHASE_KEY, error = %err, "failed to read blob");
                true
            }
        }
    }

    pub fn save_sync_phase(&self, syncing: bool) -> Result<(), StorageError> {
        self.kv_set(SYNC_PHASE_KEY, if syncing { "true" } else { "false" })
    }

    fn load_blob_or_default<T: Default + serde::de::DeserializeOwned>(&self, key: &str) -> T {
        match self.kv_get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(key, error = %err, "discarding corrupt blob");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read blob");
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn kv_round_trip() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("missing").unwrap(), None);

        db.kv_set("k", "v1").unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v1"));

        db.kv_set("k", "v2").unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v2"));

        db.kv_delete("k").unwrap();
        assert_eq!(db.kv_get("k").unwrap(), None);
    }

    #[test]
    fn plan_config_round_trip() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.load_plan_config(), StudyPlanConfig::default());

        let config = StudyPlanConfig::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        );
        db.save_plan_config(&config).unwrap();
        assert_eq!(db.load_plan_config(), config);
    }

    #[test]
    fn corrupt_plan_config_falls_back_to_default() {
        let db = Database::open_memory().unwrap();
        db.kv_set(PLAN_CONFIG_KEY, "{not json").unwrap();
        assert_eq!(db.load_plan_config(), StudyPlanConfig::default());
    }

    #[test]
    fn sync_phase_defaults_to_true() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_sync_phase());

        db.save_sync_phase(false).unwrap();
        assert!(!db.load_sync_phase());

        db.kv_set(SYNC_PHASE_KEY, "garbage").unwrap();
        assert!(db.load_sync_phase());
    }

    #[test]
    fn open_at_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studyhouse.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.kv_set("k", "survives").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("survives"));
    }
}
