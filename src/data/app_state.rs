//! App state data access object (key-value store)
//!
//! Every piece of durable client state lives under a string key holding a
//! JSON (or plain string) value. The store, the add-user draft and the theme
//! preference each own a distinct key and never touch the others.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Well-known storage keys
pub mod keys {
    /// JSON array of user records
    pub const USERS: &str = "users";
    /// JSON object holding the add-user draft
    pub const USER_FORM_DATA: &str = "userFormData";
    /// Literal `light` or `dark`
    pub const THEME: &str = "theme";
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Lock poisoned")]
    LockPoisoned,
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value storage
pub trait StateStorage: Send + Sync {
    /// Get a value by key
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set a value (insert or update)
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key; missing keys are not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value stored under `key`
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn StateStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`
pub fn write_json<T: Serialize + ?Sized>(
    storage: &dyn StateStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

/// SQLite-backed [`StateStorage`] over the `app_state` table
#[derive(Clone)]
pub struct AppStateStore {
    conn: Arc<Mutex<Connection>>,
}

impl AppStateStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Clear all state
    pub fn clear_all(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        conn.execute("DELETE FROM app_state", [])?;
        Ok(())
    }
}

impl StateStorage for AppStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut stmt = conn.prepare("SELECT value FROM app_state WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        conn.execute("DELETE FROM app_state WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl std::fmt::Debug for AppStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStateStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Database;
    use serde::Deserialize;
    use tempfile::tempdir;

    fn setup_db() -> (tempfile::TempDir, Database, AppStateStore) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();
        let dao = AppStateStore::new(db.connection());
        (dir, db, dao)
    }

    #[test]
    fn test_set_and_get() {
        let (_dir, _db, dao) = setup_db();

        dao.set(keys::THEME, "dark").unwrap();
        assert_eq!(dao.get(keys::THEME).unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_update_is_last_writer_wins() {
        let (_dir, _db, dao) = setup_db();

        dao.set(keys::THEME, "light").unwrap();
        dao.set(keys::THEME, "dark").unwrap();

        assert_eq!(dao.get(keys::THEME).unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_get_nonexistent() {
        let (_dir, _db, dao) = setup_db();
        assert_eq!(dao.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let (_dir, _db, dao) = setup_db();

        dao.set(keys::USER_FORM_DATA, "{}").unwrap();
        dao.remove(keys::USER_FORM_DATA).unwrap();
        dao.remove(keys::USER_FORM_DATA).unwrap();

        assert_eq!(dao.get(keys::USER_FORM_DATA).unwrap(), None);
    }

    #[test]
    fn test_clear_all() {
        let (_dir, _db, dao) = setup_db();

        dao.set(keys::USERS, "[]").unwrap();
        dao.set(keys::THEME, "light").unwrap();
        dao.clear_all().unwrap();

        assert_eq!(dao.get(keys::USERS).unwrap(), None);
        assert_eq!(dao.get(keys::THEME).unwrap(), None);
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        label: String,
        count: u32,
    }

    #[test]
    fn test_json_helpers() {
        let (_dir, _db, dao) = setup_db();
        let sample = Sample {
            label: "x".into(),
            count: 3,
        };

        write_json(&dao, "sample", &sample).unwrap();
        let back: Option<Sample> = read_json(&dao, "sample").unwrap();
        assert_eq!(back, Some(sample));

        let missing: Option<Sample> = read_json(&dao, "missing").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_read_json_reports_malformed_value() {
        let (_dir, _db, dao) = setup_db();
        dao.set("sample", "not json").unwrap();

        let result: Result<Option<Sample>, _> = read_json(&dao, "sample");
        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}
