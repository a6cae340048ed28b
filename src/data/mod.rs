//! Data persistence layer
//!
//! SQLite-backed key-value storage plus the record types kept in it.

mod app_state;
mod database;
mod migrations;
mod models;

pub use app_state::{keys, read_json, write_json, AppStateStore, StateStorage, StorageError};
pub use database::{Database, DatabaseError};
pub use models::{Address, NewUser, UserRecord};
