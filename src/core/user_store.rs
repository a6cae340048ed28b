//! In-memory user list with write-through persistence
//!
//! The store owns the authoritative list of users. Every mutation rewrites the
//! whole `users` snapshot in durable storage before returning, so the
//! in-memory list and the snapshot stay equal. Write failures are logged and
//! never undo the in-memory change.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use super::seed::{SeedError, SeedSource};
use crate::data::{keys, read_json, write_json, NewUser, StateStorage, UserRecord};

/// Banner text shown when the first-run seed could not be fetched
pub const LOAD_ERROR_MESSAGE: &str = "Could not load users. Please try again later.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("User list is still loading")]
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// Bootstrap has not finished; the list may still be replaced by a seed
    Loading,
    Ready,
}

/// Outcome of reading the persisted snapshot at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// A non-empty snapshot was adopted
    Restored,
    /// Nothing usable was stored; the caller should fetch a seed
    NeedsSeed,
}

/// Hands out identifiers that are unique within the current set.
///
/// Ids start from the wall clock in milliseconds but never repeat or fall
/// below an id already in use, so rapid successive adds stay distinct.
/// Once `i64::MAX` is taken, the smallest free positive id is used instead.
#[derive(Debug, Default)]
struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    fn next(&mut self, existing: &[UserRecord]) -> i64 {
        let highest = existing.iter().map(|u| u.id).max().unwrap_or(0);
        match self.last.max(highest).checked_add(1) {
            Some(floor) => {
                let id = Utc::now().timestamp_millis().max(floor);
                self.last = id;
                id
            }
            None => smallest_unused_id(existing),
        }
    }
}

fn smallest_unused_id(existing: &[UserRecord]) -> i64 {
    let used: HashSet<i64> = existing.iter().map(|u| u.id).collect();
    // At most `used.len()` candidates are taken, so this always finds one
    (1..=i64::MAX)
        .find(|id| !used.contains(id))
        .unwrap_or_default()
}

pub struct UserStore {
    storage: Arc<dyn StateStorage>,
    users: Vec<UserRecord>,
    status: StoreStatus,
    error: Option<String>,
    ids: IdGenerator,
}

impl UserStore {
    /// Create an empty store in the loading state
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        Self {
            storage,
            users: Vec::new(),
            status: StoreStatus::Loading,
            error: None,
            ids: IdGenerator::default(),
        }
    }

    /// One-time bootstrap: adopt the persisted snapshot, or fetch and adopt a seed.
    ///
    /// Never fails; a failed fetch leaves the list empty with [`Self::error`] set.
    pub async fn initialize(&mut self, seed: &dyn SeedSource) {
        if self.restore() == Bootstrap::NeedsSeed {
            let result = seed.fetch().await;
            self.apply_seed(result);
        }
    }

    /// Read the persisted snapshot and adopt it if it holds any users
    pub fn restore(&mut self) -> Bootstrap {
        match read_json::<Vec<UserRecord>>(self.storage.as_ref(), keys::USERS) {
            Ok(Some(users)) if !users.is_empty() => {
                self.users = dedupe_ids(users);
                self.status = StoreStatus::Ready;
                self.error = None;
                tracing::info!(count = self.users.len(), "Restored users from storage");
                Bootstrap::Restored
            }
            Ok(_) => Bootstrap::NeedsSeed,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable users snapshot");
                Bootstrap::NeedsSeed
            }
        }
    }

    /// Finish bootstrap with the result of a seed fetch
    pub fn apply_seed(&mut self, result: Result<Vec<UserRecord>, SeedError>) {
        match result {
            Ok(users) => {
                self.users = dedupe_ids(users);
                self.error = None;
                self.persist();
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading users");
                self.users.clear();
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        self.status = StoreStatus::Ready;
    }

    /// Store a new user under a freshly assigned id.
    ///
    /// Rejected only while bootstrap is pending, since a late seed would
    /// replace the list.
    pub fn add(&mut self, user: NewUser) -> Result<UserRecord, StoreError> {
        if self.status == StoreStatus::Loading {
            return Err(StoreError::Loading);
        }

        let id = self.ids.next(&self.users);
        let record = user.with_id(id);
        self.users.push(record.clone());
        self.persist();

        tracing::info!(id, "Added user");
        Ok(record)
    }

    /// Remove the user with `id`; returns whether one was removed
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        let removed = self.users.len() != before;
        self.persist();

        if removed {
            tracing::info!(id, "Deleted user");
        } else {
            tracing::debug!(id, "Delete ignored, no such user");
        }
        removed
    }

    /// Rewrite the full snapshot; failures are logged only
    pub fn persist(&self) {
        if let Err(e) = write_json(self.storage.as_ref(), keys::USERS, &self.users) {
            tracing::error!(error = %e, "Failed to save users");
        }
    }

    /// Users whose name or city contains `term`, ignoring case
    pub fn search(&self, term: &str) -> Vec<&UserRecord> {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return self.users.iter().collect();
        }
        self.users.iter().filter(|u| u.matches(&needle)).collect()
    }

    pub fn get(&self, id: i64) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn status(&self) -> StoreStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == StoreStatus::Loading
    }

    /// Bootstrap error banner text, if the seed fetch failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("users", &self.users.len())
            .field("status", &self.status)
            .field("error", &self.error)
            .finish()
    }
}

/// Keep the first record for each id
fn dedupe_ids(users: Vec<UserRecord>) -> Vec<UserRecord> {
    let mut seen = HashSet::new();
    let total = users.len();
    let unique: Vec<UserRecord> = users.into_iter().filter(|u| seen.insert(u.id)).collect();
    if unique.len() != total {
        tracing::warn!(
            dropped = total - unique.len(),
            "Dropped users with duplicate ids"
        );
    }
    unique
}
