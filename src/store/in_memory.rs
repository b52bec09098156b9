//! InMemoryRecordStore - Vec-backed record store for testing and development.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use super::{RecordStore, StoreError};
use crate::user::User;

static NEXT_STORE: AtomicUsize = AtomicUsize::new(1);

/// In-memory record store.
///
/// Clone-friendly via `Arc`; clones share the same collection and the same
/// location, hence the same guard. Separately constructed stores get
/// distinct locations.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    location: Arc<str>,
    users: Arc<RwLock<Vec<User>>>,
    saves: Arc<AtomicUsize>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Start from an existing collection.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            location: Arc::from(format!(
                "memory:users:{}",
                NEXT_STORE.fetch_add(1, Ordering::Relaxed)
            )),
            users: Arc::new(RwLock::new(users)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of completed saves.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn location(&self) -> &str {
        &self.location
    }

    fn load(&self) -> Result<Vec<User>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::Poisoned("load"))?;
        Ok(users.clone())
    }

    fn save(&self, users: &[User]) -> Result<(), StoreError> {
        let mut stored = self
            .users
            .write()
            .map_err(|_| StoreError::Poisoned("save"))?;
        *stored = users.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
