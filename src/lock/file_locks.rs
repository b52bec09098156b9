use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};

lazy_static! {
    static ref GLOBAL: Arc<FileLocks> = Arc::new(FileLocks::new());
}

/// Table of per-location mutexes.
///
/// Locations are compared as strings; stores are expected to hand out a
/// normalized location (see `JsonFileStore`). Entries are created lazily and
/// never evicted.
#[derive(Default)]
pub struct FileLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FileLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table. Every repository built with
    /// `UserRepository::new` shares it.
    pub fn global() -> Arc<FileLocks> {
        GLOBAL.clone()
    }

    /// Block until the lock for `location` is held.
    pub fn acquire(&self, location: &str) -> LockGuard {
        let lock = self.lock_for(location);
        let held = match lock.try_lock_arc() {
            Some(held) => held,
            None => {
                tracing::debug!(location, "waiting for file lock");
                lock.lock_arc()
            }
        };
        LockGuard { _held: held }
    }

    fn lock_for(&self, location: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(location.to_string())
            .or_default()
            .clone()
    }

    #[cfg(test)]
    fn is_held(&self, location: &str) -> bool {
        self.lock_for(location).is_locked()
    }
}

/// Scoped hold on one location's lock. Owns the mutex through an `Arc`, so
/// it borrows nothing and can live across a whole repository call; released
/// on drop, including on early `?` returns.
pub struct LockGuard {
    _held: ArcMutexGuard<RawMutex, ()>,
}
