use std::sync::Arc;

use serde_json::Value;

use super::UserError;
use crate::lock::FileLocks;
use crate::store::RecordStore;
use crate::user::{self, collection, IdPolicy, User};

/// CRUD over the user collection of one [`RecordStore`].
///
/// Every call reloads the whole collection, applies one pure transform and
/// (for mutations) saves the whole collection back, all while holding the
/// store location's lock. Payloads are validated before the lock is taken.
///
/// ## Example
///
/// ```ignore
/// use serde_json::json;
/// use user_store::{JsonFileStore, UserRepository};
///
/// let repo = UserRepository::new(JsonFileStore::new("data/users.json"));
/// let created = repo.create(&json!({ "name": "A", "email": "a@x.com", "address": "Addr" }))?;
/// assert_eq!(repo.get(created.id)?, created);
/// ```
pub struct UserRepository<S> {
    store: S,
    locks: Arc<FileLocks>,
    id_policy: IdPolicy,
}

impl<S: RecordStore> UserRepository<S> {
    /// Repository on the process-wide lock table, so any two repositories
    /// over the same location serialize against each other.
    pub fn new(store: S) -> Self {
        Self::with_locks(store, FileLocks::global())
    }

    /// Repository on a private lock table.
    pub fn with_locks(store: S, locks: Arc<FileLocks>) -> Self {
        Self {
            store,
            locks,
            id_policy: IdPolicy::default(),
        }
    }

    /// Builder: choose how ids of new records are assigned.
    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All users, in stored order.
    pub fn list(&self) -> Result<Vec<User>, UserError> {
        self.guarded(|users| Ok((None, collection::list_all(&users).to_vec())))
    }

    pub fn get(&self, id: u64) -> Result<User, UserError> {
        self.guarded(|users| {
            let user = collection::find_by_id(&users, id)
                .cloned()
                .ok_or(UserError::NotFound(id))?;
            Ok((None, user))
        })
    }

    /// Validate `payload` and append it with a store-assigned id.
    pub fn create(&self, payload: &Value) -> Result<User, UserError> {
        let new_user = user::validate(payload)?;
        let created = self.guarded(|users| {
            let (users, created) = collection::insert(users, new_user, self.id_policy)?;
            Ok((Some(users), created))
        })?;
        tracing::info!(id = created.id, "created user");
        Ok(created)
    }

    /// Validate `payload` and replace name, email and address of user `id`.
    pub fn update(&self, id: u64, payload: &Value) -> Result<User, UserError> {
        let new_user = user::validate(payload)?;
        let updated = self.guarded(|users| {
            let (users, updated) = collection::replace(users, id, new_user)?;
            Ok((Some(users), updated))
        })?;
        tracing::info!(id, "updated user");
        Ok(updated)
    }

    pub fn delete(&self, id: u64) -> Result<(), UserError> {
        self.guarded(|users| Ok((Some(collection::remove_by_id(users, id)?), ())))?;
        tracing::info!(id, "deleted user");
        Ok(())
    }

    /// Run one load→transform→save cycle under the store's lock.
    ///
    /// `op` returns the collection to persist (`None` for reads) and the
    /// value handed back to the caller. Nothing is saved if `op` fails.
    fn guarded<T, F>(&self, op: F) -> Result<T, UserError>
    where
        F: FnOnce(Vec<User>) -> Result<(Option<Vec<User>>, T), UserError>,
    {
        let _guard = self.locks.acquire(self.store.location());

        let users = self.store.load().inspect_err(|e| {
            tracing::error!(error = %e, "failed to load users");
        })?;
        let (next, out) = op(users)?;
        if let Some(next) = next {
            self.store.save(&next).inspect_err(|e| {
                tracing::error!(error = %e, "failed to save users");
            })?;
        }
        Ok(out)
    }
}
