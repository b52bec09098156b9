//! Record store: whole-collection load and save against one backing resource.
//!
//! ## Example
//!
//! ```ignore
//! use user_store::store::{JsonFileStore, RecordStore};
//!
//! let store = JsonFileStore::new("data/users.json");
//! store.init()?;
//! let users = store.load()?;
//! store.save(&users)?;
//! ```

mod error;
mod in_memory;
mod json_file;

pub use error::StoreError;
pub use in_memory::InMemoryRecordStore;
pub use json_file::JsonFileStore;

use crate::user::User;

/// Full-collection persistence for user records.
///
/// Implementations keep no cache: every `load` observes the last completed
/// `save`. Callers serialize load/save cycles through the guard for
/// [`location`](RecordStore::location).
pub trait RecordStore: Send + Sync {
    /// Stable key naming the backing resource (the guard key).
    fn location(&self) -> &str;

    /// Read and parse the whole collection.
    fn load(&self) -> Result<Vec<User>, StoreError>;

    /// Replace the whole collection.
    fn save(&self, users: &[User]) -> Result<(), StoreError>;
}
