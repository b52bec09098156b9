//! JSON-file backed user records, served over HTTP.
//!
//! The whole collection lives in one backing file. Each operation takes the
//! file's lock, loads the collection, applies a pure transform, saves the
//! collection back atomically, and releases the lock.

pub mod config;
pub mod lock;
pub mod repository;
pub mod store;
pub mod user;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use config::Config;
pub use lock::{FileLocks, LockGuard};
pub use repository::{UserError, UserRepository};
pub use store::{InMemoryRecordStore, JsonFileStore, RecordStore, StoreError};
pub use user::{validate, IdPolicy, IdsExhausted, NewUser, NotFound, User, ValidationError};
