//! Concurrency guard for backing files.
//!
//! Every load→transform→save cycle against a backing file runs while holding
//! that file's lock. [`FileLocks`] hands out one lock per location and
//! [`LockGuard`] holds it until dropped.

mod file_locks;

pub use file_locks::{FileLocks, LockGuard};
