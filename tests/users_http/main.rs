//! HTTP integration tests.
//!
//! Starts an axum server over a temp backing file and exercises it with reqwest.

mod errors;
mod scenario;
