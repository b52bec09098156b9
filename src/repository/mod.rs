//! The guarded access path to the user collection.

mod error;
mod users;

pub use error::UserError;
pub use users::UserRepository;
