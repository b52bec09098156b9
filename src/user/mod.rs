//! User records: the data model, the pure collection transforms, and the
//! validation gate applied before any mutation.

pub mod collection;
mod record;
mod validation;

pub use collection::{IdPolicy, IdsExhausted, NotFound};
pub use record::{NewUser, User};
pub use validation::{validate, FieldFormat, FieldRule, ValidationError, USER_SCHEMA};
