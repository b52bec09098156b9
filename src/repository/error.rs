use std::error::Error;
use std::fmt;

use crate::store::StoreError;
use crate::user::{IdsExhausted, NotFound, ValidationError};

/// Error type for user repository operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// The payload failed the validation gate. Nothing was loaded or written.
    Validation(ValidationError),
    /// No user with this id.
    NotFound(u64),
    /// The backing file could not be read, parsed or written.
    Storage(StoreError),
    /// The id policy has no id left to hand out.
    IdsExhausted,
    /// Anything else (e.g. a worker task that panicked).
    Internal(String),
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::Validation(e) => write!(f, "{}", e),
            UserError::NotFound(id) => write!(f, "user {} not found", id),
            UserError::Storage(e) => write!(f, "storage error: {}", e),
            UserError::IdsExhausted => write!(f, "{}", IdsExhausted),
            UserError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl Error for UserError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UserError::Validation(e) => Some(e),
            UserError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::Validation(err)
    }
}

impl From<NotFound> for UserError {
    fn from(err: NotFound) -> Self {
        UserError::NotFound(err.id)
    }
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        UserError::Storage(err)
    }
}

impl From<IdsExhausted> for UserError {
    fn from(_: IdsExhausted) -> Self {
        UserError::IdsExhausted
    }
}

impl UserError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            UserError::Validation(_) => 400,
            UserError::NotFound(_) => 404,
            UserError::Storage(_) => 500,
            UserError::IdsExhausted => 500,
            UserError::Internal(_) => 500,
        }
    }
}
