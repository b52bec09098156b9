use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing resource is missing or could not be read.
    Read { location: String, message: String },
    /// The collection could not be written.
    Write { location: String, message: String },
    /// The content is not a JSON array of user records.
    Malformed { location: String, message: String },
    /// An in-process storage lock was poisoned.
    Poisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read { location, message } => {
                write!(f, "failed to read {}: {}", location, message)
            }
            StoreError::Write { location, message } => {
                write!(f, "failed to write {}: {}", location, message)
            }
            StoreError::Malformed { location, message } => {
                write!(f, "malformed user collection in {}: {}", location, message)
            }
            StoreError::Poisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}
