use serde::{Deserialize, Serialize};

/// One persisted user record.
///
/// Field order here is the key order written to the backing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub address: String,
}

/// A validated create/update payload. Carries no id; the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// Attach an id, producing the record as it will be stored.
    pub fn with_id(self, id: u64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            address: self.address,
        }
    }
}

impl User {
    /// Replace every mutable field. The id is left alone.
    pub fn apply(&mut self, payload: NewUser) {
        self.name = payload.name;
        self.email = payload.email;
        self.address = payload.address;
    }
}
