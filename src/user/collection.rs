//! Pure transforms over an ordered user collection.
//!
//! Nothing here touches the disk or a lock. Each mutating function takes the
//! collection by value and hands back the new state, which the repository
//! then saves whole.

use std::fmt;

use super::{NewUser, User};

/// No record with the requested id exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound {
    pub id: u64,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {} not found", self.id)
    }
}

impl std::error::Error for NotFound {}

/// The id policy would step past `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdsExhausted;

impl fmt::Display for IdsExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user id space exhausted")
    }
}

impl std::error::Error for IdsExhausted {}

/// How `insert` picks the id of a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// `len + 1`. Reuses ids after deletes and can hand out an id that is
    /// still live once a non-trailing record has been removed.
    #[default]
    Count,
    /// Largest existing id + 1. Never collides with a live record, but the
    /// id of a deleted trailing record is handed out again.
    MaxPlusOne,
}

impl IdPolicy {
    pub fn next_id(self, users: &[User]) -> Result<u64, IdsExhausted> {
        match self {
            // len <= isize::MAX, so len + 1 always fits.
            IdPolicy::Count => Ok(next_id(users)),
            IdPolicy::MaxPlusOne => users
                .iter()
                .map(|u| u.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or(IdsExhausted),
        }
    }
}

/// Every record, in stored order.
pub fn list_all(users: &[User]) -> &[User] {
    users
}

/// First record whose id equals `id`.
pub fn find_by_id(users: &[User], id: u64) -> Option<&User> {
    users.iter().find(|u| u.id == id)
}

/// Count-based id: number of records + 1.
pub fn next_id(users: &[User]) -> u64 {
    users.len() as u64 + 1
}

/// Append a new record with an id chosen by `policy`.
pub fn insert(
    mut users: Vec<User>,
    payload: NewUser,
    policy: IdPolicy,
) -> Result<(Vec<User>, User), IdsExhausted> {
    let user = payload.with_id(policy.next_id(&users)?);
    users.push(user.clone());
    Ok((users, user))
}

/// Replace name, email and address of the record with `id`, in place.
pub fn replace(
    mut users: Vec<User>,
    id: u64,
    payload: NewUser,
) -> Result<(Vec<User>, User), NotFound> {
    let user = users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or(NotFound { id })?;
    user.apply(payload);
    let updated = user.clone();
    Ok((users, updated))
}

/// Drop every record with `id`, keeping the others in order.
///
/// Count-based ids can be duplicated, so all matches go, not just the first.
pub fn remove_by_id(mut users: Vec<User>, id: u64) -> Result<Vec<User>, NotFound> {
    if find_by_id(&users, id).is_none() {
        return Err(NotFound { id });
    }
    users.retain(|u| u.id != id);
    Ok(users)
}
