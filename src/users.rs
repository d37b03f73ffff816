//! Registered library users, keyed and listed by id.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LibraryError;

/// Unique identifier of a registered user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered library user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct User {
    /// Registry identifier
    pub id: UserId,
    /// Display name
    pub name: String,
}

impl User {
    /// Create a new user record
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id: UserId(id), name: name.into() }
    }
}

/// Id-ordered registry of users
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    /// Users keyed by id
    users: BTreeMap<UserId, User>,
}

impl UserRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DuplicateUser` if the id is already taken; the
    /// registry is left unchanged.
    pub fn add(&mut self, user: User) -> Result<&User, LibraryError> {
        let user_id = user.id;
        match self.users.entry(user_id) {
            Entry::Occupied(_) => Err(LibraryError::DuplicateUser { user_id }),
            Entry::Vacant(slot) => {
                debug!(%user_id, name = %user.name, "user registered");
                Ok(slot.insert(user))
            }
        }
    }

    /// User with this id
    #[must_use]
    pub fn lookup(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Whether a user with this id is registered
    #[must_use]
    pub fn contains(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    /// Every user by ascending id
    pub fn list_all(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Number of registered users
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether nobody is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
