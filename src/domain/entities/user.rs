//! Owner identity and the user accounts behind it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Opaque reference to the user that created a URL record.
///
/// The registry only compares owners for equality; it never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OwnerId(i64);

impl OwnerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw storage value, for repositories.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user.
///
/// Users are created through the admin CLI and identified on the HTTP API by
/// bearer tokens issued to them.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The owner reference used to tag this user's URL records.
    pub fn owner_id(&self) -> OwnerId {
        OwnerId::new(self.id)
    }
}
