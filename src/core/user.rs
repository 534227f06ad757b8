use super::{Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account as stored
///
/// `password_hash` is an argon2 PHC string. It never leaves the storage and
/// auth layers; everything user-facing goes through [`UserSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            created_at: Utc::now(),
        }
    }

    /// Public view of this account
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Credential-free view of a user, embedded in expanded records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}
