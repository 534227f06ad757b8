use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
///
/// Roles are fixed when a user is created. Every permission decision in the
/// crate matches on this enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Sees and manages everything, including users
    Manager,
    /// Works tickets assigned to them
    Support,
    /// Opens tickets and follows their own
    User,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Manager, Self::Support, Self::User];

    /// Whether tickets may be assigned to accounts with this role
    #[must_use]
    pub const fn is_staff(self) -> bool {
        match self {
            Self::Manager | Self::Support => true,
            Self::User => false,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "MANAGER",
            Self::Support => "SUPPORT",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MANAGER" => Ok(Self::Manager),
            "SUPPORT" => Ok(Self::Support),
            "USER" => Ok(Self::User),
            other => Err(format!(
                "Invalid role: {other}. Must be one of: MANAGER, SUPPORT, USER"
            )),
        }
    }
}
