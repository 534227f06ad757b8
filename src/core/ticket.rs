use super::{TicketId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    /// The only state this one may move to, if any
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Open => Some(Self::InProgress),
            Self::InProgress => Some(Self::Resolved),
            Self::Resolved => Some(Self::Closed),
            Self::Closed => None,
        }
    }

    /// Whether no further transitions are possible
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "RESOLVED" => Ok(Self::Resolved),
            "CLOSED" => Ok(Self::Closed),
            other => Err(format!(
                "Invalid status: {other}. Must be one of: OPEN, IN_PROGRESS, RESOLVED, CLOSED"
            )),
        }
    }
}

/// Ticket urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        })
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => Err(format!(
                "Invalid priority: {other}. Must be one of: LOW, MEDIUM, HIGH"
            )),
        }
    }
}

/// A support ticket as stored
///
/// `created_by` is fixed at creation. `assigned_to`, when set, always points
/// at a MANAGER or SUPPORT account; the ticket service enforces this before
/// any assignment is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub created_by: UserId,
    pub assigned_to: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Create a new open ticket owned by `created_by`
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        created_by: UserId,
    ) -> Self {
        Self {
            id: TicketId::new(),
            title: title.into(),
            description: description.into(),
            status: Status::Open,
            priority,
            created_by,
            assigned_to: None,
            created_at: Utc::now(),
        }
    }

    /// Whether `user` opened this ticket
    #[must_use]
    pub fn is_created_by(&self, user: &UserId) -> bool {
        &self.created_by == user
    }

    /// Whether `user` is the current assignee
    #[must_use]
    pub fn is_assigned_to(&self, user: &UserId) -> bool {
        self.assigned_to.as_ref() == Some(user)
    }
}
