use super::{CommentId, TicketId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub ticket: TicketId,
    pub author: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    #[must_use]
    pub fn new(ticket: TicketId, author: UserId, body: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            ticket,
            author,
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.author == user
    }
}
