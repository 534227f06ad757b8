use super::{Comment, CommentId, Priority, Status, Ticket, TicketId, UserId};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
///
/// Mostly useful when a ticket needs a given status, assignee or timestamp. `created_by` is required at build time.
#[derive(Default)]
pub struct TicketBuilder {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    created_by: Option<UserId>,
    assigned_to: Option<UserId>,
    created_at: Option<DateTime<Utc>>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the creator
    #[must_use]
    pub fn created_by(mut self, user: UserId) -> Self {
        self.created_by = Some(user);
        self
    }

    /// Set the assignee
    #[must_use]
    pub fn assigned_to(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the ticket, or `None` if no creator was given
    #[must_use]
    pub fn build(self) -> Option<Ticket> {
        Some(Ticket {
            id: TicketId::new(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            created_by: self.created_by?,
            assigned_to: self.assigned_to,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Builder for creating Comment instances
pub struct CommentBuilder {
    ticket: TicketId,
    author: UserId,
    body: String,
    created_at: Option<DateTime<Utc>>,
}

impl CommentBuilder {
    /// Start a comment on `ticket` by `author`
    #[must_use]
    pub fn new(ticket: TicketId, author: UserId) -> Self {
        Self {
            ticket,
            author,
            body: String::new(),
            created_at: None,
        }
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the comment
    #[must_use]
    pub fn build(self) -> Comment {
        Comment {
            id: CommentId::new(),
            ticket: self.ticket,
            author: self.author,
            body: self.body,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}
