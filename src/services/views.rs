//! Expanded records returned to callers
//!
//! Stored records reference users by id. Views replace those ids with
//! [`UserSummary`] values so callers get names and roles without ever seeing
//! credentials. A reference to a user that no longer resolves expands to
//! `null`.

use crate::core::{
    Comment, CommentId, Priority, Status, StatusLog, StatusLogId, Ticket, TicketId, UserId,
    UserSummary,
};
use crate::error::Result;
use crate::storage::UserRepository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ticket with creator and assignee expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub created_by: Option<UserSummary>,
    pub assigned_to: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
}

/// Comment with its author expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: CommentId,
    pub ticket: TicketId,
    #[serde(rename = "user")]
    pub author: Option<UserSummary>,
    #[serde(rename = "comment")]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Audit entry with the acting user expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusLogView {
    pub id: StatusLogId,
    pub ticket: TicketId,
    pub old_status: Status,
    pub new_status: Status,
    pub changed_by: Option<UserSummary>,
    pub changed_at: DateTime<Utc>,
}

/// Summaries for the given user ids, each loaded once
pub(crate) fn resolve_users<'a, S>(
    storage: &S,
    ids: impl IntoIterator<Item = &'a UserId>,
) -> Result<HashMap<UserId, UserSummary>>
where
    S: UserRepository + ?Sized,
{
    let mut index = HashMap::new();
    for id in ids {
        if index.contains_key(id) {
            continue;
        }
        match storage.load_user(id) {
            Ok(user) => {
                index.insert(id.clone(), user.summary());
            },
            Err(e) if e.is_not_found() => {
                tracing::warn!(user = %id.short(), "Referenced user does not exist");
            },
            Err(e) => return Err(e),
        }
    }
    Ok(index)
}

impl TicketView {
    pub(crate) fn expand(ticket: Ticket, users: &HashMap<UserId, UserSummary>) -> Self {
        Self {
            created_by: users.get(&ticket.created_by).cloned(),
            assigned_to: ticket.assigned_to.as_ref().and_then(|id| users.get(id).cloned()),
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            status: ticket.status,
            priority: ticket.priority,
            created_at: ticket.created_at,
        }
    }

    /// Expand a single ticket
    pub(crate) fn load<S: UserRepository + ?Sized>(storage: &S, ticket: Ticket) -> Result<Self> {
        let users = resolve_users(
            storage,
            std::iter::once(&ticket.created_by).chain(ticket.assigned_to.as_ref()),
        )?;
        Ok(Self::expand(ticket, &users))
    }

    /// Expand many tickets, preserving order
    pub(crate) fn load_many<S: UserRepository + ?Sized>(
        storage: &S,
        tickets: Vec<Ticket>,
    ) -> Result<Vec<Self>> {
        let users = resolve_users(
            storage,
            tickets
                .iter()
                .flat_map(|t| std::iter::once(&t.created_by).chain(t.assigned_to.as_ref())),
        )?;
        Ok(tickets
            .into_iter()
            .map(|t| Self::expand(t, &users))
            .collect())
    }
}

impl CommentView {
    pub(crate) fn expand(comment: Comment, users: &HashMap<UserId, UserSummary>) -> Self {
        Self {
            author: users.get(&comment.author).cloned(),
            id: comment.id,
            ticket: comment.ticket,
            body: comment.body,
            created_at: comment.created_at,
        }
    }

    pub(crate) fn load<S: UserRepository + ?Sized>(storage: &S, comment: Comment) -> Result<Self> {
        let users = resolve_users(storage, std::iter::once(&comment.author))?;
        Ok(Self::expand(comment, &users))
    }

    pub(crate) fn load_many<S: UserRepository + ?Sized>(
        storage: &S,
        comments: Vec<Comment>,
    ) -> Result<Vec<Self>> {
        let users = resolve_users(storage, comments.iter().map(|c| &c.author))?;
        Ok(comments
            .into_iter()
            .map(|c| Self::expand(c, &users))
            .collect())
    }
}

impl StatusLogView {
    pub(crate) fn load_many<S: UserRepository + ?Sized>(
        storage: &S,
        entries: Vec<StatusLog>,
    ) -> Result<Vec<Self>> {
        let users = resolve_users(storage, entries.iter().map(|e| &e.changed_by))?;
        Ok(entries
            .into_iter()
            .map(|e| Self {
                changed_by: users.get(&e.changed_by).cloned(),
                id: e.id,
                ticket: e.ticket,
                old_status: e.old_status,
                new_status: e.new_status,
                changed_at: e.changed_at,
            })
            .collect())
    }
}
