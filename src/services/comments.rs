//! Comment threads on tickets

use super::accessible_ticket;
use super::views::CommentView;
use crate::core::{Comment, CommentId, TicketId, validation};
use crate::error::{DeskError, Result};
use crate::policy::{Action, Principal, can_modify_comment};
use crate::storage::Store;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Input for adding or editing a comment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub comment: String,
}

/// Discussion on tickets
pub struct CommentService<S> {
    storage: Arc<S>,
}

impl<S> Clone for CommentService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: Store> CommentService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Add a comment to a ticket the principal can access
    pub fn add(&self, principal: &Principal, ticket: &TicketId, input: NewComment) -> Result<CommentView> {
        principal.require(Action::Comment)?;

        let ticket = accessible_ticket(self.storage.as_ref(), principal, ticket)?;
        let body = validation::validate_comment(&input.comment)?;
        let comment = Comment::new(ticket.id, principal.id.clone(), body);

        self.storage.save_comment(&comment)?;
        info!(
            comment = %comment.id.short(),
            ticket = %comment.ticket.short(),
            user = %principal.id.short(),
            "Comment added"
        );
        CommentView::load(self.storage.as_ref(), comment)
    }

    /// Comments on a ticket, oldest first
    pub fn list(&self, principal: &Principal, ticket: &TicketId) -> Result<Vec<CommentView>> {
        principal.require(Action::Comment)?;

        let ticket = accessible_ticket(self.storage.as_ref(), principal, ticket)?;
        let comments = self.storage.comments_for_ticket(&ticket.id)?;
        CommentView::load_many(self.storage.as_ref(), comments)
    }

    /// Replace the body of a comment
    pub fn update(&self, principal: &Principal, id: &CommentId, input: NewComment) -> Result<CommentView> {
        let mut comment = self.modifiable(principal, id)?;
        comment.body = validation::validate_comment(&input.comment)?;

        self.storage.save_comment(&comment)?;
        info!(comment = %comment.id.short(), user = %principal.id.short(), "Comment edited");
        CommentView::load(self.storage.as_ref(), comment)
    }

    pub fn delete(&self, principal: &Principal, id: &CommentId) -> Result<()> {
        let comment = self.modifiable(principal, id)?;
        self.storage.delete_comment(&comment.id)?;
        info!(comment = %comment.id.short(), user = %principal.id.short(), "Comment deleted");
        Ok(())
    }

    fn modifiable(&self, principal: &Principal, id: &CommentId) -> Result<Comment> {
        let comment = self.storage.load_comment(id)?;
        if !can_modify_comment(principal, &comment) {
            warn!(
                comment = %id.short(),
                user = %principal.id.short(),
                "Comment modification denied"
            );
            return Err(DeskError::Forbidden);
        }
        Ok(comment)
    }
}
