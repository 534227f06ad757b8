//! Ticket lifecycle: create, read, assign, move through the workflow, delete

use super::views::{StatusLogView, TicketView};
use super::accessible_ticket;
use crate::core::{Priority, Status, StatusLog, Ticket, TicketId, UserId, is_valid_transition, validation};
use crate::error::{DeskError, Result};
use crate::policy::{Action, Principal, visibility_filter};
use crate::storage::Store;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Input for creating a ticket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Input for assigning a ticket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(default)]
    pub assigned_to: String,
}

/// Input for a status change
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: Status,
}

/// Orchestrates ticket operations against storage
pub struct TicketService<S> {
    storage: Arc<S>,
}

impl<S> Clone for TicketService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: Store> TicketService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Open a new ticket on behalf of `principal`
    pub fn create(&self, principal: &Principal, input: NewTicket) -> Result<TicketView> {
        principal.require(Action::CreateTicket)?;

        let title = validation::validate_title(&input.title)?;
        let description = validation::validate_description(&input.description)?;
        let ticket = Ticket::new(
            title,
            description,
            input.priority.unwrap_or_default(),
            principal.id.clone(),
        );

        self.storage.save(&ticket)?;
        info!(
            ticket = %ticket.id.short(),
            user = %principal.id.short(),
            priority = %ticket.priority,
            "Ticket created"
        );
        TicketView::load(self.storage.as_ref(), ticket)
    }

    /// Tickets visible to `principal`, newest first
    pub fn list(&self, principal: &Principal) -> Result<Vec<TicketView>> {
        principal.require(Action::ViewTickets)?;

        let scope = visibility_filter(principal);
        let mut tickets = self.storage.find(|t| scope.matches(t))?;
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(user = %principal.id.short(), count = tickets.len(), "Listed tickets");
        TicketView::load_many(self.storage.as_ref(), tickets)
    }

    /// A single ticket, if it exists within the principal's visibility scope
    ///
    /// A ticket outside the scope is reported exactly like a missing one.
    pub fn get(&self, principal: &Principal, id: &TicketId) -> Result<TicketView> {
        principal.require(Action::ViewTickets)?;

        let scope = visibility_filter(principal);
        let ticket = self
            .storage
            .find_one(id, |t| scope.matches(t))?
            .ok_or_else(|| DeskError::TicketNotFound { id: id.to_string() })?;
        TicketView::load(self.storage.as_ref(), ticket)
    }

    /// Assign a ticket to a staff account
    ///
    /// Any MANAGER or SUPPORT caller may assign any ticket.
    pub fn assign(&self, principal: &Principal, id: &TicketId, input: &Assignment) -> Result<TicketView> {
        principal.require(Action::AssignTicket)?;

        let assignee_id = UserId::parse_str(&input.assigned_to)
            .map_err(|_| DeskError::validation("Invalid assignedTo value"))?;

        let mut ticket = self.storage.load(id)?;
        let assignee = self.storage.load_user(&assignee_id)?;
        if !assignee.role.is_staff() {
            return Err(DeskError::InvalidAssignee);
        }

        ticket.assigned_to = Some(assignee.id.clone());
        self.storage.save(&ticket)?;
        info!(
            ticket = %ticket.id.short(),
            assignee = %assignee.id.short(),
            by = %principal.id.short(),
            "Ticket assigned"
        );
        TicketView::load(self.storage.as_ref(), ticket)
    }

    /// Move a ticket one step along the workflow
    ///
    /// The new status and its audit entry are persisted together; if the
    /// entry cannot be written the status change fails as a whole.
    pub fn update_status(&self, principal: &Principal, id: &TicketId, change: StatusChange) -> Result<TicketView> {
        principal.require(Action::ChangeStatus)?;

        let previous = accessible_ticket(self.storage.as_ref(), principal, id)?;
        if !is_valid_transition(previous.status, change.status) {
            return Err(DeskError::InvalidTransition {
                from: previous.status,
                to: change.status,
            });
        }

        let mut updated = previous.clone();
        updated.status = change.status;
        let entry = StatusLog::record(
            updated.id.clone(),
            previous.status,
            change.status,
            principal.id.clone(),
        );

        self.storage.record_transition(&previous, &updated, &entry)?;
        info!(
            ticket = %updated.id.short(),
            by = %principal.id.short(),
            "Ticket status {} -> {}",
            previous.status,
            updated.status
        );
        TicketView::load(self.storage.as_ref(), updated)
    }

    /// Delete a ticket and its comments
    ///
    /// Comments go first, so a failed cascade leaves the ticket in place and
    /// the delete can be retried. Status log entries are kept.
    pub fn delete(&self, principal: &Principal, id: &TicketId) -> Result<()> {
        principal.require(Action::DeleteTicket)?;

        if !self.storage.exists(id)? {
            return Err(DeskError::TicketNotFound { id: id.to_string() });
        }
        let removed = self.storage.delete_comments_for_ticket(id)?;
        self.storage.delete(id)?;
        info!(
            ticket = %id.short(),
            by = %principal.id.short(),
            comments = removed,
            "Ticket deleted"
        );
        Ok(())
    }

    /// Status history of a ticket, oldest first
    pub fn history(&self, principal: &Principal, id: &TicketId) -> Result<Vec<StatusLogView>> {
        principal.require(Action::ViewTickets)?;

        let ticket = accessible_ticket(self.storage.as_ref(), principal, id)?;
        let entries = self.storage.status_logs_for_ticket(&ticket.id)?;
        StatusLogView::load_many(self.storage.as_ref(), entries)
    }
}
