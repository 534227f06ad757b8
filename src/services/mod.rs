//! Application services
//!
//! Each service enforces the route-level role gate for its operations, then
//! the record-level policy, then persists. Callers pass an already
//! authenticated [`Principal`](crate::policy::Principal).

mod comments;
mod tickets;
mod users;
mod views;

pub use comments::{CommentService, NewComment};
pub use tickets::{Assignment, NewTicket, StatusChange, TicketService};
pub use users::{NewUser, UserService};
pub use views::{CommentView, StatusLogView, TicketView};

use crate::core::{CommentId, Ticket, TicketId};
use crate::error::{DeskError, Result};
use crate::policy::{Principal, can_access_ticket};
use crate::storage::TicketRepository;

/// Parse a ticket id from a path segment
///
/// A malformed id cannot name an existing ticket, so it is reported as
/// not found rather than as bad input.
pub fn parse_ticket_id(raw: &str) -> Result<TicketId> {
    TicketId::parse_str(raw).map_err(|_| DeskError::TicketNotFound { id: raw.to_string() })
}

/// Parse a comment id from a path segment
pub fn parse_comment_id(raw: &str) -> Result<CommentId> {
    CommentId::parse_str(raw).map_err(|_| DeskError::CommentNotFound { id: raw.to_string() })
}

/// Load a ticket the principal is allowed to act on
///
/// Absent tickets fail with not found; existing tickets outside the
/// principal's reach fail with forbidden.
pub(crate) fn accessible_ticket<S>(storage: &S, principal: &Principal, id: &TicketId) -> Result<Ticket>
where
    S: TicketRepository + ?Sized,
{
    let ticket = storage.load(id)?;
    if !can_access_ticket(principal, &ticket) {
        tracing::warn!(
            user = %principal.id.short(),
            ticket = %id.short(),
            "Ticket access denied"
        );
        return Err(DeskError::Forbidden);
    }
    Ok(ticket)
}
