//! Role-based access policy
//!
//! Two related but distinct questions are answered here:
//!
//! - [`visibility_filter`] decides which tickets a principal can *see*. It is
//!   applied as a query scope, so a ticket outside it looks exactly like a
//!   ticket that does not exist.
//! - [`can_access_ticket`] decides whether a principal may *act on* a ticket
//!   whose existence is already established. Failing it is a permission
//!   error, not a lookup error.
//!
//! Route-level gates ([`Action`], [`is_permitted`]) are checked before either.

use crate::core::{Comment, Role, Ticket, UserId};
use crate::error::{DeskError, Result};
use serde::{Deserialize, Serialize};

/// The authenticated caller of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager)
    }

    /// Fail with `Forbidden` unless this principal's role may attempt `action`
    pub fn require(&self, action: Action) -> Result<()> {
        if is_permitted(self.role, action) {
            Ok(())
        } else {
            tracing::warn!(user = %self.id.short(), role = %self.role, ?action, "Action denied by role gate");
            Err(DeskError::Forbidden)
        }
    }
}

/// Operations gated by role before any record is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateTicket,
    ViewTickets,
    AssignTicket,
    ChangeStatus,
    DeleteTicket,
    Comment,
    ManageUsers,
}

/// Whether `role` may attempt `action` at all
#[must_use]
pub const fn is_permitted(role: Role, action: Action) -> bool {
    match action {
        Action::CreateTicket => matches!(role, Role::User | Role::Manager),
        Action::ViewTickets | Action::Comment => true,
        Action::AssignTicket | Action::ChangeStatus => matches!(role, Role::Manager | Role::Support),
        Action::DeleteTicket | Action::ManageUsers => matches!(role, Role::Manager),
    }
}

/// The set of tickets a principal can see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    All,
    AssignedTo(UserId),
    CreatedBy(UserId),
}

impl Visibility {
    /// Whether `ticket` falls inside this scope
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::AssignedTo(user) => ticket.is_assigned_to(user),
            Self::CreatedBy(user) => ticket.is_created_by(user),
        }
    }
}

/// Scope of tickets visible to `principal`
#[must_use]
pub fn visibility_filter(principal: &Principal) -> Visibility {
    match principal.role {
        Role::Manager => Visibility::All,
        Role::Support => Visibility::AssignedTo(principal.id.clone()),
        Role::User => Visibility::CreatedBy(principal.id.clone()),
    }
}

/// Whether `principal` may act on `ticket`
#[must_use]
pub fn can_access_ticket(principal: &Principal, ticket: &Ticket) -> bool {
    match principal.role {
        Role::Manager => true,
        Role::Support => ticket.is_assigned_to(&principal.id),
        Role::User => ticket.is_created_by(&principal.id),
    }
}

/// Whether `principal` may edit or remove `comment`
#[must_use]
pub fn can_modify_comment(principal: &Principal, comment: &Comment) -> bool {
    principal.is_manager() || comment.is_authored_by(&principal.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Priority, TicketId};

    fn ticket(creator: &UserId, assignee: Option<&UserId>) -> Ticket {
        let mut ticket = Ticket::new(
            "Cannot login",
            "Login fails with 500 error",
            Priority::Medium,
            creator.clone(),
        );
        ticket.assigned_to = assignee.cloned();
        ticket
    }

    #[test]
    fn test_manager_sees_everything() {
        let manager = Principal::new(UserId::new(), Role::Manager);
        let t = ticket(&UserId::new(), None);
        assert_eq!(visibility_filter(&manager), Visibility::All);
        assert!(visibility_filter(&manager).matches(&t));
        assert!(can_access_ticket(&manager, &t));
    }

    #[test]
    fn test_support_sees_only_assigned() {
        let agent = Principal::new(UserId::new(), Role::Support);
        let mine = ticket(&UserId::new(), Some(&agent.id));
        let other = ticket(&UserId::new(), Some(&UserId::new()));
        let unassigned = ticket(&UserId::new(), None);

        let scope = visibility_filter(&agent);
        assert!(scope.matches(&mine));
        assert!(!scope.matches(&other));
        assert!(!scope.matches(&unassigned));

        assert!(can_access_ticket(&agent, &mine));
        assert!(!can_access_ticket(&agent, &unassigned));
    }

    #[test]
    fn test_user_sees_only_own() {
        let user = Principal::new(UserId::new(), Role::User);
        let mine = ticket(&user.id, None);
        let theirs = ticket(&UserId::new(), None);

        let scope = visibility_filter(&user);
        assert!(scope.matches(&mine));
        assert!(!scope.matches(&theirs));
        assert!(can_access_ticket(&user, &mine));
        assert!(!can_access_ticket(&user, &theirs));
    }

    #[test]
    fn test_user_is_not_granted_access_by_assignment() {
        let user = Principal::new(UserId::new(), Role::User);
        let t = ticket(&UserId::new(), Some(&user.id));
        assert!(!can_access_ticket(&user, &t));
        assert!(!visibility_filter(&user).matches(&t));
    }

    #[test]
    fn test_route_gates() {
        assert!(is_permitted(Role::User, Action::CreateTicket));
        assert!(is_permitted(Role::Manager, Action::CreateTicket));
        assert!(!is_permitted(Role::Support, Action::CreateTicket));

        for role in Role::ALL {
            assert!(is_permitted(role, Action::ViewTickets));
            assert!(is_permitted(role, Action::Comment));
        }

        assert!(is_permitted(Role::Support, Action::AssignTicket));
        assert!(is_permitted(Role::Manager, Action::ChangeStatus));
        assert!(!is_permitted(Role::User, Action::AssignTicket));
        assert!(!is_permitted(Role::User, Action::ChangeStatus));

        assert!(is_permitted(Role::Manager, Action::DeleteTicket));
        assert!(!is_permitted(Role::Support, Action::DeleteTicket));
        assert!(!is_permitted(Role::Support, Action::ManageUsers));
        assert!(!is_permitted(Role::User, Action::ManageUsers));
    }

    #[test]
    fn test_require_maps_to_forbidden() {
        let agent = Principal::new(UserId::new(), Role::Support);
        assert!(agent.require(Action::ChangeStatus).is_ok());
        assert!(matches!(
            agent.require(Action::DeleteTicket),
            Err(DeskError::Forbidden)
        ));
    }

    #[test]
    fn test_comment_modification() {
        let author = Principal::new(UserId::new(), Role::User);
        let stranger = Principal::new(UserId::new(), Role::Support);
        let manager = Principal::new(UserId::new(), Role::Manager);
        let comment = Comment::new(TicketId::new(), author.id.clone(), "hello");

        assert!(can_modify_comment(&author, &comment));
        assert!(can_modify_comment(&manager, &comment));
        assert!(!can_modify_comment(&stranger, &comment));
    }
}
