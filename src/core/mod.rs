//! Domain model: accounts, tickets, comments and the status audit trail

mod builders;
mod comment;
mod ids;
mod role;
mod status_log;
mod ticket;
pub mod transition;
mod user;
pub mod validation;

pub use builders::{CommentBuilder, TicketBuilder};
pub use comment::Comment;
pub use ids::{CommentId, StatusLogId, TicketId, UserId};
pub use role::Role;
pub use status_log::StatusLog;
pub use ticket::{Priority, Status, Ticket};
pub use transition::is_valid_transition;
pub use user::{User, UserSummary};
