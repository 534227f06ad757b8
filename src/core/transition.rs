//! Status workflow rules
//!
//! Tickets move forward one step at a time:
//! `OPEN -> IN_PROGRESS -> RESOLVED -> CLOSED`. `CLOSED` is terminal.

use super::Status;

/// Whether `current -> proposed` is an allowed status change
///
/// Same-state moves, skipped steps and backward moves are all rejected.
#[must_use]
pub fn is_valid_transition(current: Status, proposed: Status) -> bool {
    current.next() == Some(proposed)
}
