use super::{Status, StatusLogId, TicketId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit record of one successful status transition
///
/// Entries are appended once and never rewritten or removed, not even when
/// their ticket is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLog {
    pub id: StatusLogId,
    pub ticket: TicketId,
    pub old_status: Status,
    pub new_status: Status,
    pub changed_by: UserId,
    pub changed_at: DateTime<Utc>,
}

impl StatusLog {
    #[must_use]
    pub fn record(ticket: TicketId, old_status: Status, new_status: Status, changed_by: UserId) -> Self {
        Self {
            id: StatusLogId::new(),
            ticket,
            old_status,
            new_status,
            changed_by,
            changed_at: Utc::now(),
        }
    }
}
