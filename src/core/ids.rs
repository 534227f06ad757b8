//! Strongly typed record identifiers
//!
//! Each record kind gets its own UUID newtype so a comment id can never be
//! passed where a ticket id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random id
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an id from its string form
            pub fn parse_str(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s.trim()).map(Self)
            }

            /// First eight characters, for log lines
            #[must_use]
            pub fn short(&self) -> String {
                self.0.to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a [`User`](super::User)
    UserId
);
record_id!(
    /// Identifier of a [`Ticket`](super::Ticket)
    TicketId
);
record_id!(
    /// Identifier of a [`Comment`](super::Comment)
    CommentId
);
record_id!(
    /// Identifier of a [`StatusLog`](super::StatusLog) entry
    StatusLogId
);
