//! Error types for support-desk
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! [`DeskError`] carries enough detail for logging. Callers that need a
//! stable classification (the HTTP layer, the CLI) use [`DeskError::kind`].

use crate::core::Status;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DeskError>;

/// Main error type for support-desk
#[derive(Error, Debug)]
pub enum DeskError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Proposed status change is not part of the workflow
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: Status, to: Status },

    /// Tickets can only be assigned to staff accounts
    #[error("Cannot assign ticket to USER role")]
    InvalidAssignee,

    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Comment not found: {id}")]
    CommentNotFound { id: String },

    /// Role or ownership check failed
    #[error("Insufficient permissions")]
    Forbidden,

    /// Unique constraint violated
    #[error("Duplicate field value: {field}")]
    DuplicateKey { field: String },

    /// Missing or rejected credentials
    #[error("{0}")]
    Unauthorized(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("Storage lock error: {0}")]
    Lock(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Credential error: {0}")]
    Auth(String),

    #[error("{0}")]
    Custom(String),
}

/// Stable error classification exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    InvalidTransition,
    InvalidAssignee,
    NotFound,
    Forbidden,
    DuplicateKey,
    Unauthorized,
    Unexpected,
}

impl DeskError {
    /// Create a custom error
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::InvalidAssignee => ErrorKind::InvalidAssignee,
            Self::TicketNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::CommentNotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden => ErrorKind::Forbidden,
            Self::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Io(_)
            | Self::SerializationError(_)
            | Self::Lock(_)
            | Self::Config(_)
            | Self::Auth(_)
            | Self::Custom(_) => ErrorKind::Unexpected,
        }
    }

    /// Whether the error is a record-lookup failure
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }
}

impl From<serde_json::Error> for DeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Custom(format!("JSON error: {err}"))
    }
}
