//! support-desk - A role-based support ticket tracker
//!
//! Customers (USER) open tickets, managers (MANAGER) assign them to staff,
//! and staff (SUPPORT, MANAGER) move them through a fixed workflow:
//!
//! ```text
//! OPEN -> IN_PROGRESS -> RESOLVED -> CLOSED
//! ```
//!
//! Every status change is recorded in an append-only audit log. Who can see
//! and act on which ticket is decided by [`policy`].

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]

//! # Concurrent Safety
//!
//! Records live as one YAML file each under the storage directory. Writes
//! are serialized through a lock file with bounded retry and replace the
//! target atomically, so concurrent requests and CLI invocations never see
//! a half-written record.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use support_desk::core::Role;
//! use support_desk::policy::Principal;
//! use support_desk::services::{NewTicket, TicketService};
//! use support_desk::storage::FileStorage;
//!
//! let storage = Arc::new(FileStorage::open(".support-desk")?);
//! let tickets = TicketService::new(storage);
//!
//! let caller = Principal::new(user_id, Role::User);
//! let ticket = tickets.create(&caller, NewTicket {
//!     title: "Cannot login".into(),
//!     description: "The login page rejects my password".into(),
//!     priority: None,
//! })?;
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod policy;
pub mod services;
pub mod storage;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{DeskError, Result};
