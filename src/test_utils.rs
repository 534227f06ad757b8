//! Test utilities for support-desk
//!
//! Fixtures backed by a throwaway storage directory.

#![cfg(test)]

use crate::auth::hash_password;
use crate::core::{Comment, Role, Ticket, TicketBuilder, TicketId, User, UserId};
use crate::policy::Principal;
use crate::storage::{CommentRepository, FileStorage, TicketRepository, UserRepository};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tempfile::TempDir;

/// Placeholder stored for fixture users that never log in
const UNUSABLE_HASH: &str = "$fixture$no-login";

/// A storage directory that lives as long as the fixture
pub struct TestDesk {
    pub temp_dir: TempDir,
    pub storage: Arc<FileStorage>,
}

impl TestDesk {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = FileStorage::open(temp_dir.path().join("desk")).expect("Failed to open storage");
        Self {
            temp_dir,
            storage: Arc::new(storage),
        }
    }

    /// Store a user that cannot log in; the email is derived from the name
    pub fn create_user(&self, name: &str, role: Role) -> User {
        let mut user = User::new(name, "", UNUSABLE_HASH, role);
        user.email = format!(
            "{}.{}@example.com",
            name.to_lowercase().replace(' ', "."),
            user.id.short()
        );
        self.storage.create_user(&user).expect("Failed to create user");
        user
    }

    /// Store a user with a real argon2 hash of `password`
    pub fn create_user_with_password(&self, name: &str, email: &str, password: &str, role: Role) -> User {
        let hash = hash_password(password).expect("Failed to hash password");
        let user = User::new(name, email, hash, role);
        self.storage.create_user(&user).expect("Failed to create user");
        user
    }

    /// Store a user and return it as an authenticated caller
    pub fn principal(&self, name: &str, role: Role) -> Principal {
        let user = self.create_user(name, role);
        Principal::new(user.id, role)
    }

    /// Store an OPEN ticket created by `creator`
    pub fn create_ticket(&self, creator: &UserId, title: &str) -> Ticket {
        self.save_ticket(test_ticket(creator, title).build())
    }

    /// Store an OPEN ticket created `minutes_ago`
    pub fn create_ticket_at(&self, creator: &UserId, title: &str, minutes_ago: i64) -> Ticket {
        self.save_ticket(
            test_ticket(creator, title)
                .created_at(Utc::now() - Duration::minutes(minutes_ago))
                .build(),
        )
    }

    pub fn add_comment(&self, ticket: &TicketId, author: &UserId, body: &str) -> Comment {
        let comment = Comment::new(ticket.clone(), author.clone(), body);
        self.storage.save_comment(&comment).expect("Failed to save comment");
        comment
    }

    fn save_ticket(&self, ticket: Option<Ticket>) -> Ticket {
        let ticket = ticket.expect("Fixture ticket has a creator");
        self.storage.save(&ticket).expect("Failed to save ticket");
        ticket
    }
}

impl Default for TestDesk {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder preloaded with a valid title and description
pub fn test_ticket(creator: &UserId, title: &str) -> TicketBuilder {
    TicketBuilder::new()
        .title(title)
        .description(format!("Description for {title}"))
        .created_by(creator.clone())
}
