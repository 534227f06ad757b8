//! Account management

use crate::auth::hash_password;
use crate::config::BootstrapConfig;
use crate::core::{Role, User, UserSummary, validation};
use crate::error::Result;
use crate::policy::{Action, Principal};
use crate::storage::UserRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Input for creating an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Role,
}

pub struct UserService<S> {
    storage: Arc<S>,
}

impl<S> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: UserRepository> UserService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Create an account on behalf of a manager
    pub fn create(&self, principal: &Principal, input: NewUser) -> Result<UserSummary> {
        principal.require(Action::ManageUsers)?;
        let user = self.register(input)?;
        info!(user = %user.id.short(), by = %principal.id.short(), "User created by manager");
        Ok(user.summary())
    }

    /// All accounts, oldest first
    pub fn list(&self, principal: &Principal) -> Result<Vec<UserSummary>> {
        principal.require(Action::ManageUsers)?;
        let users = self.storage.load_all_users()?;
        debug!(count = users.len(), "Listed users");
        Ok(users.iter().map(User::summary).collect())
    }

    /// Validate, hash and store a new account without a role gate
    ///
    /// Used by operator tooling that runs outside any authenticated session.
    pub fn register(&self, input: NewUser) -> Result<User> {
        let name = validation::validate_name(&input.name)?;
        let email = validation::validate_email(&input.email)?;
        validation::validate_password(&input.password)?;

        let user = User::new(name, email, hash_password(&input.password)?, input.role);
        self.storage.create_user(&user)?;
        info!(user = %user.id.short(), role = %user.role, "Registered user {}", user.email);
        Ok(user)
    }

    /// Create the configured MANAGER account unless a manager already exists
    ///
    /// Returns the new account, or `None` when nothing had to be done.
    pub fn ensure_default_manager(&self, bootstrap: &BootstrapConfig) -> Result<Option<UserSummary>> {
        if self.storage.has_user_with_role(Role::Manager)? {
            debug!("Manager account present, skipping bootstrap");
            return Ok(None);
        }

        let user = self.register(NewUser {
            name: bootstrap.name.clone(),
            email: bootstrap.email.clone(),
            password: bootstrap.password.clone(),
            role: Role::Manager,
        })?;
        info!(user = %user.id.short(), "Default manager created: {}", user.email);
        Ok(Some(user.summary()))
    }
}
