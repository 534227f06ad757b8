//! Identity and authentication
//!
//! Credentials are handled only here. Everything past the authenticator
//! works with a [`Principal`].

mod password;
mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer};

use self::password::verify_decoy;
use crate::core::{UserSummary, validation};
use crate::error::{DeskError, Result};
use crate::policy::Principal;
use crate::storage::UserRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const BAD_CREDENTIALS: &str = "Invalid credentials";

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserSummary,
}

/// Verifies credentials and bearer tokens against the user store
#[derive(Debug)]
pub struct Authenticator<S> {
    storage: Arc<S>,
    tokens: TokenIssuer,
}

impl<S> Clone for Authenticator<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            tokens: self.tokens.clone(),
        }
    }
}

impl<S: UserRepository> Authenticator<S> {
    pub fn new(storage: Arc<S>, tokens: TokenIssuer) -> Self {
        Self { storage, tokens }
    }

    /// Exchange email and password for a bearer token
    ///
    /// Unknown email and wrong password fail identically.
    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = validation::validate_email(email)
            .map_err(|_| DeskError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

        let Some(user) = self.storage.find_user_by_email(&email)? else {
            verify_decoy(password);
            tracing::info!("Login failed for unknown email");
            return Err(DeskError::Unauthorized(BAD_CREDENTIALS.to_string()));
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::info!(user = %user.id.short(), "Login failed: wrong password");
            return Err(DeskError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user = %user.id.short(), role = %user.role, "User logged in");
        Ok(Session {
            token,
            user: user.summary(),
        })
    }

    /// Resolve a bearer token to the principal it belongs to
    ///
    /// The account must still exist; its stored role is authoritative.
    pub fn authenticate(&self, token: &str) -> Result<Principal> {
        let claimed = self.tokens.verify(token)?;
        match self.storage.load_user(&claimed.id) {
            Ok(user) => Ok(Principal::new(user.id, user.role)),
            Err(e) if e.is_not_found() => {
                Err(DeskError::Unauthorized("Account no longer exists".to_string()))
            },
            Err(e) => Err(e),
        }
    }
}
