//! Input validation shared by the services
//!
//! Validators normalize as they check: they return the trimmed (and, for
//! email, lowercased) value that should be stored.

use crate::error::{DeskError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_TITLE_LEN: usize = 5;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

fn min_chars(field: &str, value: &str, min: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(DeskError::validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a ticket title
pub fn validate_title(title: &str) -> Result<String> {
    min_chars("title", title, MIN_TITLE_LEN)
}

/// Validate a ticket description
pub fn validate_description(description: &str) -> Result<String> {
    min_chars("description", description, MIN_DESCRIPTION_LEN)
}

/// Validate a comment body
pub fn validate_comment(body: &str) -> Result<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(DeskError::validation("comment cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DeskError::validation("name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Validate and normalize an email address
pub fn validate_email(email: &str) -> Result<String> {
    let normalized = email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(DeskError::validation(format!("Invalid email: {email}")));
    }
    Ok(normalized)
}

/// Validate a plaintext password before hashing
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DeskError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
