use crate::error::{DeskError, Result};
use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;

/// Stand-in hash checked when no account matches, so both login failures cost
/// one argon2 verification
static DECOY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("decoy-password-never-matches").ok());

/// Hash a plaintext password into an argon2 PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DeskError::Auth(format!("Password hashing failed: {e}")))
}

/// Check a plaintext password against a stored hash
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| DeskError::Auth(format!("Stored password hash is malformed: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Spend a verification on the decoy hash. Always `false`.
pub(crate) fn verify_decoy(password: &str) -> bool {
    if let Some(hash) = DECOY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
    false
}
