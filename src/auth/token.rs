use crate::config::AuthConfig;
use crate::core::{Role, User, UserId};
use crate::error::{DeskError, Result};
use crate::policy::Principal;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT claims carried by bearer tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 bearer tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("keys", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, Duration::hours(config.token_ttl_hours))
    }

    /// Issue a token for `user`
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DeskError::Auth(format!("Token signing failed: {e}")))
    }

    /// Verify a token and extract the principal it names
    pub fn verify(&self, token: &str) -> Result<Principal> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {e}");
                DeskError::Unauthorized("Invalid or expired token".to_string())
            })?
            .claims;

        let id = UserId::parse_str(&claims.sub)
            .map_err(|_| DeskError::Unauthorized("Invalid or expired token".to_string()))?;
        Ok(Principal::new(id, claims.role))
    }
}
