use super::{ApiError, AppState, run_blocking};
use crate::error::DeskError;
use crate::policy::Principal;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};

/// The caller behind a valid `Authorization: Bearer` header
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| DeskError::Unauthorized("Missing bearer token".to_string()))?;

        let auth = AppState::from_ref(state).auth;
        let principal = run_blocking(move || auth.authenticate(&token)).await?;
        Ok(Self(principal))
    }
}
