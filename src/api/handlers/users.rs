use crate::api::{ApiError, AppState, AuthenticatedPrincipal, run_blocking};
use crate::core::UserSummary;
use crate::policy::Action;
use crate::services::NewUser;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<UserSummary>), ApiError> {
    principal.require(Action::ManageUsers)?;
    let Json(input) = payload?;
    let users = state.users;
    let summary = run_blocking(move || users.create(&principal, input)).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// `GET /users`
pub async fn list_users(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.users;
    let summaries = run_blocking(move || users.list(&principal)).await?;
    Ok(Json(summaries))
}
