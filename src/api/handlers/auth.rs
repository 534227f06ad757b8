use crate::api::{ApiError, AppState, run_blocking};
use crate::auth::Session;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Session>, ApiError> {
    let Json(request) = payload?;
    let auth = state.auth;
    let session = run_blocking(move || auth.login(&request.email, &request.password)).await?;
    Ok(Json(session))
}
