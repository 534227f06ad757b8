use crate::api::{ApiError, AppState, AuthenticatedPrincipal, run_blocking};
use crate::policy::Action;
use crate::services::{CommentView, NewComment, parse_comment_id, parse_ticket_id};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

/// `POST /tickets/:id/comments`
pub async fn add_comment(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(ticket): Path<String>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentView>), ApiError> {
    principal.require(Action::Comment)?;
    let Json(input) = payload?;
    let comments = state.comments;
    let view =
        run_blocking(move || comments.add(&principal, &parse_ticket_id(&ticket)?, input)).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /tickets/:id/comments`
pub async fn list_comments(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(ticket): Path<String>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    let comments = state.comments;
    let views = run_blocking(move || comments.list(&principal, &parse_ticket_id(&ticket)?)).await?;
    Ok(Json(views))
}

/// `PATCH /comments/:id`
pub async fn update_comment(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(id): Path<String>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> Result<Json<CommentView>, ApiError> {
    let Json(input) = payload?;
    let comments = state.comments;
    let view =
        run_blocking(move || comments.update(&principal, &parse_comment_id(&id)?, input)).await?;
    Ok(Json(view))
}

/// `DELETE /comments/:id`
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let comments = state.comments;
    run_blocking(move || comments.delete(&principal, &parse_comment_id(&id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}
