use crate::api::{ApiError, AppState, AuthenticatedPrincipal, run_blocking};
use crate::policy::Action;
use crate::services::{
    Assignment, NewTicket, StatusChange, StatusLogView, TicketView, parse_ticket_id,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

/// `POST /tickets`
pub async fn create_ticket(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    payload: Result<Json<NewTicket>, JsonRejection>,
) -> Result<(StatusCode, Json<TicketView>), ApiError> {
    principal.require(Action::CreateTicket)?;
    let Json(input) = payload?;
    let tickets = state.tickets;
    let view = run_blocking(move || tickets.create(&principal, input)).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /tickets`
pub async fn list_tickets(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<Vec<TicketView>>, ApiError> {
    let tickets = state.tickets;
    let views = run_blocking(move || tickets.list(&principal)).await?;
    Ok(Json(views))
}

/// `GET /tickets/:id`
pub async fn get_ticket(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(id): Path<String>,
) -> Result<Json<TicketView>, ApiError> {
    let tickets = state.tickets;
    let view = run_blocking(move || tickets.get(&principal, &parse_ticket_id(&id)?)).await?;
    Ok(Json(view))
}

/// `PATCH /tickets/:id/assign`
pub async fn assign_ticket(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(id): Path<String>,
    payload: Result<Json<Assignment>, JsonRejection>,
) -> Result<Json<TicketView>, ApiError> {
    principal.require(Action::AssignTicket)?;
    let Json(input) = payload?;
    let tickets = state.tickets;
    let view =
        run_blocking(move || tickets.assign(&principal, &parse_ticket_id(&id)?, &input)).await?;
    Ok(Json(view))
}

/// `PATCH /tickets/:id/status`
pub async fn update_status(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(id): Path<String>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> Result<Json<TicketView>, ApiError> {
    principal.require(Action::ChangeStatus)?;
    let Json(change) = payload?;
    let tickets = state.tickets;
    let view = run_blocking(move || {
        tickets.update_status(&principal, &parse_ticket_id(&id)?, change)
    })
    .await?;
    Ok(Json(view))
}

/// `DELETE /tickets/:id`
pub async fn delete_ticket(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let tickets = state.tickets;
    run_blocking(move || tickets.delete(&principal, &parse_ticket_id(&id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /tickets/:id/history`
pub async fn ticket_history(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(id): Path<String>,
) -> Result<Json<Vec<StatusLogView>>, ApiError> {
    let tickets = state.tickets;
    let entries = run_blocking(move || tickets.history(&principal, &parse_ticket_id(&id)?)).await?;
    Ok(Json(entries))
}
