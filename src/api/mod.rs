//! HTTP interface
//!
//! A thin axum layer over the services: handlers authenticate the caller,
//! parse path and body, run the service call on the blocking pool and map
//! [`DeskError`] onto status codes through [`ApiError`].

mod error;
mod extract;
pub mod handlers;

pub use error::{ApiError, status_for};
pub use extract::AuthenticatedPrincipal;

use crate::auth::{Authenticator, TokenIssuer};
use crate::error::DeskError;
use crate::services::{CommentService, TicketService, UserService};
use crate::storage::FileStorage;
use axum::Router;
use axum::routing::{get, patch, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub tickets: TicketService<FileStorage>,
    pub comments: CommentService<FileStorage>,
    pub users: UserService<FileStorage>,
    pub auth: Authenticator<FileStorage>,
}

impl AppState {
    pub fn new(storage: Arc<FileStorage>, tokens: TokenIssuer) -> Self {
        Self {
            tickets: TicketService::new(Arc::clone(&storage)),
            comments: CommentService::new(Arc::clone(&storage)),
            users: UserService::new(Arc::clone(&storage)),
            auth: Authenticator::new(storage, tokens),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    use self::handlers::{auth, comments, tickets, users};

    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/login", post(auth::login))
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/tickets", post(tickets::create_ticket).get(tickets::list_tickets))
        .route(
            "/tickets/:id",
            get(tickets::get_ticket).delete(tickets::delete_ticket),
        )
        .route("/tickets/:id/assign", patch(tickets::assign_ticket))
        .route("/tickets/:id/status", patch(tickets::update_status))
        .route("/tickets/:id/history", get(tickets::ticket_history))
        .route(
            "/tickets/:id/comments",
            post(comments::add_comment).get(comments::list_comments),
        )
        .route(
            "/comments/:id",
            patch(comments::update_comment).delete(comments::delete_comment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run a storage-bound service call off the async executor
pub(crate) async fn run_blocking<T, F>(job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => Err(DeskError::custom(format!("Worker task failed: {e}")).into()),
    }
}
