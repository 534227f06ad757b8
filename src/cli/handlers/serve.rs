use super::HandlerContext;
use crate::api::{AppState, router};
use crate::auth::TokenIssuer;
use crate::error::{DeskError, Result};
use crate::services::UserService;
use std::sync::Arc;
use tracing::{info, warn};

/// Handler for the `serve` command
///
/// Ensures a manager account exists, then serves the API until the process
/// receives Ctrl-C.
pub fn handle_serve(mut ctx: HandlerContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        ctx.config.server.host = host;
    }
    if let Some(port) = port {
        ctx.config.server.port = port;
    }

    if ctx.config.uses_default_secret() {
        warn!("auth.jwt_secret is the built-in default; set DESK__AUTH__JWT_SECRET");
    }

    let users = UserService::new(Arc::clone(&ctx.storage));
    if let Some(manager) = users.ensure_default_manager(&ctx.config.bootstrap)? {
        ctx.formatter
            .warning(&format!("Created default manager {}; change its password", manager.email));
    }

    let state = AppState::new(
        Arc::clone(&ctx.storage),
        TokenIssuer::from_config(&ctx.config.auth),
    );
    let address = ctx.config.server.bind_address();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&address).await?;
        info!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok::<(), DeskError>(())
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
