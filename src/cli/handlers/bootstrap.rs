use super::HandlerContext;
use crate::error::Result;
use crate::services::UserService;
use std::sync::Arc;

/// Handler for the `bootstrap` command
///
/// Creates the configured manager account when the store has no manager.
/// Running it again is a no-op.
pub fn handle_bootstrap(ctx: &HandlerContext) -> Result<()> {
    let users = UserService::new(Arc::clone(&ctx.storage));
    let created = users.ensure_default_manager(&ctx.config.bootstrap)?;

    if ctx.formatter.is_json() {
        return ctx.formatter.print_json(&serde_json::json!({
            "created": created.is_some(),
            "user": created,
        }));
    }

    match created {
        Some(user) => ctx
            .formatter
            .success(&format!("Created manager account {} ({})", user.email, user.id)),
        None => ctx.formatter.info("A manager account already exists"),
    }
    Ok(())
}
