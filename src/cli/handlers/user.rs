use super::HandlerContext;
use crate::core::{Role, UserSummary};
use crate::error::Result;
use crate::services::{NewUser, UserService};
use colored::Colorize;
use std::sync::Arc;

/// Handler for `user create`
///
/// Runs with operator rights: no session is involved.
pub fn handle_user_create(ctx: &HandlerContext, input: NewUser) -> Result<()> {
    let users = UserService::new(Arc::clone(&ctx.storage));
    let summary = users.register(input)?.summary();

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&summary)
    } else {
        ctx.formatter.success(&format!(
            "Created {} account {} ({})",
            summary.role, summary.email, summary.id
        ));
        Ok(())
    }
}

/// Handler for `user list`
pub fn handle_user_list(ctx: &HandlerContext) -> Result<()> {
    use crate::storage::UserRepository;

    let users: Vec<UserSummary> = ctx
        .storage
        .load_all_users()?
        .iter()
        .map(crate::core::User::summary)
        .collect();

    if ctx.formatter.is_json() {
        return ctx.formatter.print_json(&users);
    }
    if users.is_empty() {
        ctx.formatter.info("No users found");
        return Ok(());
    }
    for user in &users {
        ctx.formatter.info(&format!(
            "{}  {:<8} {} <{}>",
            user.id.short().as_str().dimmed(),
            role_label(user.role),
            user.name,
            user.email
        ));
    }
    Ok(())
}

fn role_label(role: Role) -> colored::ColoredString {
    match role {
        Role::Manager => role.as_str().magenta(),
        Role::Support => role.as_str().cyan(),
        Role::User => role.as_str().normal(),
    }
}
