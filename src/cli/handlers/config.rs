use super::HandlerContext;
use crate::config::Config;
use crate::error::Result;

/// Handler for `config show`
///
/// Secrets are masked.
pub fn handle_config_show(ctx: &HandlerContext) -> Result<()> {
    let mut config = ctx.config.clone();
    config.auth.jwt_secret = "********".to_string();
    config.bootstrap.password = "********".to_string();

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&config)
    } else {
        ctx.formatter.info(serde_yaml::to_string(&config)?.trim_end());
        Ok(())
    }
}

/// Handler for `config path`
pub fn handle_config_path(ctx: &HandlerContext) -> Result<()> {
    let path = Config::default_path();
    if ctx.formatter.is_json() {
        return ctx.formatter.print_json(&serde_json::json!({ "path": path }));
    }
    match path {
        Some(path) => ctx.formatter.info(&path.display().to_string()),
        None => ctx.formatter.warning("No configuration directory on this platform"),
    }
    Ok(())
}
