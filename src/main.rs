//! support-desk - Role-based support ticket tracker
//!
//! Entry point for the `support-desk` binary. Parses arguments, sets up
//! logging and dispatches to the command handlers.

use anyhow::Context;
use clap::Parser;
use std::process;
use support_desk::cli::handlers::{
    HandlerContext, handle_bootstrap, handle_config_path, handle_config_show, handle_user_create,
    handle_user_list,
};
use support_desk::cli::{Cli, Commands, ConfigCommands, OutputFormatter, UserCommands};
use support_desk::services::NewUser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    init_tracing(cli.verbose);

    if let Err(e) = run(cli, formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, formatter: OutputFormatter) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    let ctx = HandlerContext::new(config_path, formatter).with_context(|| match config_path {
        Some(path) => format!("Failed to initialize from {}", path.display()),
        None => "Failed to initialize".to_string(),
    })?;

    match cli.command {
        #[cfg(feature = "api")]
        Commands::Serve { host, port } => {
            support_desk::cli::handlers::handle_serve(ctx, host, port).context("Server failed")?;
        },
        Commands::Bootstrap => handle_bootstrap(&ctx)?,
        Commands::User { command } => match command {
            UserCommands::Create {
                name,
                email,
                password,
                role,
            } => handle_user_create(
                &ctx,
                NewUser {
                    name,
                    email,
                    password,
                    role,
                },
            )?,
            UserCommands::List => handle_user_list(&ctx)?,
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => handle_config_show(&ctx)?,
            ConfigCommands::Path => handle_config_path(&ctx)?,
        },
    }
    Ok(())
}

/// Print the error chain, or a JSON error object with `--json`
fn handle_error(error: &anyhow::Error, formatter: &OutputFormatter) {
    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": format!("{error:#}"),
        }));
        return;
    }

    formatter.error(&error.to_string());
    for cause in error.chain().skip(1) {
        formatter.error(&format!("  caused by: {cause}"));
    }
}
