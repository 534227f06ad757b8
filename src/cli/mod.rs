//! Command-line interface
//!
//! The binary is an operator tool: it runs the HTTP server and performs
//! account administration directly against the storage directory.

pub mod handlers;
mod output;

pub use output::OutputFormatter;

use crate::core::Role;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Role-based support ticket tracker
#[derive(Parser, Debug)]
#[command(name = "support-desk", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    #[cfg(feature = "api")]
    Serve {
        /// Override the configured listen host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create the default manager account if no manager exists
    Bootstrap,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create an account
    Create {
        /// Display name
        #[arg(long)]
        name: String,

        /// Login email
        #[arg(long)]
        email: String,

        /// Initial password
        #[arg(long, env = "DESK_USER_PASSWORD", hide_env_values = true)]
        password: String,

        /// MANAGER, SUPPORT or USER
        #[arg(long, default_value = "USER")]
        role: Role,
    },

    /// List accounts
    List,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the default configuration file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_user_create_parses_role() {
        let cli = Cli::try_parse_from([
            "support-desk",
            "user",
            "create",
            "--name",
            "Sam",
            "--email",
            "sam@example.com",
            "--password",
            "secret1",
            "--role",
            "support",
        ])
        .unwrap();

        match cli.command {
            Commands::User {
                command: UserCommands::Create { role, .. },
            } => assert_eq!(role, Role::Support),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = Cli::try_parse_from([
            "support-desk",
            "user",
            "create",
            "--name",
            "Sam",
            "--email",
            "sam@example.com",
            "--password",
            "secret1",
            "--role",
            "ADMIN",
        ]);
        assert!(result.is_err());
    }
}
