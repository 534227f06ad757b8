use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Human or JSON output for CLI commands
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    #[must_use]
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{} {message}", "✓".green().bold());
        }
    }

    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {message}", "warning:".yellow().bold());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {message}", "error:".red().bold());
    }

    /// Pretty-print `value` as JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
