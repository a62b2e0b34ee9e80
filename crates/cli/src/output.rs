//! Output format selection and status lines

use clap::ValueEnum;
use colored::Colorize;

/// Output format for the rendered report
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Markdown report (default)
    #[default]
    Markdown,
    /// JSON dump of the report structure
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}
