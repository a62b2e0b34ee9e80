//! podmix CLI
//!
//! Generates a per-node pod report grouped by node pool: active pod
//! counts per namespace, category mix per node and per pool, rendered
//! as markdown (or JSON for machine consumption).

mod client;
mod output;
mod render;
mod roster;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use podmix_core::{build_report, RuleSet};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Node pool pod-mix report generator
#[derive(Parser)]
#[command(name = "podmix")]
#[command(author, version, about = "Per-node pod report grouped by node pool", long_about = None)]
pub struct Cli {
    /// Kubeconfig context to use (current context if not specified)
    #[arg(long, env = "PODMIX_CONTEXT")]
    pub context: Option<String>,

    /// Output file path (prints to stdout if not specified)
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Roster JSON file overriding the built-in node pool roster
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "markdown")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the report itself.
    let default_filter = if cli.verbose {
        "podmix_cli=debug,podmix_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let roster = roster::load(cli.roster.as_deref())?;
    let rules = RuleSet::default();

    let source = client::KubeWorkloadSource::connect(cli.context.as_deref()).await?;
    let context_label = cli
        .context
        .clone()
        .unwrap_or_else(|| "(kubeconfig current-context)".to_string());

    let report = build_report(&roster, &rules, &source, &context_label).await?;

    let rendered = match cli.format {
        output::OutputFormat::Markdown => render::to_markdown(&report, &rules),
        output::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };

    match &cli.out {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            output::print_success(&format!("Report written to {}", path.display()));
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
