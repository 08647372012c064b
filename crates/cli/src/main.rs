//! Bundle Resources CLI
//!
//! Reads the node and pod inventories of an extracted diagnostics bundle and
//! reports per-node CPU/memory requests and limits against allocatable
//! capacity.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::resources;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Bundle Resources CLI
#[derive(Parser)]
#[command(name = "bundle-resources")]
#[command(author, version, about = "Analyse resource usage in cluster diagnostics bundles", long_about = None)]
pub struct Cli {
    /// Output format (falls back to the config file, then table)
    #[arg(long, short, global = true)]
    pub format: Option<output::OutputFormat>,

    /// Node label holding the pool name
    #[arg(long, global = true)]
    pub pool_label: Option<String>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate pod requests and limits per node
    Resources {
        /// Path to the extracted bundle directory
        #[arg(long, env = "BUNDLE_DIR")]
        bundle_dir: PathBuf,
    },
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let config = config::Config::load()?;
    let settings = config.analysis_settings(cli.pool_label.clone());
    let format = cli.format.unwrap_or_else(|| config.output_format());

    match cli.command {
        Commands::Resources { bundle_dir } => {
            info!(
                bundle = %bundle_dir.display(),
                pool_label = %settings.pool_label_key,
                "Analysing bundle"
            );
            resources::show_resources(&bundle_dir, &settings, format)?;
        }
    }

    Ok(())
}
