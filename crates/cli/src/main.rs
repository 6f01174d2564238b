//! Resource Estimator CLI
//!
//! Sizes a self-hosted deployment from a handful of business metrics,
//! either locally from the built-in calibration catalogue or through a
//! running estimator service.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{curves, estimate};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Resource Estimator CLI
#[derive(Parser)]
#[command(name = "rse")]
#[command(author, version, about = "CLI for the Resource Estimator", long_about = None)]
pub struct Cli {
    /// Estimator service URL for --remote (can also be set via RSE_API_URL env var)
    #[arg(long, env = "RSE_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate resources for a deployment
    Estimate(estimate::EstimateArgs),

    /// List the calibration curves behind the estimates
    Curves {
        /// Fetch the catalogue from the estimator service
        #[arg(long)]
        remote: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Estimate(args) => {
            estimate::run(args, &cli.api_url, cli.format).await?;
        }
        Commands::Curves { remote } => {
            curves::run(remote, &cli.api_url, cli.format).await?;
        }
    }

    Ok(())
}
