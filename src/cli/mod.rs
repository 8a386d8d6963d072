use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Storefront analytics rollup engine
#[derive(Parser)]
#[command(name = "storefront-analytics")]
#[command(about = "Dashboard sales series, product rankings and rating statistics")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run analytics over an exported order/product batch
    Analyse(commands::analysis::AnalyseCommand),
}

pub fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyse(command) => command.run(),
    }
}
