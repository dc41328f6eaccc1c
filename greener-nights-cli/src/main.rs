mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use greener_nights_core::SyncConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "greener-nights")]
#[command(about = "Merge the greener nights feed into a calendar that keeps its history")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Used when no subcommand is given (same as `sync`)
    #[command(flatten)]
    paths: PathArgs,
}

#[derive(Args)]
struct PathArgs {
    /// Forecast feed to read (JSON)
    input: Option<PathBuf>,

    /// Calendar file to update (.ics)
    store: Option<PathBuf>,

    /// List every record, not just the changed ones
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the feed into the calendar file
    Sync(PathArgs),
    /// Show what a sync would change, without writing
    Status(PathArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Sync(cli.paths)) {
        Commands::Sync(args) => {
            let config = resolve_config(&args)?;
            commands::sync::run(&config, args.verbose)
        }
        Commands::Status(args) => {
            let config = resolve_config(&args)?;
            commands::status::run(&config, args.verbose)
        }
    }
}

/// Config file and environment, overridden by paths given on the command line.
fn resolve_config(args: &PathArgs) -> Result<SyncConfig> {
    let config = SyncConfig::load()?.with_paths(args.input.clone(), args.store.clone());
    tracing::debug!(
        input = %config.input_path().display(),
        store = %config.store_path().display(),
        "resolved paths"
    );
    Ok(config)
}
