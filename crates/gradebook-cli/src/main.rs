//! gradebook CLI — interactive console over an in-memory student roster.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gradebook_core::{load_config_from, RosterStore};

mod render;
mod shell;

use render::{OutputFormat, Renderer};
use shell::Shell;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Interactive student grade management"
)]
struct Cli {
    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of subjects per student (overrides config)
    #[arg(long)]
    subjects: Option<usize>,

    /// Output format: table, json
    #[arg(long, default_value = "table")]
    format: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gradebook_core=warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let config = load_config_from(cli.config.as_deref(), cli.subjects)?;

    let store = RosterStore::new(config.roster)?;
    let renderer = Renderer::new(format, config.precision);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(store, renderer, stdin.lock(), stdout.lock());
    let count = shell.run()?;
    tracing::info!(count, "session finished");

    Ok(())
}
