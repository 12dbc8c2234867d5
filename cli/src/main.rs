mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{calibrate, interval};
use tracing_subscriber::EnvFilter;

/// Log to stderr; `RUST_LOG` overrides the level picked by `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("openmander_ensemble={level},openmander_ensemble_cli={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match &cli.command {
        Commands::Calibrate(args) => calibrate::run(&cli, args),
        Commands::Interval(args) => interval::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
