//! Noughts CLI - train a tic-tac-toe Q-learner and play against it
//!
//! This CLI provides:
//! - Training with a summary table and optional JSON/JSONL output
//! - Interactive play against the freshly trained learner

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Tic-tac-toe reinforcement learning sandbox", long_about = None)]
struct Cli {
    /// Log per-episode detail (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a learner against the semi-random opponent
    Train(Box<noughts::cli::commands::train::TrainArgs>),

    /// Train a learner, then play against it on stdin/stdout
    Play(Box<noughts::cli::commands::play::PlayArgs>),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "info" });

    match cli.command {
        Commands::Train(args) => noughts::cli::commands::train::execute(*args),
        Commands::Play(args) => noughts::cli::commands::play::execute(*args),
    }
}
