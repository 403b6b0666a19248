//! Play command - Train a learner, then play it from the terminal

use std::io;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use crate::{
    cli::{
        commands::train::{RunOutputs, train_learner},
        config::ExperimentArgs,
        output::{print_kv, print_section, print_training_result},
    },
    pipeline::{InteractiveSession, Learner, session::DEFAULT_RETRY_LIMIT},
    tictactoe::Outcome,
};

#[derive(Parser, Debug)]
#[command(about = "Train a learner and play against it", allow_negative_numbers = true)]
pub struct PlayArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Learner attempts per turn before the game is cancelled
    #[arg(long, default_value_t = DEFAULT_RETRY_LIMIT)]
    pub retry_limit: usize,

    /// Hide the training progress bar
    #[arg(long = "no-progress", action = ArgAction::SetFalse)]
    pub progress: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let experiment = args.experiment.resolve()?;
    let mut trained = train_learner(
        experiment,
        RunOutputs {
            progress: args.progress,
            ..RunOutputs::default()
        },
    )?;
    print_training_result(trained.agent.name(), &trained.result, &trained.metrics);

    println!("\nYou play O. Enter a cell 0-8 (row-major); end input to quit.");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let reports = InteractiveSession::new(&mut trained.agent, stdin.lock(), stdout.lock())
        .with_retry_limit(args.retry_limit)
        .run()
        .context("interactive session failed")?;

    let count = |outcome: Outcome| reports.iter().filter(|r| r.outcome == outcome).count();
    print_section("Session");
    print_kv("Robot wins", &count(Outcome::FirstPlayerWin).to_string());
    print_kv("Player wins", &count(Outcome::SecondPlayerWin).to_string());
    print_kv("Draws", &count(Outcome::Draw).to_string());
    print_kv("Cancelled", &count(Outcome::Active).to_string());

    Ok(())
}
