//! Train command - Train a Q-learner against the semi-random opponent

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use serde_json::to_writer_pretty;
use tracing::info;

use crate::{
    app::ExperimentConfig,
    cli::{config::ExperimentArgs, output::print_training_result},
    pipeline::{
        JsonlObserver, Learner, MetricsObserver, MetricsSummary, ProgressObserver, SharedObserver,
        TrainingPipeline, TrainingResult,
    },
    q_learning::QLearningAgent,
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    learner: &'a str,
    training: &'a TrainingResult,
    metrics: &'a MetricsSummary,
    config: &'a ExperimentConfig,
}

pub(crate) fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a learner", allow_negative_numbers = true)]
pub struct TrainArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL observations (one line per episode)
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Include every step of each episode in the observations file
    #[arg(long, default_value_t = false, requires = "observations")]
    pub trajectories: bool,

    /// Hide the progress bar
    #[arg(long = "no-progress", action = ArgAction::SetFalse)]
    pub progress: bool,
}

/// A trained learner together with what its run produced
pub struct TrainedLearner {
    pub agent: QLearningAgent,
    pub result: TrainingResult,
    pub metrics: MetricsSummary,
    pub experiment: ExperimentConfig,
}

/// Options controlling how a training run reports itself
#[derive(Debug, Clone, Default)]
pub struct RunOutputs<'a> {
    pub progress: bool,
    pub observations: Option<&'a Path>,
    pub trajectories: bool,
}

/// Build the learner and pipeline from resolved options and train it
pub fn train_learner(experiment: ExperimentConfig, outputs: RunOutputs<'_>) -> Result<TrainedLearner> {
    let mut agent = QLearningAgent::from_config(&experiment.learner)
        .context("failed to build learner")?;

    let metrics = SharedObserver::new(MetricsObserver::new());
    let mut pipeline = TrainingPipeline::new(experiment.training.clone())
        .context("failed to build training pipeline")?
        .with_observer(Box::new(metrics.clone()));

    if outputs.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    if let Some(path) = outputs.observations {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut observer = JsonlObserver::new(path)?;
        if outputs.trajectories {
            observer = observer.with_steps();
        }
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(&mut agent).context("training failed")?;
    let metrics = metrics.lock().summary();

    Ok(TrainedLearner {
        agent,
        result,
        metrics,
        experiment,
    })
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let experiment = args.experiment.resolve()?;

    let summary_target = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let trained = train_learner(
        experiment,
        RunOutputs {
            progress: args.progress,
            observations: args.observations.as_deref(),
            trajectories: args.trajectories,
        },
    )?;

    print_training_result(trained.agent.name(), &trained.result, &trained.metrics);

    if let Some(path) = &args.observations {
        println!("\nObservations written to {}", path.display());
    }

    if let Some((summary_path, normalized)) = summary_target {
        if normalized {
            println!("\nNormalizing summary path to {}", summary_path.display());
        }

        if let Some(parent) = summary_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let summary = TrainingSummaryFile {
            learner: trained.agent.name(),
            training: &trained.result,
            metrics: &trained.metrics,
            config: &trained.experiment,
        };
        let file = File::create(&summary_path)
            .with_context(|| format!("failed to create {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        info!(path = %summary_path.display(), "summary written");
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.txt")),
            PathBuf::from("out/run.json")
        );
        let dir = format!("out{}", std::path::MAIN_SEPARATOR);
        assert_eq!(
            sanitize_summary_path(Path::new(&dir)),
            PathBuf::from("out").join("training_summary.json")
        );
    }

    #[test]
    fn test_progress_flag_defaults_on() {
        let args = TrainArgs::parse_from(["noughts-train"]);
        assert!(args.progress);
        let args = TrainArgs::parse_from(["noughts-train", "--no-progress"]);
        assert!(!args.progress);
    }
}
