//! Shared options for commands that train a learner

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::{ExperimentConfig, LearnerConfig, Preset};

/// Training and learner options shared by `train` and `play`
///
/// Unset flags fall back to the `--config` file, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ExperimentArgs {
    /// JSON experiment file with `learner` and `training` sections
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of training episodes [default: 150000]
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Named hyperparameter set
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Learning rate α (0.0-1.0)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Initial random action rate
    #[arg(long)]
    pub rar: Option<f64>,

    /// Random action decay rate applied after every step
    #[arg(long)]
    pub radr: Option<f64>,

    /// Dyna planning steps per real step
    #[arg(long)]
    pub dyna: Option<usize>,

    /// Steps before an unfinished episode is cancelled [default: 5000]
    #[arg(long)]
    pub step_limit: Option<usize>,

    /// Opponent's per-line chance of abandoning its blocking scan [default: 0.5]
    #[arg(long)]
    pub opponent_exit: Option<f64>,
}

impl ExperimentArgs {
    /// Merge defaults, the optional config file and command-line overrides
    pub fn resolve(&self) -> Result<ExperimentConfig> {
        let mut experiment = match &self.config {
            Some(path) => ExperimentConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        if let Some(preset) = self.preset {
            experiment.learner = LearnerConfig {
                model_capacity: experiment.learner.model_capacity,
                seed: experiment.learner.seed,
                ..LearnerConfig::from_preset(preset)
            };
        }

        let learner = &mut experiment.learner;
        if let Some(alpha) = self.alpha {
            learner.learning_rate = alpha;
        }
        if let Some(gamma) = self.gamma {
            learner.discount_factor = gamma;
        }
        if let Some(rar) = self.rar {
            learner.exploration_rate = rar;
        }
        if let Some(radr) = self.radr {
            learner.exploration_decay = radr;
        }
        if let Some(dyna) = self.dyna {
            learner.planning_steps = dyna;
        }

        let training = &mut experiment.training;
        if let Some(episodes) = self.episodes {
            training.episodes = episodes;
        }
        if let Some(step_limit) = self.step_limit {
            training.step_limit = step_limit;
        }
        if let Some(exit) = self.opponent_exit {
            training.opponent_exit_probability = exit;
        }
        if let Some(seed) = self.seed {
            training.seed = Some(seed);
            experiment.learner.seed = Some(seed);
        }

        experiment
            .validate()
            .context("invalid experiment configuration")?;
        Ok(experiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let experiment = ExperimentArgs::default().resolve().unwrap();
        assert_eq!(experiment, ExperimentConfig::default());
    }

    #[test]
    fn test_preset_then_overrides() {
        let args = ExperimentArgs {
            preset: Some(Preset::Dyna),
            dyna: Some(10),
            alpha: Some(0.5),
            seed: Some(9),
            ..ExperimentArgs::default()
        };
        let experiment = args.resolve().unwrap();
        assert_eq!(experiment.learner.planning_steps, 10);
        assert_eq!(experiment.learner.learning_rate, 0.5);
        assert_eq!(experiment.learner.exploration_rate, 0.5);
        assert_eq!(experiment.learner.seed, Some(9));
        assert_eq!(experiment.training.seed, Some(9));
    }

    #[test]
    fn test_flags_override_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("experiment.json");
        std::fs::write(
            &path,
            r#"{"training": {"episodes": 40, "step_limit": 7}, "learner": {"planning_steps": 3}}"#,
        )
        .unwrap();

        let args = ExperimentArgs {
            config: Some(path),
            episodes: Some(12),
            ..ExperimentArgs::default()
        };
        let experiment = args.resolve().unwrap();
        assert_eq!(experiment.training.episodes, 12);
        assert_eq!(experiment.training.step_limit, 7);
        assert_eq!(experiment.learner.planning_steps, 3);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = ExperimentArgs {
            gamma: Some(1.5),
            ..ExperimentArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
