//! Configuration types for learner creation and experiment files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, pipeline::TrainingConfig};

/// Hyperparameters of the tabular Q-learner.
///
/// # Examples
///
/// ```
/// use noughts::app::LearnerConfig;
///
/// let config = LearnerConfig::standard()
///     .with_planning_steps(20)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Initial probability of a random action
    pub exploration_rate: f64,
    /// Multiplier applied to the exploration rate after every step
    pub exploration_decay: f64,
    /// Simulated updates replayed from memory after every real step
    pub planning_steps: usize,
    /// Transitions kept for planning
    pub model_capacity: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

/// Named hyperparameter sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Plain Q-learning with slow exploration decay
    #[default]
    Standard,
    /// Dyna-Q with 100 planning steps and faster decay
    Dyna,
}

impl LearnerConfig {
    /// Plain Q-learning: α 0.2, γ 0.9, exploration 0.9 decaying by 0.999
    pub fn standard() -> Self {
        Self {
            learning_rate: 0.2,
            discount_factor: 0.9,
            exploration_rate: 0.9,
            exploration_decay: 0.999,
            planning_steps: 0,
            model_capacity: 100_000,
            seed: None,
        }
    }

    /// Dyna-Q: α 0.2, γ 0.9, exploration 0.5 decaying by 0.99, 100 planning steps
    pub fn dyna() -> Self {
        Self {
            exploration_rate: 0.5,
            exploration_decay: 0.99,
            planning_steps: 100,
            ..Self::standard()
        }
    }

    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Standard => Self::standard(),
            Preset::Dyna => Self::dyna(),
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_exploration(mut self, rate: f64, decay: f64) -> Self {
        self.exploration_rate = rate;
        self.exploration_decay = decay;
        self
    }

    pub fn with_planning_steps(mut self, steps: usize) -> Self {
        self.planning_steps = steps;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every rate lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let unit = [
            ("learning_rate", self.learning_rate),
            ("discount_factor", self.discount_factor),
            ("exploration_rate", self.exploration_rate),
            ("exploration_decay", self.exploration_decay),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} {value} must be within [0, 1]"),
                });
            }
        }
        if self.planning_steps > 0 && self.model_capacity == 0 {
            return Err(Error::InvalidConfiguration {
                message: "model_capacity must be positive when planning is enabled".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Everything needed to reproduce a training run, loadable from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub learner: LearnerConfig,
    pub training: TrainingConfig,
}

impl ExperimentConfig {
    /// Load an experiment from a JSON file; missing fields take defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| Error::io(format!("open config {}", path.display()), e))?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the experiment as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| Error::io(format!("create config {}", path.display()), e))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.learner.validate()?;
        self.training.validate()
    }
}
