//! Application layer: learner hyperparameters and experiment files.
//!
//! ```
//! use noughts::app::{ExperimentConfig, LearnerConfig};
//! use noughts::q_learning::QLearningAgent;
//!
//! let experiment = ExperimentConfig {
//!     learner: LearnerConfig::dyna().with_seed(7),
//!     ..ExperimentConfig::default()
//! };
//! let agent = QLearningAgent::from_config(&experiment.learner)?;
//! # Ok::<(), noughts::Error>(())
//! ```

pub mod config;

pub use config::{ExperimentConfig, LearnerConfig, Preset};
