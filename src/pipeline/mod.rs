//! Training and play pipelines
//!
//! This module provides:
//! - The episode-based training loop against the semi-random opponent
//! - Observers recording progress, metrics and per-episode data
//! - The interactive human-vs-learner session

pub mod observers;
pub mod session;
pub mod training;

pub use observers::{
    EpisodeLine, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver, SharedObserver,
};
pub use session::{GameReport, InteractiveSession, verdict};
pub use training::{
    EpisodeResult, EpisodeSummary, StepRecord, TrainingConfig, TrainingPipeline, TrainingResult,
};

pub use crate::ports::{Learner, Observer};
