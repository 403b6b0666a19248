//! Observer port - abstraction for training observation and data collection
//!
//! Observers let the training loop report progress and per-episode data
//! without knowing about progress bars, files or metrics.

use crate::{
    Result,
    pipeline::training::{EpisodeSummary, StepRecord, TrainingResult},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - For each two-ply step
///    - `on_episode_end(summary)`
/// 3. `on_training_end(result)` - Once at the end
///
/// Every hook defaults to doing nothing.
///
/// # Examples
///
/// ```no_run
/// use noughts::{pipeline::EpisodeSummary, ports::Observer};
///
/// struct CountingObserver {
///     episodes: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> noughts::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts with the number of episodes to run.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called before an episode is reset (index is 0-based).
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each step once the learner has been told the reward.
    fn on_step(&mut self, _episode: usize, _step: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal outcome or the step limit.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to flush files or display summaries.
    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        Ok(())
    }
}
