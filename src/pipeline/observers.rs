//! Observer implementations for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the training loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::{EpisodeResult, EpisodeSummary, StepRecord, TrainingResult};
use crate::{Error, Result, ports::Observer};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
    draws: usize,
    cancelled: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
            draws: 0,
            cancelled: 0,
        }
    }

    fn message(&self) -> String {
        format!(
            "W:{} L:{} D:{} C:{}",
            self.wins, self.losses, self.draws, self.cancelled
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match summary.result {
            EpisodeResult::Win => self.wins += 1,
            EpisodeResult::Loss => self.losses += 1,
            EpisodeResult::Draw => self.draws += 1,
            EpisodeResult::Cancelled => self.cancelled += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            // Redrawing the message every episode dominates short episodes.
            if summary.episode.is_multiple_of(256) {
                pb.set_message(self.message());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
pub struct MetricsObserver {
    results: Vec<EpisodeResult>,
    episode_lengths: Vec<usize>,
    episode_rewards: Vec<i64>,
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub cancelled: usize,
    pub win_rate: f64,
    pub avg_episode_length: f64,
    pub avg_episode_reward: f64,
    /// Win rate over the last [`MetricsObserver::RECENT_WINDOW`] episodes
    pub recent_win_rate: f64,
}

impl MetricsObserver {
    /// Episodes considered by [`MetricsObserver::recent_win_rate`]
    pub const RECENT_WINDOW: usize = 1_000;

    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            episode_lengths: Vec::new(),
            episode_rewards: Vec::new(),
        }
    }

    fn count(&self, result: EpisodeResult) -> usize {
        self.results.iter().filter(|&&r| r == result).count()
    }

    fn win_fraction(results: &[EpisodeResult]) -> f64 {
        if results.is_empty() {
            0.0
        } else {
            let wins = results
                .iter()
                .filter(|&&r| r == EpisodeResult::Win)
                .count();
            wins as f64 / results.len() as f64
        }
    }

    /// Get current win rate
    pub fn win_rate(&self) -> f64 {
        Self::win_fraction(&self.results)
    }

    /// Win rate over the most recent episodes only
    pub fn recent_win_rate(&self) -> f64 {
        let start = self.results.len().saturating_sub(Self::RECENT_WINDOW);
        Self::win_fraction(&self.results[start..])
    }

    /// Get average episode length in steps
    pub fn avg_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f64 / self.episode_lengths.len() as f64
        }
    }

    /// Get average reward per episode
    pub fn avg_episode_reward(&self) -> f64 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<i64>() as f64 / self.episode_rewards.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.results.len(),
            wins: self.count(EpisodeResult::Win),
            losses: self.count(EpisodeResult::Loss),
            draws: self.count(EpisodeResult::Draw),
            cancelled: self.count(EpisodeResult::Cancelled),
            win_rate: self.win_rate(),
            avg_episode_length: self.avg_episode_length(),
            avg_episode_reward: self.avg_episode_reward(),
            recent_win_rate: self.recent_win_rate(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.results.push(summary.result);
        self.episode_lengths.push(summary.steps);
        self.episode_rewards.push(summary.total_reward);
        Ok(())
    }
}

/// Handle that lets an observer be read back after the pipeline owns it
///
/// Clone the handle, box one copy into the pipeline and keep the other.
pub struct SharedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O> SharedObserver<O> {
    pub fn new(observer: O) -> Self {
        Self {
            inner: Arc::new(Mutex::new(observer)),
        }
    }

    /// Lock the wrapped observer. A panic in another holder does not hide
    /// the data collected so far.
    pub fn lock(&self) -> MutexGuard<'_, O> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O> Clone for SharedObserver<O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O: Observer> Observer for SharedObserver<O> {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.lock().on_training_start(total_episodes)
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.lock().on_episode_start(episode)
    }

    fn on_step(&mut self, episode: usize, step: &StepRecord) -> Result<()> {
        self.lock().on_step(episode, step)
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.lock().on_episode_end(summary)
    }

    fn on_training_end(&mut self, result: &TrainingResult) -> Result<()> {
        self.lock().on_training_end(result)
    }
}

/// Per-episode line written by [`JsonlObserver`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeLine {
    #[serde(flatten)]
    pub summary: EpisodeSummary,
    /// Steps of the episode, only kept when step recording is enabled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trajectory: Vec<StepRecord>,
}

/// JSONL observer - Exports one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
    record_steps: bool,
    current_steps: Vec<StepRecord>,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create {}", path.display()), e))?;
        Ok(Self {
            writer: BufWriter::new(file),
            record_steps: false,
            current_steps: Vec::new(),
        })
    }

    /// Also write every step of each episode
    pub fn with_steps(mut self) -> Self {
        self.record_steps = true;
        self
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, step: &StepRecord) -> Result<()> {
        if self.record_steps {
            self.current_steps.push(step.clone());
        }
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        let line = EpisodeLine {
            summary: summary.clone(),
            trajectory: std::mem::take(&mut self.current_steps),
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        writeln!(self.writer).map_err(|e| Error::io("write observation", e))?;
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::io("flush observations", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{Board, Outcome};

    fn summary(episode: usize, result: EpisodeResult, steps: usize, reward: i64) -> EpisodeSummary {
        let outcome = match result {
            EpisodeResult::Win => Outcome::FirstPlayerWin,
            EpisodeResult::Loss => Outcome::SecondPlayerWin,
            EpisodeResult::Draw => Outcome::Draw,
            EpisodeResult::Cancelled => Outcome::Active,
        };
        EpisodeSummary {
            episode,
            result,
            outcome,
            steps,
            total_reward: reward,
            final_board: Board::new(),
        }
    }

    #[test]
    fn test_metrics_observer_summary() {
        let mut metrics = MetricsObserver::new();
        metrics
            .on_episode_end(&summary(0, EpisodeResult::Win, 3, -1))
            .unwrap();
        metrics
            .on_episode_end(&summary(1, EpisodeResult::Loss, 3, -7))
            .unwrap();
        metrics
            .on_episode_end(&summary(2, EpisodeResult::Cancelled, 6, -6))
            .unwrap();

        let s = metrics.summary();
        assert_eq!(s.total_episodes, 3);
        assert_eq!(s.wins, 1);
        assert_eq!(s.losses, 1);
        assert_eq!(s.cancelled, 1);
        assert_eq!(s.avg_episode_length, 4.0);
        assert!((s.avg_episode_reward - (-14.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_recent_win_rate_uses_window() {
        let mut metrics = MetricsObserver::new();
        for i in 0..MetricsObserver::RECENT_WINDOW {
            metrics
                .on_episode_end(&summary(i, EpisodeResult::Loss, 3, -7))
                .unwrap();
        }
        for i in 0..MetricsObserver::RECENT_WINDOW {
            metrics
                .on_episode_end(&summary(i, EpisodeResult::Win, 3, -1))
                .unwrap();
        }
        assert_eq!(metrics.win_rate(), 0.5);
        assert_eq!(metrics.recent_win_rate(), 1.0);
    }

    #[test]
    fn test_shared_observer_reads_back() {
        let shared = SharedObserver::new(MetricsObserver::new());
        let mut boxed: Box<dyn Observer> = Box::new(shared.clone());
        boxed
            .on_episode_end(&summary(0, EpisodeResult::Draw, 5, -5))
            .unwrap();
        drop(boxed);
        assert_eq!(shared.lock().summary().draws, 1);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = MetricsObserver::default();
        assert_eq!(metrics.win_rate(), 0.0);
        assert_eq!(metrics.recent_win_rate(), 0.0);
        assert_eq!(metrics.avg_episode_length(), 0.0);
    }
}
