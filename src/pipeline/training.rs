//! Episode-based training loop

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    ports::{Learner, Observer},
    tictactoe::{Board, Mark, OpponentPolicy, Outcome, StateId, apply, classify, encode, opponent},
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Steps after which a still-active episode is abandoned
    pub step_limit: usize,

    /// Random seed for the learner and opponent
    pub seed: Option<u64>,

    /// Opponent's per-line chance of abandoning its heuristic scan
    pub opponent_exit_probability: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 150_000,
            step_limit: 5_000,
            seed: None,
            opponent_exit_probability: opponent::DEFAULT_EXIT_PROBABILITY,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.step_limit == 0 {
            return Err(Error::InvalidConfiguration {
                message: "step_limit must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.opponent_exit_probability) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "opponent_exit_probability {} must be within [0, 1]",
                    self.opponent_exit_probability
                ),
            });
        }
        Ok(())
    }
}

/// How an episode ended, from the learner's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeResult {
    Win,
    Loss,
    Draw,
    /// Step limit reached while the game was still active
    Cancelled,
}

impl From<Outcome> for EpisodeResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::FirstPlayerWin => EpisodeResult::Win,
            Outcome::SecondPlayerWin => EpisodeResult::Loss,
            Outcome::Draw => EpisodeResult::Draw,
            Outcome::Active => EpisodeResult::Cancelled,
        }
    }
}

/// One learner action and its consequences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step index within the episode (0-based)
    pub step: usize,
    /// Cell the learner chose
    pub action: usize,
    /// Board after the learner's placement and the opponent's reply
    pub board: Board,
    pub outcome: Outcome,
    pub reward: i32,
}

/// Summary of a finished episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub result: EpisodeResult,
    pub outcome: Outcome,
    pub steps: usize,
    pub total_reward: i64,
    pub final_board: Board,
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    pub wins: usize,
    pub losses: usize,
    pub draws: usize,

    /// Episodes abandoned at the step limit
    pub cancelled: usize,

    pub win_rate: f64,
    pub loss_rate: f64,
    pub draw_rate: f64,
    pub cancelled_rate: f64,

    /// Sum of all step rewards
    pub total_reward: i64,

    /// Mean reward per episode
    pub mean_reward: f64,

    /// Mean steps per episode
    pub mean_steps: f64,

    /// Wall-clock training time in seconds
    pub elapsed_secs: f64,
}

/// Running counters for a training run
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    episodes: usize,
    wins: usize,
    losses: usize,
    draws: usize,
    cancelled: usize,
    total_reward: i64,
    total_steps: usize,
}

impl Tally {
    fn record(&mut self, summary: &EpisodeSummary) {
        self.episodes += 1;
        self.total_reward += summary.total_reward;
        self.total_steps += summary.steps;
        match summary.result {
            EpisodeResult::Win => self.wins += 1,
            EpisodeResult::Loss => self.losses += 1,
            EpisodeResult::Draw => self.draws += 1,
            EpisodeResult::Cancelled => self.cancelled += 1,
        }
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    }
}

impl TrainingResult {
    fn from_tally(tally: &Tally, elapsed: Duration) -> Self {
        let total = tally.episodes;
        Self {
            total_episodes: total,
            wins: tally.wins,
            losses: tally.losses,
            draws: tally.draws,
            cancelled: tally.cancelled,
            win_rate: ratio(tally.wins, total),
            loss_rate: ratio(tally.losses, total),
            draw_rate: ratio(tally.draws, total),
            cancelled_rate: ratio(tally.cancelled, total),
            total_reward: tally.total_reward,
            mean_reward: if total > 0 {
                tally.total_reward as f64 / total as f64
            } else {
                0.0
            },
            mean_steps: ratio(tally.total_steps, total),
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| Error::io(format!("create {}", path.display()), e))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| Error::io(format!("open {}", path.display()), e))?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline driving one learner against the semi-random opponent
pub struct TrainingPipeline {
    config: TrainingConfig,
    opponent: OpponentPolicy,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let opponent = match config.seed {
            Some(seed) => OpponentPolicy::with_seed(seed.wrapping_add(1)),
            None => OpponentPolicy::new(),
        }
        .with_exit_probability(config.opponent_exit_probability)?;

        Ok(Self {
            config,
            opponent,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run every configured episode with `learner` playing first.
    ///
    /// Cancelled episodes are counted and training moves on; only learner
    /// and observer errors stop the run.
    pub fn run(&mut self, learner: &mut dyn Learner) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed)?;
        }

        info!(
            learner = learner.name(),
            episodes = self.config.episodes,
            step_limit = self.config.step_limit,
            "training started"
        );

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let start = Instant::now();
        let mut tally = Tally::default();

        for episode in 0..self.config.episodes {
            let summary = self.run_episode(episode, learner)?;
            tally.record(&summary);

            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
        }

        let result = TrainingResult::from_tally(&tally, start.elapsed());

        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }

        info!(
            wins = result.wins,
            losses = result.losses,
            draws = result.draws,
            cancelled = result.cancelled,
            elapsed_secs = result.elapsed_secs,
            "training finished"
        );

        Ok(result)
    }

    /// Play a single episode from the empty board.
    pub fn run_episode(
        &mut self,
        episode: usize,
        learner: &mut dyn Learner,
    ) -> Result<EpisodeSummary> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut board = Board::new();
        let mut state: StateId = encode(&board);
        let mut action = learner.initialize_episode(state)?;
        let mut outcome = Outcome::Active;
        let mut steps = 0;
        let mut total_reward: i64 = 0;

        while outcome == Outcome::Active && steps < self.config.step_limit {
            let taken = action;
            board = apply(state, taken, Some(&mut self.opponent), Mark::First)?;
            state = encode(&board);
            outcome = classify(&board);
            let reward = outcome.reward();

            action = learner.observe(state, reward)?;
            total_reward += i64::from(reward);

            let record = StepRecord {
                step: steps,
                action: taken,
                board,
                outcome,
                reward,
            };
            for observer in &mut self.observers {
                observer.on_step(episode, &record)?;
            }

            steps += 1;
        }

        let result = EpisodeResult::from(outcome);
        if result == EpisodeResult::Cancelled {
            warn!(
                episode,
                steps,
                board = %board,
                "episode hit the step limit while still active"
            );
        } else {
            debug!(episode, steps, total_reward, outcome = %outcome, "episode finished");
        }

        Ok(EpisodeSummary {
            episode,
            result,
            outcome,
            steps,
            total_reward,
            final_board: board,
        })
    }
}
