//! End-to-end training runs through the public pipeline API

use std::io::{BufRead, BufReader};

use noughts::{
    app::LearnerConfig,
    pipeline::{
        EpisodeLine, EpisodeResult, JsonlObserver, Learner, MetricsObserver, SharedObserver,
        TrainingConfig, TrainingPipeline,
    },
    q_learning::QLearningAgent,
    tictactoe::{StateId, decode},
};
use tempfile::tempdir;

/// Always plays the lowest empty cell of the state it was shown.
struct LowestEmpty;

impl LowestEmpty {
    fn pick(state: StateId) -> usize {
        decode(state).empty_positions().first().copied().unwrap_or(0)
    }
}

impl Learner for LowestEmpty {
    fn initialize_episode(&mut self, state: StateId) -> noughts::Result<usize> {
        Ok(Self::pick(state))
    }

    fn observe(&mut self, state: StateId, _reward: i32) -> noughts::Result<usize> {
        Ok(Self::pick(state))
    }

    fn name(&self) -> &str {
        "lowest-empty"
    }
}

/// Opens in the corner and then keeps asking for that same corner.
struct Stubborn;

impl Learner for Stubborn {
    fn initialize_episode(&mut self, _state: StateId) -> noughts::Result<usize> {
        Ok(0)
    }

    fn observe(&mut self, _state: StateId, _reward: i32) -> noughts::Result<usize> {
        Ok(0)
    }

    fn name(&self) -> &str {
        "stubborn"
    }
}

fn config(episodes: usize, seed: u64) -> TrainingConfig {
    TrainingConfig {
        episodes,
        seed: Some(seed),
        ..TrainingConfig::default()
    }
}

#[test]
fn legal_learner_finishes_every_episode_quickly() {
    let metrics = SharedObserver::new(MetricsObserver::new());
    let mut pipeline = TrainingPipeline::new(config(200, 4))
        .unwrap()
        .with_observer(Box::new(metrics.clone()));

    let result = pipeline.run(&mut LowestEmpty).unwrap();
    assert_eq!(result.total_episodes, 200);
    assert_eq!(result.cancelled, 0);
    assert_eq!(result.wins + result.losses + result.draws, 200);
    assert!(result.mean_steps <= 5.0);

    let summary = metrics.lock().summary();
    assert_eq!(summary.total_episodes, 200);
    assert_eq!(summary.wins, result.wins);
}

#[test]
fn stubborn_learner_is_cancelled_at_step_limit() {
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        step_limit: 25,
        ..config(3, 1)
    })
    .unwrap();

    let summary = pipeline.run_episode(0, &mut Stubborn).unwrap();
    assert_eq!(summary.result, EpisodeResult::Cancelled);
    assert_eq!(summary.steps, 25);
    // One placement landed, every later step was a no-op.
    assert_eq!(summary.total_reward, -25);

    // The run keeps going after a cancelled episode.
    let result = pipeline.run(&mut Stubborn).unwrap();
    assert_eq!(result.total_episodes, 3);
    assert_eq!(result.cancelled, 3);
    assert_eq!(result.cancelled_rate, 1.0);
}

#[test]
fn jsonl_observer_writes_one_line_per_episode() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("episodes.jsonl");

    let observer = JsonlObserver::new(&path).unwrap().with_steps();
    let mut pipeline = TrainingPipeline::new(config(12, 2))
        .unwrap()
        .with_observer(Box::new(observer));
    pipeline.run(&mut LowestEmpty).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let lines: Vec<EpisodeLine> = BufReader::new(file)
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect();

    assert_eq!(lines.len(), 12);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line.summary.episode, i);
        assert_eq!(line.trajectory.len(), line.summary.steps);
        let last = line.trajectory.last().unwrap();
        assert_eq!(last.board, line.summary.final_board);
    }
}

#[test]
fn seeded_q_learning_runs_are_reproducible() {
    let run = || {
        let mut agent = QLearningAgent::from_config(&LearnerConfig::standard()).unwrap();
        let mut pipeline = TrainingPipeline::new(config(300, 17)).unwrap();
        pipeline.run(&mut agent).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first.total_episodes, 300);
    assert_eq!(
        first.wins + first.losses + first.draws + first.cancelled,
        300
    );
    assert_eq!(
        (first.wins, first.losses, first.draws, first.total_reward),
        (second.wins, second.losses, second.draws, second.total_reward)
    );
}

#[test]
fn dyna_learner_trains_end_to_end() {
    let learner = LearnerConfig::dyna().with_planning_steps(5).with_seed(3);
    let mut agent = QLearningAgent::from_config(&learner).unwrap();
    let mut pipeline = TrainingPipeline::new(config(50, 3)).unwrap();

    let result = pipeline.run(&mut agent).unwrap();
    assert_eq!(result.total_episodes, 50);
    assert!(agent.q_table().visited() > 0);
    assert!(agent.exploration_rate() < 0.5);
}
