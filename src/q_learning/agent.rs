//! Q-learning agent with optional Dyna planning
//!
//! The agent learns online: every reported reward immediately updates the
//! value of the last (state, action) pair. With planning enabled, each real
//! step is followed by a number of simulated updates replayed from memory.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    app::LearnerConfig,
    error::Result,
    ports::Learner,
    q_learning::{
        model::{Experience, ExperienceModel},
        q_table::QTable,
    },
    tictactoe::{CELLS, StateId},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent (off-policy TD control)
///
/// Actions range over all nine cells. The agent is never told which cells
/// are free; a placement on an occupied cell just costs a step.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    exploration_rate: f64,
    exploration_decay: f64,
    planning_steps: usize,
    model: ExperienceModel,
    rng: StdRng,
    last_state: StateId,
    last_action: usize,
}

impl QLearningAgent {
    /// Create a new Q-learning agent without planning
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter (0.0 to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0)
    /// * `exploration_rate` - Initial probability of a random action
    /// * `exploration_decay` - Multiplicative decay per step
    pub fn new(
        learning_rate: f64,
        discount_factor: f64,
        exploration_rate: f64,
        exploration_decay: f64,
    ) -> Self {
        Self {
            q_table: QTable::new(learning_rate, discount_factor),
            exploration_rate,
            exploration_decay,
            planning_steps: 0,
            model: ExperienceModel::new(1),
            rng: build_rng(None),
            last_state: StateId::EMPTY,
            last_action: 0,
        }
    }

    /// Build an agent from validated hyperparameters
    pub fn from_config(config: &LearnerConfig) -> Result<Self> {
        config.validate()?;
        let mut agent = Self::new(
            config.learning_rate,
            config.discount_factor,
            config.exploration_rate,
            config.exploration_decay,
        )
        .with_planning(config.planning_steps, config.model_capacity);
        if let Some(seed) = config.seed {
            agent = agent.with_seed(seed);
        }
        Ok(agent)
    }

    /// Enable Dyna planning with `steps` replays per real step
    pub fn with_planning(mut self, steps: usize, model_capacity: usize) -> Self {
        self.planning_steps = steps;
        self.model = ExperienceModel::new(if steps > 0 { model_capacity } else { 1 });
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current probability of taking a random action
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn planning_steps(&self) -> usize {
        self.planning_steps
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// ε-greedy action selection
    fn select_action(&mut self, state: StateId) -> usize {
        if self.rng.random::<f64>() < self.exploration_rate {
            // Explore: random action
            self.rng.random_range(0..CELLS)
        } else {
            // Exploit: greedy action based on Q-values
            self.q_table.greedy_action(state)
        }
    }

    /// Replay remembered transitions through the same update rule
    fn plan(&mut self) {
        for _ in 0..self.planning_steps {
            let Some(experience) = self.model.sample(&mut self.rng) else {
                return;
            };
            self.q_table.q_learning_update(
                experience.state,
                experience.action,
                experience.reward,
                experience.next_state,
            );
        }
    }
}

impl Learner for QLearningAgent {
    fn initialize_episode(&mut self, state: StateId) -> Result<usize> {
        let action = self.select_action(state);
        self.last_state = state;
        self.last_action = action;
        Ok(action)
    }

    fn observe(&mut self, state: StateId, reward: i32) -> Result<usize> {
        let reward = f64::from(reward);
        self.q_table
            .q_learning_update(self.last_state, self.last_action, reward, state);

        if self.planning_steps > 0 {
            self.model.push(Experience {
                state: self.last_state,
                action: self.last_action,
                next_state: state,
                reward,
            });
            self.plan();
        }

        let action = self.select_action(state);
        self.exploration_rate *= self.exploration_decay;
        self.last_state = state;
        self.last_action = action;
        Ok(action)
    }

    fn name(&self) -> &str {
        if self.planning_steps > 0 {
            "Dyna-Q"
        } else {
            "Q-Learning"
        }
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}
