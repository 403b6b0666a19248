//! Dense Q-table for tabular temporal difference learning

use crate::tictactoe::{CELLS, NUM_STATES, StateId};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Every one of the 3^9 states gets a row of 9 actions, stored contiguously.
#[derive(Debug, Clone)]
pub struct QTable {
    /// Row-major values: `values[state * CELLS + action]`
    values: Vec<f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a new Q-table with every value at zero
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            values: vec![0.0; NUM_STATES * CELLS],
            learning_rate,
            discount_factor,
        }
    }

    fn offset(state: StateId, action: usize) -> usize {
        state.index() * CELLS + action
    }

    fn row(&self, state: StateId) -> &[f64] {
        let start = state.index() * CELLS;
        &self.values[start..start + CELLS]
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: StateId, action: usize) -> f64 {
        self.values[Self::offset(state, action)]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateId, action: usize, value: f64) {
        self.values[Self::offset(state, action)] = value;
    }

    /// Get maximum Q-value over all actions in a state
    pub fn max_q(&self, state: StateId) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Select greedy action (highest Q-value); ties go to the lowest index
    pub fn greedy_action(&self, state: StateId) -> usize {
        let mut best = 0;
        let row = self.row(state);
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: StateId,
        action: usize,
        reward: f64,
        next_state: StateId,
    ) {
        let current_q = self.get(state, action);
        let td_target = reward + self.discount_factor * self.max_q(next_state);
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
    }

    /// Number of state-action pairs that have moved away from zero
    pub fn visited(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }
}
