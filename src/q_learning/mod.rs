//! Tabular Q-learning with optional Dyna planning
//!
//! The agent keeps a dense value for every (state, action) pair over the
//! full base-3 state space and learns online from the rewards reported by
//! the training loop.
//!
//! ## Variants
//!
//! | Preset | Planning | Exploration |
//! |--------|----------|-------------|
//! | Standard | none | 0.9, decay 0.999 |
//! | Dyna | 100 replays per step | 0.5, decay 0.99 |
//!
//! ## Usage Example
//!
//! ```no_run
//! use noughts::q_learning::QLearningAgent;
//!
//! let agent = QLearningAgent::new(
//!     0.2,   // learning_rate
//!     0.9,   // discount_factor
//!     0.9,   // exploration_rate
//!     0.999, // exploration_decay
//! )
//! .with_planning(100, 100_000);
//! ```

pub mod agent;
pub mod model;
pub mod q_table;

pub use agent::QLearningAgent;
pub use model::{Experience, ExperienceModel};
pub use q_table::QTable;
