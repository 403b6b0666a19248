//! Learner port - the boundary between the environment and a learning agent
//!
//! The training loop and the interactive session only ever talk to an agent
//! through this trait. What the agent keeps internally (value tables,
//! exploration schedule, planning model) is its own business.

use crate::{Result, tictactoe::StateId};

/// Online learning agent driven one step at a time
///
/// # Lifecycle
///
/// A learner is constructed once, then owned by the caller and passed by
/// `&mut` into training and afterwards into interactive play. Nothing resets
/// it between episodes except its own [`Learner::initialize_episode`].
///
/// # Examples
///
/// ```no_run
/// use noughts::{ports::Learner, tictactoe::StateId};
///
/// struct CornerFirst;
///
/// impl Learner for CornerFirst {
///     fn initialize_episode(&mut self, _state: StateId) -> noughts::Result<usize> {
///         Ok(0)
///     }
///
///     fn observe(&mut self, _state: StateId, _reward: i32) -> noughts::Result<usize> {
///         Ok(8)
///     }
///
///     fn name(&self) -> &str {
///         "corner-first"
///     }
/// }
/// ```
pub trait Learner: Send {
    /// Start an episode at `state` and return the first action (0-8).
    ///
    /// No reward is consumed here.
    fn initialize_episode(&mut self, state: StateId) -> Result<usize>;

    /// Report the state reached and the reward earned getting there, and
    /// return the next action (0-8).
    fn observe(&mut self, state: StateId, reward: i32) -> Result<usize>;

    /// Get the learner's name.
    ///
    /// Used for identification in logs and summaries.
    fn name(&self) -> &str;

    /// Seed the learner's internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
