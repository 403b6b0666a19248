//! Ports (trait boundaries) for external collaborators.
//!
//! The environment and training loop own these traits; learning agents and
//! observation sinks are adapters that implement them.

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::Observer;
