//! Noughts: a tic-tac-toe reinforcement-learning sandbox
//!
//! This crate provides:
//! - A 3x3 board with a compact base-3 state encoding
//! - Outcome classification, rewards and a stochastic line-blocking opponent
//! - A training loop driving any [`Learner`](ports::Learner) through episodes
//! - A tabular Q-learner with optional Dyna planning
//! - An interactive session for playing against a trained learner

pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
