//! CLI infrastructure for the noughts sandbox
//!
//! This module provides the command-line interface for training a learner
//! and playing against it.

pub mod commands;
pub mod config;
pub mod output;
