//! Tic-Tac-Toe environment: board, state codec, outcomes, opponent and transitions

pub mod board;
pub mod codec;
pub mod lines;
pub mod opponent;
pub mod outcome;
pub mod transition;

pub use board::{Board, CELLS, Mark};
pub use codec::{NUM_STATES, StateId, decode, encode};
pub use lines::{LineAnalyzer, WINNING_LINES, classify};
pub use opponent::OpponentPolicy;
pub use outcome::Outcome;
pub use transition::apply;
