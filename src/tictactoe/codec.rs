//! Base-3 state codec
//!
//! Every board maps to a unique integer by reading its marks as base-3 digits,
//! cell 0 most significant. The mapping is a bijection over all 3^9 boards,
//! which lets tabular learners index their value tables by [`StateId`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, CELLS, Mark};

/// Number of distinct boards (3^9)
pub const NUM_STATES: usize = 19_683;

/// Integer identifier of a board, always in `0..NUM_STATES`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StateId(u16);

impl StateId {
    /// The empty board
    pub const EMPTY: StateId = StateId(0);

    /// Create a state id, rejecting values outside the board domain.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StateOutOfRange`] for values `>= 3^9`.
    pub fn new(value: u32) -> Result<Self, crate::Error> {
        if value as usize >= NUM_STATES {
            return Err(crate::Error::StateOutOfRange {
                value,
                limit: NUM_STATES as u32,
            });
        }
        Ok(StateId(value as u16))
    }

    pub fn value(self) -> u32 {
        u32::from(self.0)
    }

    /// Index into dense per-state tables
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl TryFrom<u32> for StateId {
    type Error = crate::Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        StateId::new(value)
    }
}

impl From<StateId> for u32 {
    fn from(state: StateId) -> Self {
        state.value()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encode a board as its base-3 state id
pub fn encode(board: &Board) -> StateId {
    let value = board
        .cells
        .iter()
        .fold(0u16, |acc, mark| acc * 3 + mark.digit() as u16);
    StateId(value)
}

/// Decode a state id back into its board, zero-padded to 9 cells
pub fn decode(state: StateId) -> Board {
    let mut cells = [Mark::Empty; CELLS];
    let mut rest = u32::from(state.0);
    for cell in cells.iter_mut().rev() {
        // rest % 3 is always a valid digit
        *cell = Mark::from_digit(rest % 3).unwrap_or_default();
        rest /= 3;
    }
    Board::from_cells(cells)
}

impl From<&Board> for StateId {
    fn from(board: &Board) -> Self {
        encode(board)
    }
}

impl From<StateId> for Board {
    fn from(state: StateId) -> Self {
        decode(state)
    }
}
