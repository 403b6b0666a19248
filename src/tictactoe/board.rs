//! Board representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of cells on the board
pub const CELLS: usize = 9;

/// A mark on the Tic-Tac-Toe board
///
/// The discriminant order matters: it is the base-3 digit used by the state
/// codec, so `Empty` must stay 0, `First` 1 and `Second` 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    /// The first mover (X), played by the learner
    First,
    /// The second mover (O), played by the opponent or a human
    Second,
}

impl Mark {
    /// Base-3 digit of this mark
    pub fn digit(self) -> u32 {
        match self {
            Mark::Empty => 0,
            Mark::First => 1,
            Mark::Second => 2,
        }
    }

    pub fn from_digit(digit: u32) -> Option<Mark> {
        match digit {
            0 => Some(Mark::Empty),
            1 => Some(Mark::First),
            2 => Some(Mark::Second),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::Empty => '0',
            Mark::First => '1',
            Mark::Second => '2',
        }
    }

    pub fn from_char(c: char) -> Option<Mark> {
        c.to_digit(10).and_then(Mark::from_digit)
    }

    /// Glyph used when rendering the board for a human
    pub fn glyph(self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::First => 'X',
            Mark::Second => 'O',
        }
    }
}

/// Nine cells in row-major order
///
/// Boards are plain values: every operation returns a new board and marks are
/// never erased. This type is `Copy` since it is only 9 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    pub cells: [Mark; CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; CELLS]) -> Self {
        Self { cells }
    }

    /// Get mark at position (0-8)
    pub fn get(&self, pos: usize) -> Mark {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Mark::Empty
    }

    /// Get all empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &mark)| mark == Mark::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Mark::Empty)
    }

    /// Count the cells holding `mark`
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    /// Place `mark` at `pos` and return the resulting board.
    ///
    /// Placing onto an occupied cell is not an error: the board comes back
    /// unchanged and callers detect the no-op by comparing boards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if `pos` is not in 0-8.
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, pos: usize, mark: Mark) -> Result<Board, crate::Error> {
        if pos >= CELLS {
            return Err(crate::Error::InvalidPosition { position: pos });
        }

        if !self.is_empty(pos) {
            return Ok(*self);
        }

        let mut next = *self;
        next.cells[pos] = mark;
        Ok(next)
    }

    /// Digit-string form, e.g. `"120000000"`
    pub fn to_digits(&self) -> String {
        self.cells.iter().map(|&mark| mark.to_char()).collect()
    }

    /// Render as a 3x3 grid with `X`/`O` glyphs and row separators
    pub fn render(&self) -> String {
        let rows: Vec<String> = self
            .cells
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|mark| mark.glyph().to_string())
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect();
        rows.join("\n---------\n")
    }
}

impl FromStr for Board {
    type Err = crate::Error;

    /// Parse a board from 9 digits over `0`/`1`/`2` (whitespace is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != CELLS {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Mark::Empty; CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Mark::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }
}

impl TryFrom<String> for Board {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_digits()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_digits())
    }
}
