//! Winning line analysis for Tic-Tac-Toe

use super::{Board, Mark, Outcome};

/// Winning line indices on the 3x3 board, scanned in this order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Marks along one line
    pub fn marks(board: &Board, line: &[usize; 3]) -> [Mark; 3] {
        line.map(|idx| board.get(idx))
    }

    /// Check if `mark` fills a whole line
    pub fn has_won(board: &Board, mark: Mark) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| board.get(idx) == mark))
    }

    /// A line is open unless it already holds both players' marks.
    ///
    /// Empty cells play no part: a line of one player's marks plus blanks is
    /// open, and so is a line that is full of a single player's marks.
    pub fn is_open(board: &Board, line: &[usize; 3]) -> bool {
        let marks = Self::marks(board, line);
        !(marks.contains(&Mark::First) && marks.contains(&Mark::Second))
    }

    /// Classify a board.
    ///
    /// Wins are looked for first, line by line. Without a winner the game is
    /// still active while at least one line is open, and a draw otherwise,
    /// which can happen before the board is full.
    pub fn classify(board: &Board) -> Outcome {
        for line in &WINNING_LINES {
            match Self::marks(board, line) {
                [Mark::First, Mark::First, Mark::First] => return Outcome::FirstPlayerWin,
                [Mark::Second, Mark::Second, Mark::Second] => return Outcome::SecondPlayerWin,
                _ => {}
            }
        }

        if WINNING_LINES.iter().any(|line| Self::is_open(board, line)) {
            Outcome::Active
        } else {
            Outcome::Draw
        }
    }
}

/// Classify a board; see [`LineAnalyzer::classify`]
pub fn classify(board: &Board) -> Outcome {
    LineAnalyzer::classify(board)
}
