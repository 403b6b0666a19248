//! Interactive play between a human (O) and a trained learner (X)
//!
//! The session is generic over its input and output so the same loop drives
//! the terminal and the tests.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::{
    Error, Result,
    ports::Learner,
    tictactoe::{Board, CELLS, Mark, Outcome, StateId, apply, classify, encode},
};

/// Default number of learner attempts per turn before the game is cancelled
pub const DEFAULT_RETRY_LIMIT: usize = 5_000;

/// End-of-game verdict printed to the player
pub fn verdict(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Active => "cancelled",
        Outcome::FirstPlayerWin => "robot wins",
        Outcome::SecondPlayerWin => "player wins",
        Outcome::Draw => "draw",
    }
}

/// How a single interactive game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameReport {
    pub outcome: Outcome,
    pub board: Board,
    /// Input ran out before the game finished
    pub input_closed: bool,
}

enum HumanMove {
    Placed(Board),
    InputClosed,
}

/// Human-vs-learner game loop over a line-oriented reader and a writer
pub struct InteractiveSession<'a, R, W> {
    learner: &'a mut dyn Learner,
    input: R,
    output: W,
    retry_limit: usize,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(learner: &'a mut dyn Learner, input: R, output: W) -> Self {
        Self {
            learner,
            input,
            output,
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    /// Cap on learner attempts at a free cell within one turn
    pub fn with_retry_limit(mut self, retry_limit: usize) -> Self {
        self.retry_limit = retry_limit.max(1);
        self
    }

    /// Give back the writer, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.output
    }

    /// Play games until the input is exhausted, returning every report
    pub fn run(&mut self) -> Result<Vec<GameReport>> {
        let mut reports = Vec::new();
        loop {
            let report = self.play_game()?;
            reports.push(report);
            if report.input_closed {
                return Ok(reports);
            }
        }
    }

    /// Play one game; the learner always opens as X
    pub fn play_game(&mut self) -> Result<GameReport> {
        self.say("\n--- new game ---")?;

        let start = Board::new();
        let action = self.learner.initialize_episode(encode(&start))?;
        let mut board = apply(encode(&start), action, None, Mark::First)?;
        self.show(&board)?;
        let mut outcome = classify(&board);
        let mut input_closed = false;

        while outcome == Outcome::Active {
            match self.human_turn(&board)? {
                HumanMove::Placed(next) => board = next,
                HumanMove::InputClosed => {
                    input_closed = true;
                    break;
                }
            }
            self.show(&board)?;
            outcome = classify(&board);
            if outcome != Outcome::Active {
                break;
            }

            match self.learner_turn(&board, outcome)? {
                Some(next) => board = next,
                None => break,
            }
            self.show(&board)?;
            outcome = classify(&board);
        }

        self.say("game over")?;
        self.say(verdict(outcome))?;
        debug!(board = %board, outcome = %outcome, "interactive game finished");

        Ok(GameReport {
            outcome,
            board,
            input_closed,
        })
    }

    fn human_turn(&mut self, board: &Board) -> Result<HumanMove> {
        self.say("player turn")?;
        let state = encode(board);
        loop {
            write!(self.output, ">").map_err(|e| Error::io("write prompt", e))?;
            self.output
                .flush()
                .map_err(|e| Error::io("flush prompt", e))?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| Error::io("read player move", e))?;
            if read == 0 {
                self.say("")?;
                return Ok(HumanMove::InputClosed);
            }

            let Some(position) = parse_position(&line) else {
                self.say("invalid move")?;
                continue;
            };

            let next = apply(state, position, None, Mark::Second)?;
            if next == *board {
                self.say("invalid move")?;
                continue;
            }
            return Ok(HumanMove::Placed(next));
        }
    }

    /// Ask the learner for moves until one lands on a free cell.
    ///
    /// Returns `None` when the retry limit runs out.
    fn learner_turn(&mut self, board: &Board, outcome: Outcome) -> Result<Option<Board>> {
        self.say("robot turn")?;
        let state: StateId = encode(board);
        for _ in 0..self.retry_limit {
            let action = self.learner.observe(state, outcome.reward())?;
            let next = apply(state, action, None, Mark::First)?;
            if next != *board {
                return Ok(Some(next));
            }
        }

        warn!(
            learner = self.learner.name(),
            retries = self.retry_limit,
            board = %board,
            "learner never picked a free cell"
        );
        Ok(None)
    }

    fn show(&mut self, board: &Board) -> Result<()> {
        writeln!(self.output, "\n{}\n", board.render())
            .map_err(|e| Error::io("write board", e))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").map_err(|e| Error::io("write message", e))
    }
}

/// Parse a human-entered cell index, accepting only integers 0-8
fn parse_position(line: &str) -> Option<usize> {
    line.trim()
        .parse::<usize>()
        .ok()
        .filter(|&pos| pos < CELLS)
}
