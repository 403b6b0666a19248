//! Semi-random second-player policy used as the training adversary

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{Board, Mark, lines::WINNING_LINES};

/// Default chance of abandoning the line scan at each line
pub const DEFAULT_EXIT_PROBABILITY: f64 = 0.5;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Stochastic opponent blending a line heuristic with random play.
///
/// Lines are scanned in their fixed order. Before each line a coin is flipped
/// and, with probability `exit_probability`, scanning stops. Otherwise a line
/// where two cells hold the same mark and the third is empty yields that empty
/// cell. The comparison does not care whose mark it is (blocking and completing
/// look the same) and treats two empty cells as matching. When the scan ends
/// without a candidate, a uniformly random empty cell is chosen.
#[derive(Debug, Clone)]
pub struct OpponentPolicy {
    rng: StdRng,
    exit_probability: f64,
}

impl OpponentPolicy {
    /// Create an opponent with the default exit probability and an entropy seed
    pub fn new() -> Self {
        Self {
            rng: build_rng(None),
            exit_probability: DEFAULT_EXIT_PROBABILITY,
        }
    }

    /// Create an opponent with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: build_rng(Some(seed)),
            exit_probability: DEFAULT_EXIT_PROBABILITY,
        }
    }

    /// Override the per-line exit probability.
    ///
    /// # Errors
    ///
    /// Returns an error unless `probability` is within `[0, 1]`.
    pub fn with_exit_probability(mut self, probability: f64) -> Result<Self, crate::Error> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("opponent exit probability {probability} must be within [0, 1]"),
            });
        }
        self.exit_probability = probability;
        Ok(self)
    }

    pub fn exit_probability(&self) -> f64 {
        self.exit_probability
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Pick a cell for the second player, or `None` when the board is full
    pub fn choose_move(&mut self, board: &Board) -> Option<usize> {
        let free = board.empty_positions();
        if free.is_empty() {
            return None;
        }

        let tactical = self.scan_lines(board);
        tactical.or_else(|| free.choose(&mut self.rng).copied())
    }

    /// Place the second player's mark, leaving a full board unchanged
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&mut self, board: Board) -> Board {
        match self.choose_move(&board) {
            Some(pos) => {
                let mut next = board;
                next.cells[pos] = Mark::Second;
                next
            }
            None => board,
        }
    }

    fn scan_lines(&mut self, board: &Board) -> Option<usize> {
        for &[a, b, c] in &WINNING_LINES {
            if self.rng.random::<f64>() < self.exit_probability {
                return None;
            }

            let (ma, mb, mc) = (board.get(a), board.get(b), board.get(c));
            if ma == mb && mc == Mark::Empty {
                return Some(c);
            }
            if ma == mc && mb == Mark::Empty {
                return Some(b);
            }
            if mb == mc && ma == Mark::Empty {
                return Some(a);
            }
        }
        None
    }
}

impl Default for OpponentPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn deterministic_scan() -> OpponentPolicy {
        OpponentPolicy::with_seed(7)
            .with_exit_probability(0.0)
            .unwrap()
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut opponent = OpponentPolicy::with_seed(1);
        let full = board("121121212");
        assert_eq!(opponent.choose_move(&full), None);
        assert_eq!(opponent.place(full), full);
    }

    #[test]
    fn test_blocks_first_player_pair() {
        let mut opponent = deterministic_scan();
        assert_eq!(opponent.choose_move(&board("110200000")), Some(2));
    }

    #[test]
    fn test_completes_own_pair() {
        let mut opponent = deterministic_scan();
        // Top row is mixed; middle row holds two O marks.
        assert_eq!(opponent.choose_move(&board("121202100")), Some(4));
    }

    #[test]
    fn test_empty_pair_counts_as_matching() {
        // Heuristic treats two empty cells as a pair and takes the third cell.
        let mut opponent = deterministic_scan();
        assert_eq!(opponent.choose_move(&Board::new()), Some(2));
    }

    #[test]
    fn test_always_exit_falls_back_to_random() {
        let mut opponent = OpponentPolicy::with_seed(3)
            .with_exit_probability(1.0)
            .unwrap();
        let b = board("110200000");
        for _ in 0..50 {
            let pos = opponent.choose_move(&b).unwrap();
            assert!(b.is_empty(pos));
        }
    }

    #[test]
    fn test_rejects_bad_probability() {
        assert!(OpponentPolicy::new().with_exit_probability(1.5).is_err());
        assert!(OpponentPolicy::new().with_exit_probability(-0.1).is_err());
    }

    #[test]
    fn test_place_marks_second_player() {
        let mut opponent = OpponentPolicy::with_seed(11);
        let before = board("100000000");
        let after = opponent.place(before);
        assert_eq!(after.count(Mark::Second), 1);
        assert_eq!(after.count(Mark::First), 1);
    }
}
