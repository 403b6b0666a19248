//! Game outcomes and the reward signal derived from them

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Someone can still complete a line
    Active,
    FirstPlayerWin,
    SecondPlayerWin,
    Draw,
}

impl Outcome {
    /// Reward earned by the first player for a transition into this outcome.
    ///
    /// Only a first-player win pays; every other step, ongoing play included,
    /// costs 1 and a loss costs 5.
    pub fn reward(self) -> i32 {
        match self {
            Outcome::FirstPlayerWin => 1,
            Outcome::SecondPlayerWin => -5,
            Outcome::Draw => -1,
            Outcome::Active => -1,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Active)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Active => "active",
            Outcome::FirstPlayerWin => "first-player-win",
            Outcome::SecondPlayerWin => "second-player-win",
            Outcome::Draw => "draw",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_mapping() {
        assert_eq!(Outcome::FirstPlayerWin.reward(), 1);
        assert_eq!(Outcome::SecondPlayerWin.reward(), -5);
        assert_eq!(Outcome::Draw.reward(), -1);
        assert_eq!(Outcome::Active.reward(), -1);
    }

    #[test]
    fn test_terminal() {
        assert!(!Outcome::Active.is_terminal());
        assert!(Outcome::FirstPlayerWin.is_terminal());
        assert!(Outcome::SecondPlayerWin.is_terminal());
        assert!(Outcome::Draw.is_terminal());
    }
}
