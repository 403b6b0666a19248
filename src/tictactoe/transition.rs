//! Board transitions for training and interactive play

use super::{Board, Mark, OpponentPolicy, StateId, decode};

/// Apply `mover`'s placement at `action` to the board behind `state`.
///
/// An occupied target leaves the board unchanged and no reply is made. When
/// `opponent` is given, a successful placement is followed by one opponent
/// move, so a training step advances two plies while interactive play passes
/// `None` and advances one.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidPosition`] if `action` is not in 0-8.
pub fn apply(
    state: StateId,
    action: usize,
    opponent: Option<&mut OpponentPolicy>,
    mover: Mark,
) -> Result<Board, crate::Error> {
    let board = decode(state);
    let placed = board.place(action, mover)?;
    if placed == board {
        return Ok(board);
    }

    Ok(match opponent {
        Some(opponent) => opponent.place(placed),
        None => placed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::encode;

    fn state(s: &str) -> StateId {
        encode(&s.parse::<Board>().unwrap())
    }

    #[test]
    fn test_single_ply() {
        let board = apply(StateId::EMPTY, 4, None, Mark::First).unwrap();
        assert_eq!(board.to_digits(), "000010000");
    }

    #[test]
    fn test_chained_reply_adds_second_mark() {
        let mut opponent = OpponentPolicy::with_seed(5);
        let board = apply(StateId::EMPTY, 0, Some(&mut opponent), Mark::First).unwrap();
        assert_eq!(board.get(0), Mark::First);
        assert_eq!(board.count(Mark::First), 1);
        assert_eq!(board.count(Mark::Second), 1);
    }

    #[test]
    fn test_occupied_cell_is_noop_even_when_chaining() {
        let start = state("120000000");
        let mut opponent = OpponentPolicy::with_seed(5);
        let board = apply(start, 1, Some(&mut opponent), Mark::First).unwrap();
        assert_eq!(board.to_digits(), "120000000");
    }

    #[test]
    fn test_last_cell_leaves_full_board() {
        let start = state("121121210");
        let mut opponent = OpponentPolicy::with_seed(5);
        let board = apply(start, 8, Some(&mut opponent), Mark::Second).unwrap();
        assert_eq!(board.to_digits(), "121121212");
    }

    #[test]
    fn test_out_of_range_action() {
        let result = apply(StateId::EMPTY, 12, None, Mark::First);
        assert!(matches!(
            result,
            Err(crate::Error::InvalidPosition { position: 12 })
        ));
    }
}
