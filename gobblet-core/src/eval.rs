//! One-ply heuristic player.
//!
//! Every candidate move is applied to a scratch copy of the state and the
//! resulting board is scored from the mover's side. Quiet positions score
//! as noise below [`BIG_SCORE`], so among moves with no tactical signal the
//! choice is random.

use rand::Rng;

use crate::board::{Board, GameState};
use crate::error::MoveError;
use crate::win::{COLUMNS, DIAGONALS, ROWS};
use crate::{Color, Move};

/// A completed line.
pub const HUGE_SCORE: i32 = 1_000_000;
/// Three in a row or column with the fourth cell empty.
pub const BIG_SCORE: i32 = 10_000;

/// Score `board` from `perspective`'s side.
///
/// Rows, then columns: an opponent four returns `-HUGE_SCORE` and an own
/// four returns `HUGE_SCORE` immediately; a three-with-gap sets the running
/// candidate to `∓BIG_SCORE`, later lines overwriting earlier ones.
/// Diagonals are checked last and score their three-with-gap at
/// `∓HUGE_SCORE`, replacing any row/column candidate.
pub fn score<R: Rng + ?Sized>(perspective: Color, board: &Board, rng: &mut R) -> i32 {
    let opponent = perspective.opponent();
    let mut candidate = 0;

    for line in ROWS.iter().chain(COLUMNS.iter()) {
        let tally = board.tally(line);
        if tally.is_four(opponent) {
            return -HUGE_SCORE;
        } else if tally.is_four(perspective) {
            return HUGE_SCORE;
        } else if tally.is_near_win(opponent) {
            candidate = -BIG_SCORE;
        } else if tally.is_near_win(perspective) {
            candidate = BIG_SCORE;
        }
    }

    let diagonals = DIAGONALS.map(|line| board.tally(&line));
    if diagonals.iter().any(|t| t.is_four(opponent)) {
        return -HUGE_SCORE;
    } else if diagonals.iter().any(|t| t.is_four(perspective)) {
        return HUGE_SCORE;
    } else if diagonals.iter().any(|t| t.is_near_win(opponent)) {
        candidate = -HUGE_SCORE;
    } else if diagonals.iter().any(|t| t.is_near_win(perspective)) {
        candidate = HUGE_SCORE;
    }

    if candidate != 0 {
        candidate
    } else {
        rng.random_range(0..BIG_SCORE)
    }
}

/// A candidate move and the score of the position it leads to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Scored {
    pub mov: Move,
    pub score: i32,
}

/// Score every move and sort best first.
///
/// The sort is stable, so equal scores keep generator order. A move that
/// fails to apply was never legal; the error is returned rather than
/// skipped.
pub fn rank<R: Rng + ?Sized>(
    player: Color,
    state: &GameState,
    moves: &[Move],
    rng: &mut R,
) -> Result<Vec<Scored>, MoveError> {
    let mut scored = moves
        .iter()
        .map(|&mov| {
            let mut scratch = *state;
            scratch.apply(mov, player)?;
            Ok::<_, MoveError>(Scored {
                mov,
                score: score(player, scratch.board(), &mut *rng),
            })
        })
        .collect::<Result<Vec<_>, MoveError>>()?;

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(scored)
}

/// The highest-scoring move, or `None` if `moves` is empty.
pub fn choose<R: Rng + ?Sized>(
    player: Color,
    state: &GameState,
    moves: &[Move],
    rng: &mut R,
) -> Result<Option<Move>, MoveError> {
    Ok(rank(player, state, moves, rng)?.first().map(|s| s.mov))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stock;
    use crate::{legal_moves, Pos, Size};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn put(board: &mut Board, cells: &[(u8, u8)], color: Color) {
        for &(col, row) in cells {
            board.push_piece(Pos::from_col_row(col, row), color, Size::Medium);
        }
    }

    #[test]
    fn test_four_in_row() {
        let mut board = Board::new();
        put(&mut board, &[(0, 1), (1, 1), (2, 1), (3, 1)], Color::Second);
        assert_eq!(score(Color::Second, &board, &mut rng()), HUGE_SCORE);
        assert_eq!(score(Color::First, &board, &mut rng()), -HUGE_SCORE);
    }

    #[test]
    fn test_three_in_row_with_gap() {
        let mut board = Board::new();
        put(&mut board, &[(0, 0), (1, 0), (2, 0)], Color::First);
        assert_eq!(score(Color::First, &board, &mut rng()), BIG_SCORE);
        assert_eq!(score(Color::Second, &board, &mut rng()), -BIG_SCORE);
    }

    #[test]
    fn test_three_in_column_with_gap() {
        let mut board = Board::new();
        put(&mut board, &[(2, 0), (2, 2), (2, 3)], Color::Second);
        assert_eq!(score(Color::Second, &board, &mut rng()), BIG_SCORE);
        assert_eq!(score(Color::First, &board, &mut rng()), -BIG_SCORE);
    }

    #[test]
    fn test_three_blocked_is_quiet() {
        let mut board = Board::new();
        put(&mut board, &[(0, 0), (1, 0), (2, 0)], Color::First);
        put(&mut board, &[(3, 0)], Color::Second);
        let s = score(Color::First, &board, &mut rng());
        assert!((0..BIG_SCORE).contains(&s), "score {}", s);
    }

    #[test]
    fn test_later_line_overwrites_candidate() {
        // Second's near-win in row 0, First's in row 2: row 2 is seen last.
        let mut board = Board::new();
        put(&mut board, &[(0, 0), (1, 0), (2, 0)], Color::Second);
        put(&mut board, &[(1, 2), (2, 2), (3, 2)], Color::First);
        assert_eq!(score(Color::First, &board, &mut rng()), BIG_SCORE);
        assert_eq!(score(Color::Second, &board, &mut rng()), -BIG_SCORE);
    }

    #[test]
    fn test_diagonal_near_win_scores_huge() {
        let mut board = Board::new();
        put(&mut board, &[(0, 0), (1, 1), (2, 2)], Color::First);
        assert_eq!(score(Color::First, &board, &mut rng()), HUGE_SCORE);
        assert_eq!(score(Color::Second, &board, &mut rng()), -HUGE_SCORE);
    }

    #[test]
    fn test_diagonal_replaces_row_candidate() {
        let mut board = Board::new();
        put(&mut board, &[(0, 3), (1, 2), (2, 1)], Color::Second);
        put(&mut board, &[(0, 0), (1, 0), (2, 0)], Color::First);
        assert_eq!(score(Color::First, &board, &mut rng()), -HUGE_SCORE);
    }

    #[test]
    fn test_quiet_score_is_noise() {
        let board = Board::new();
        let mut rng = rng();
        for _ in 0..200 {
            let s = score(Color::First, &board, &mut rng);
            assert!((0..BIG_SCORE).contains(&s));
        }
    }

    #[test]
    fn test_quiet_score_seeded() {
        let board = Board::new();
        let a = score(Color::Second, &board, &mut StdRng::seed_from_u64(9));
        let b = score(Color::Second, &board, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rank_sorted_and_complete() {
        let mut state = GameState::new();
        state.apply(Move::Place { size: Size::Large, to: Pos(0) }, Color::First).unwrap();
        let moves = legal_moves(Color::Second, &state);
        let ranked = rank(Color::Second, &state, &moves, &mut rng()).unwrap();

        assert_eq!(ranked.len(), moves.len());
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_stable_for_ties() {
        // Second can finish column D at DD or row C at CC; both score HUGE
        // and keep their input order.
        let mut board = Board::new();
        put(&mut board, &[(3, 0), (3, 1), (3, 2), (0, 2), (1, 2)], Color::Second);
        let state = GameState::from_parts(board, Stock::new(), Stock::new());
        let column = Move::Place { size: Size::Large, to: Pos::from_col_row(3, 3) };
        let row = Move::Place { size: Size::Large, to: Pos::from_col_row(2, 2) };

        let ranked = rank(Color::Second, &state, &[column, row], &mut rng()).unwrap();
        assert_eq!(ranked[0], Scored { mov: column, score: HUGE_SCORE });
        assert_eq!(ranked[1], Scored { mov: row, score: HUGE_SCORE });

        let ranked = rank(Color::Second, &state, &[row, column], &mut rng()).unwrap();
        assert_eq!(ranked[0].mov, row);
        assert_eq!(ranked[1].mov, column);
    }

    #[test]
    fn test_choose_blocks_opponent() {
        // Second threatens row B. Replies that leave the threat score -BIG;
        // covering or filling the row is quiet and ranks above them.
        let mut board = Board::new();
        put(&mut board, &[(0, 1), (1, 1), (2, 1)], Color::Second);
        let state = GameState::from_parts(board, Stock::new(), Stock::new());
        let moves = legal_moves(Color::First, &state);
        let ranked = rank(Color::First, &state, &moves, &mut rng()).unwrap();
        let best = ranked[0];

        assert!(best.score >= 0);
        let mut after = state;
        after.apply(best.mov, Color::First).unwrap();
        assert!(!after.board().tally(&ROWS[1]).is_near_win(Color::Second));
        assert_eq!(ranked.last().map(|s| s.score), Some(-BIG_SCORE));
    }

    #[test]
    fn test_choose_empty() {
        let state = GameState::new();
        assert_eq!(choose(Color::First, &state, &[], &mut rng()), Ok(None));
    }

    #[test]
    fn test_rank_reports_illegal_move() {
        let state = GameState::new();
        let moves = [Move::Relocate { from: Pos(0), to: Pos(1) }];
        assert_eq!(
            rank(Color::First, &state, &moves, &mut rng()),
            Err(MoveError::NotOwner)
        );
    }
}
