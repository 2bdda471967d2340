//! Fixed-position checks
//!
//! Loads hand-built positions from `tests/data/positions.json` and verifies:
//! - Winner detection after the previous player's move
//! - Game status (won / draw / ongoing)
//! - Legal move count for the side to move
//! - Heuristic score where the position is tactical (not noise)

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use gobblet_core::{
    legal_moves, score, status, winner, Board, Color, GameState, Pos, Size, Status, Stock,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct TestData {
    version: String,
    positions: Vec<Position>,
}

#[derive(Debug, Deserialize)]
struct Position {
    description: String,
    /// Pushed in order, so stacks are listed bottom to top
    pieces: Vec<Piece>,
    stocks: [[u8; 3]; 2],
    to_move: u8,
    winner: Option<u8>,
    status: ExpectedStatus,
    legal_move_count: Option<usize>,
    score: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct Piece {
    col: u8,
    row: u8,
    player: u8,
    size: u8,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum ExpectedStatus {
    Ongoing,
    WonFirst,
    WonSecond,
    Draw,
}

impl From<Status> for ExpectedStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Ongoing => ExpectedStatus::Ongoing,
            Status::Won(Color::First) => ExpectedStatus::WonFirst,
            Status::Won(Color::Second) => ExpectedStatus::WonSecond,
            Status::Draw => ExpectedStatus::Draw,
        }
    }
}

fn color(player: u8) -> Color {
    Color::from_bits(player).expect("player must be 1 or 2")
}

fn build_state(pos: &Position) -> GameState {
    let mut board = Board::new();
    for piece in &pos.pieces {
        let size = Size::from_value(piece.size).expect("size must be 1-4");
        board.push_piece(Pos::from_col_row(piece.col, piece.row), color(piece.player), size);
    }
    let first = Stock::from_groups(pos.stocks[0]).expect("bad stock");
    let second = Stock::from_groups(pos.stocks[1]).expect("bad stock");
    GameState::from_parts(board, first, second)
}

fn load_test_positions(path: &Path) -> TestData {
    let file = File::open(path).expect("Failed to open test positions file");
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).expect("Failed to parse JSON")
}

fn positions() -> Vec<Position> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/positions.json");
    load_test_positions(&path).positions
}

#[test]
fn test_positions_winner_and_status() {
    let mut failures: Vec<String> = Vec::new();

    for pos in positions() {
        let state = build_state(&pos);
        let to_move = color(pos.to_move);
        let just_moved = to_move.opponent();

        let got_winner = winner(&state, just_moved).map(Color::number);
        if got_winner != pos.winner {
            failures.push(format!(
                "{}: winner expected {:?}, got {:?}",
                pos.description, pos.winner, got_winner
            ));
        }

        let got_status = ExpectedStatus::from(status(&state, just_moved));
        if got_status != pos.status {
            failures.push(format!(
                "{}: status expected {:?}, got {:?}",
                pos.description, pos.status, got_status
            ));
        }
    }

    assert!(failures.is_empty(), "\n{}", failures.join("\n"));
}

#[test]
fn test_positions_legal_move_count() {
    for pos in positions() {
        // Only checked while the game is still going
        let Some(expected) = pos.legal_move_count else {
            continue;
        };
        let state = build_state(&pos);
        let moves = legal_moves(color(pos.to_move), &state);
        assert_eq!(moves.len(), expected, "{}", pos.description);
    }
}

#[test]
fn test_positions_score() {
    for pos in positions() {
        let Some(expected) = pos.score else {
            continue;
        };
        let state = build_state(&pos);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            score(color(pos.to_move), state.board(), &mut rng),
            expected,
            "{}",
            pos.description
        );
    }
}

#[test]
fn test_positions_accounting() {
    // Positions reached by play keep all 12 pieces of each player somewhere.
    let reachable = ["opening", "first_large_at_aa", "first_completes_row_b"];
    for pos in positions().iter().filter(|p| reachable.contains(&p.description.as_str())) {
        let state = build_state(pos);
        assert_eq!(state.pieces_accounted(Color::First), 12, "{}", pos.description);
        assert_eq!(state.pieces_accounted(Color::Second), 12, "{}", pos.description);
    }
}
