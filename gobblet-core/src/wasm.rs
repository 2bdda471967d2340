//! WASM bindings for gobblet-core
//!
//! Provides a JavaScript-friendly API for the game logic.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::{
    apply_move, choose_ai_move, is_full, legal_moves, status, winner, Color, Coord, GameState,
    Move, Pos, Source, Status,
};

/// WASM-friendly wrapper around a game in progress.
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
    to_move: Color,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game, First to move
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            inner: GameState::new(),
            to_move: Color::First,
        }
    }

    /// Player to move (1 or 2)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.to_move.number()
    }

    /// Winner after the last move: 0 (none), 1 or 2
    pub fn winner(&self) -> u8 {
        winner(&self.inner, self.to_move.opponent()).map_or(0, Color::number)
    }

    #[wasm_bindgen(js_name = isFull)]
    pub fn is_full(&self) -> bool {
        is_full(&self.inner)
    }

    /// Stock groups for a player as [g0, g1, g2]
    pub fn stocks(&self, player: u8) -> Vec<u8> {
        let color = if player == 1 { Color::First } else { Color::Second };
        self.inner.stock(color).groups().to_vec()
    }

    /// Get legal moves for the player to move as a JSON array
    /// Each move is { to: [col, row], from: [col, row] | null, size: 1-4 | null }
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        let moves: Vec<WasmMove> = legal_moves(self.to_move, &self.inner)
            .into_iter()
            .map(WasmMove::from)
            .collect();
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Apply a move for the player to move. Returns an error message if rejected.
    /// For placement: applyMove(toCol, toRow, null, null, size)
    /// For relocation: applyMove(toCol, toRow, fromCol, fromRow, null)
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(
        &mut self,
        to_col: u8,
        to_row: u8,
        from_col: Option<u8>,
        from_row: Option<u8>,
        size: Option<u8>,
    ) -> Result<(), JsValue> {
        let source = match (from_col, from_row, size) {
            (Some(col), Some(row), _) => Source::Board(Coord::new(col, row)),
            (_, _, Some(size)) => Source::Stock(size),
            _ => return Err(JsValue::from_str("expected a source cell or a stock size")),
        };
        let mov = crate::validate_and_build_move(
            self.to_move,
            source,
            Coord::new(to_col, to_row),
            &self.inner,
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.play(mov)
    }

    /// Let the engine move for the player to move. Returns false if it has no move.
    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self, seed: u64) -> Result<bool, JsValue> {
        let mut rng = StdRng::seed_from_u64(seed);
        match choose_ai_move(self.to_move, &self.inner, &mut rng)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
        {
            Some(mov) => self.play(mov).map(|_| true),
            None => Ok(false),
        }
    }

    /// Get cell stack at position as array of [player, size, player, size, ...]
    /// Bottom to top order
    #[wasm_bindgen(js_name = cellStack)]
    pub fn cell_stack(&self, col: u8, row: u8) -> Vec<u8> {
        match Coord::new(col, row).to_pos() {
            Some(pos) => self
                .inner
                .board()
                .cell(pos)
                .pieces()
                .flat_map(|(color, size)| [color.number(), size.value()])
                .collect(),
            None => vec![],
        }
    }

    /// Get game result: "ongoing", "player_one_wins", "player_two_wins", or "draw"
    pub fn result(&self) -> String {
        match status(&self.inner, self.to_move.opponent()) {
            Status::Ongoing => "ongoing".to_string(),
            Status::Won(Color::First) => "player_one_wins".to_string(),
            Status::Won(Color::Second) => "player_two_wins".to_string(),
            Status::Draw => "draw".to_string(),
        }
    }

    /// Clone the game
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_game(&self) -> WasmGame {
        WasmGame {
            inner: self.inner,
            to_move: self.to_move,
        }
    }
}

impl WasmGame {
    fn play(&mut self, mov: Move) -> Result<(), JsValue> {
        self.inner = apply_move(&self.inner, self.to_move, mov)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.to_move = self.to_move.opponent();
        Ok(())
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable move for JavaScript
#[derive(serde::Serialize)]
struct WasmMove {
    to: [u8; 2],
    from: Option<[u8; 2]>,
    size: Option<u8>,
}

fn col_row(pos: Pos) -> [u8; 2] {
    [pos.col(), pos.row()]
}

impl From<Move> for WasmMove {
    fn from(mov: Move) -> Self {
        match mov {
            Move::Place { size, to } => WasmMove {
                to: col_row(to),
                from: None,
                size: Some(size.value()),
            },
            Move::Relocate { from, to } => WasmMove {
                to: col_row(to),
                from: Some(col_row(from)),
                size: None,
            },
        }
    }
}
