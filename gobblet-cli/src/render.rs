//! ASCII board drawing.
//!
//! Each cell shows only its visible piece as a 2x2 block of the owner's
//! character; larger pieces fill more of the block.

use std::fmt;

use gobblet_core::{Color, GameState, Pos, Size, BOARD_SIZE};

const HORIZ_LINE: &str = "  +----+----+----+----+";
const HORIZ_LABELS: &str = "    A    B    C    D";

/// Display character for a player.
pub fn player_char(color: Color) -> char {
    match color {
        Color::First => 'X',
        Color::Second => 'O',
    }
}

/// Top and bottom halves of a cell's glyph.
fn glyph(top: Option<(Color, Size)>) -> [[char; 2]; 2] {
    let Some((color, size)) = top else {
        return [[' '; 2]; 2];
    };
    let c = player_char(color);
    match size {
        Size::Large => [[c, c], [c, c]],
        Size::Medium => [[c, c], [c, ' ']],
        Size::Small => [[c, c], [' ', ' ']],
        Size::Tiny => [[c, ' '], [' ', ' ']],
    }
}

/// Board plus both stock lines, ready to print.
pub struct BoardView<'a>(pub &'a GameState);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0.board();
        writeln!(f, "{}", HORIZ_LINE)?;

        for row in (0..BOARD_SIZE).rev() {
            let glyphs: Vec<_> = (0..BOARD_SIZE)
                .map(|col| glyph(board.top_piece(Pos::from_col_row(col, row))))
                .collect();

            for half in 0..2 {
                // Row label sits on the lower half
                let label = if half == 1 { (b'A' + row) as char } else { ' ' };
                write!(f, "{} |", label)?;
                for g in &glyphs {
                    write!(f, " {}{} |", g[half][0], g[half][1])?;
                }
                writeln!(f)?;
            }
            writeln!(f, "{}", HORIZ_LINE)?;
        }
        writeln!(f, "{}", HORIZ_LABELS)?;
        writeln!(f)?;

        for color in [Color::First, Color::Second] {
            writeln!(
                f,
                "Player {} ({}) Stacks: {:?}",
                color.number(),
                player_char(color),
                self.0.stock(color).groups()
            )?;
        }
        Ok(())
    }
}
