//! Interactive turn loop.
//!
//! Generic over the reader and writer so whole games can be scripted in
//! tests.

use std::io::{BufRead, Write};

use gobblet_core::{
    apply_move, legal_moves, new_game, rank, status, validate_and_build_move, validate_source,
    Color, GameState, Move, Status,
};
use log::{debug, info, warn};
use rand::Rng;

use crate::error::CliError;
use crate::input::{parse_destination, parse_source, tokens};
use crate::render::{player_char, BoardView};

/// How a session ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Won { winner: Color, moves: u32 },
    Draw { moves: u32 },
}

/// One game between any mix of people and computer players.
pub struct Session<R, W, G> {
    input: R,
    out: W,
    rng: G,
    /// Indexed by `Color::index`
    computer: [bool; 2],
    max_moves: Option<u32>,
}

impl<R: BufRead, W: Write, G: Rng> Session<R, W, G> {
    pub fn new(input: R, out: W, rng: G) -> Self {
        Session {
            input,
            out,
            rng,
            computer: [false, false],
            max_moves: None,
        }
    }

    /// Stop with a draw once this many moves have been played.
    pub fn with_max_moves(mut self, max_moves: Option<u32>) -> Self {
        self.max_moves = max_moves;
        self
    }

    /// 0: both computer, 1: human First against the computer, 2: both human.
    pub fn set_humans(&mut self, humans: u8) {
        self.computer = match humans {
            0 => [true, true],
            1 => [false, true],
            _ => [false, false],
        };
    }

    /// Ask until a single digit 0-2 is entered.
    pub fn ask_humans(&mut self) -> Result<u8, CliError> {
        loop {
            let answer = self.prompt("How many human players? (0-2) ")?;
            if let Ok(n @ 0..=2) = answer.trim().parse::<u8>() {
                return Ok(n);
            }
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn play(&mut self) -> Result<Outcome, CliError> {
        let mut state = new_game();
        let mut player = Color::First;
        let mut moves = 0u32;
        self.show(&state)?;

        loop {
            writeln!(
                self.out,
                "Player {} ({}) to move",
                player.number(),
                player_char(player)
            )?;

            let mov = if self.computer[player.index()] {
                self.computer_move(player, &state)?
            } else {
                self.human_move(player, &state)?
            };
            let Some(mov) = mov else {
                writeln!(self.out, "Player {} has no legal move", player.number())?;
                info!("player {} is stuck after {} moves", player.number(), moves);
                return Ok(Outcome::Draw { moves });
            };

            state = apply_move(&state, player, mov)?;
            moves += 1;
            self.show(&state)?;

            match status(&state, player) {
                Status::Won(winner) => {
                    writeln!(
                        self.out,
                        "Player {} has won in {} moves!",
                        winner.number(),
                        moves
                    )?;
                    info!("player {} won in {} moves", winner.number(), moves);
                    return Ok(Outcome::Won { winner, moves });
                }
                Status::Draw => {
                    writeln!(self.out, "The game is a draw after {} moves", moves)?;
                    info!("draw after {} moves", moves);
                    return Ok(Outcome::Draw { moves });
                }
                Status::Ongoing => {}
            }

            if self.max_moves.is_some_and(|max| moves >= max) {
                writeln!(self.out, "Move limit reached: the game is a draw after {} moves", moves)?;
                info!("move limit {} reached", moves);
                return Ok(Outcome::Draw { moves });
            }
            player = player.opponent();
        }
    }

    fn show(&mut self, state: &GameState) -> Result<(), CliError> {
        writeln!(self.out, "{}", BoardView(state))?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<String, CliError> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line)
    }

    fn reject(&mut self, reason: &dyn std::fmt::Display) -> Result<(), CliError> {
        warn!("rejected input: {}", reason);
        writeln!(self.out, "Invalid move: {}", reason)?;
        Ok(())
    }

    fn computer_move(&mut self, player: Color, state: &GameState) -> Result<Option<Move>, CliError> {
        let moves = legal_moves(player, state);
        let ranked = rank(player, state, &moves, &mut self.rng)?;
        for candidate in ranked.iter().take(3) {
            debug!("candidate {} scored {}", candidate.mov, candidate.score);
        }

        let Some(best) = ranked.first() else {
            return Ok(None);
        };
        writeln!(
            self.out,
            "Computer player {} move is: {}",
            player.number(),
            tokens(best.mov)
        )?;
        info!("computer player {} plays {}", player.number(), best.mov);
        Ok(Some(best.mov))
    }

    fn human_move(&mut self, player: Color, state: &GameState) -> Result<Option<Move>, CliError> {
        if legal_moves(player, state).is_empty() {
            return Ok(None);
        }
        loop {
            let token = self.prompt("Enter piece size (1-4) to add or location (XY) to move: ")?;
            let source = match parse_source(&token) {
                Ok(source) => source,
                Err(e) => {
                    self.reject(&e)?;
                    continue;
                }
            };
            if let Err(e) = validate_source(state, player, source) {
                self.reject(&e)?;
                continue;
            }

            let token = self.prompt("Enter destination location (XY): ")?;
            let dest = match parse_destination(&token) {
                Ok(dest) => dest,
                Err(e) => {
                    self.reject(&e)?;
                    continue;
                }
            };
            match validate_and_build_move(player, source, dest, state) {
                Ok(mov) => return Ok(Some(mov)),
                Err(e) => {
                    self.reject(&e)?;
                    writeln!(self.out)?;
                }
            }
        }
    }
}
