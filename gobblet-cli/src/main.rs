//! Gobblet (4x4) in the terminal
//!
//! Any mix of human and computer players. Humans type a stock size (1-4) or
//! a cell (column letter, row letter, e.g. `CB`) and then a destination cell.
//!
//! Usage:
//!   gobblet                      # asks how many humans are playing
//!   gobblet --humans 0 --seed 7  # computer against computer, repeatable
//!   RUST_LOG=debug gobblet       # show the computer's top candidates

mod error;
mod game;
mod input;
mod render;

use std::io;
use std::process;

use clap::Parser;
use env_logger::Env;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::CliError;
use crate::game::Session;

#[derive(Parser, Debug)]
#[command(name = "gobblet", about = "Play Gobblet on a 4x4 board")]
struct Args {
    /// Number of human players (0-2); asked for when omitted
    #[arg(long, env = "GOBBLET_HUMANS", value_parser = clap::value_parser!(u8).range(0..=2))]
    humans: Option<u8>,

    /// Seed for the computer players' random tie-breaks
    #[arg(long, env = "GOBBLET_SEED")]
    seed: Option<u64>,

    /// Declare a draw after this many moves
    #[arg(long)]
    max_moves: Option<u32>,
}

fn run(args: Args) -> Result<(), CliError> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let stdin = io::stdin();
    let mut session =
        Session::new(stdin.lock(), io::stdout(), rng).with_max_moves(args.max_moves);

    let humans = match args.humans {
        Some(n) => n,
        None => session.ask_humans()?,
    };
    log::info!("starting game with {} human player(s), seed {:?}", humans, args.seed);
    session.set_humans(humans);
    session.play()?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
