//! Move token parsing.
//!
//! A source is a stock size (`"3"`) or a cell (`"CB"`, column then row); a
//! destination is always a cell. Letters past `D` and digits outside 1-4
//! are passed through so the engine's validator can report them.

use gobblet_core::{Coord, Move, Source};

use crate::error::InputError;

fn letter_index(c: char) -> Result<u8, InputError> {
    if c.is_ascii_alphabetic() {
        Ok(c.to_ascii_uppercase() as u8 - b'A')
    } else {
        Err(InputError::NotALetter(c))
    }
}

fn parse_cell(chars: [char; 2]) -> Result<Coord, InputError> {
    Ok(Coord::new(letter_index(chars[0])?, letter_index(chars[1])?))
}

fn two_chars(token: &str) -> Option<[char; 2]> {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => Some([a, b]),
        _ => None,
    }
}

/// Parse the "what to move" token.
pub fn parse_source(token: &str) -> Result<Source, InputError> {
    let token = token.trim();
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c
            .to_digit(10)
            .map(|d| Source::Stock(d as u8))
            .ok_or(InputError::BadSource);
    }
    let cell = two_chars(token).ok_or(InputError::BadSource)?;
    Ok(Source::Board(parse_cell(cell)?))
}

/// Parse the "where to" token.
pub fn parse_destination(token: &str) -> Result<Coord, InputError> {
    let cell = two_chars(token.trim()).ok_or(InputError::BadDestination)?;
    parse_cell(cell)
}

/// The two tokens a person would type for `mov`, e.g. `"3 CB"`.
pub fn tokens(mov: Move) -> String {
    match mov {
        Move::Place { size, to } => format!("{} {}", size.value(), to),
        Move::Relocate { from, to } => format!("{} {}", from, to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobblet_core::{Pos, Size};

    #[test]
    fn test_parse_stock_source() {
        assert_eq!(parse_source("4"), Ok(Source::Stock(4)));
        assert_eq!(parse_source(" 1\n"), Ok(Source::Stock(1)));
        // Out of range sizes are left for the validator.
        assert_eq!(parse_source("7"), Ok(Source::Stock(7)));
        assert_eq!(parse_source("0"), Ok(Source::Stock(0)));
        assert_eq!(parse_source("x"), Err(InputError::BadSource));
    }

    #[test]
    fn test_parse_cell_source() {
        assert_eq!(parse_source("CB"), Ok(Source::Board(Coord::new(2, 1))));
        assert_eq!(parse_source("cb"), Ok(Source::Board(Coord::new(2, 1))));
        assert_eq!(parse_source("AD\r\n"), Ok(Source::Board(Coord::new(0, 3))));
        assert_eq!(parse_source("ZA"), Ok(Source::Board(Coord::new(25, 0))));
        assert_eq!(parse_source("A1"), Err(InputError::NotALetter('1')));
    }

    #[test]
    fn test_parse_source_wrong_length() {
        assert_eq!(parse_source(""), Err(InputError::BadSource));
        assert_eq!(parse_source("ABC"), Err(InputError::BadSource));
        assert_eq!(parse_source("12"), Err(InputError::NotALetter('1')));
    }

    #[test]
    fn test_parse_destination() {
        assert_eq!(parse_destination("dd"), Ok(Coord::new(3, 3)));
        assert_eq!(parse_destination("EA"), Ok(Coord::new(4, 0)));
        assert_eq!(parse_destination("4"), Err(InputError::BadDestination));
        assert_eq!(parse_destination("A?"), Err(InputError::NotALetter('?')));
    }

    #[test]
    fn test_tokens_round_trip_through_parser() {
        let place = Move::Place { size: Size::Medium, to: Pos::from_col_row(2, 1) };
        assert_eq!(tokens(place), "3 CB");

        let relocate = Move::Relocate { from: Pos(0), to: Pos(15) };
        assert_eq!(tokens(relocate), "AA DD");
        let mut parts = tokens(relocate).split(' ').map(str::to_string).collect::<Vec<_>>();
        let dest = parts.pop().unwrap();
        assert_eq!(parse_source(&parts[0]), Ok(Source::Board(Coord::new(0, 0))));
        assert_eq!(parse_destination(&dest), Ok(Coord::new(3, 3)));
    }
}
