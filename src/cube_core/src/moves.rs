use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

/// One of the six face layers, in the fixed index order used everywhere in
/// this crate. Opposite faces share an index pair: `U/D`, `L/R`, `F/B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    U = 0,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }
}

/// A face turn. The eighteen variants are indexed 0..17 in the canonical
/// order `U, U', U2, D, D', D2, L, L', L2, R, R', R2, F, F', F2, B, B', B2`,
/// so `index / 3` is the face and `index % 3` the turn kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Move {
    U = 0,
    Up,
    U2,
    D,
    Dp,
    D2,
    L,
    Lp,
    L2,
    R,
    Rp,
    R2,
    F,
    Fp,
    F2,
    B,
    Bp,
    B2,
}

/// All eighteen moves in enumeration order.
pub const ALL_MOVES: [Move; 18] = [
    Move::U,
    Move::Up,
    Move::U2,
    Move::D,
    Move::Dp,
    Move::D2,
    Move::L,
    Move::Lp,
    Move::L2,
    Move::R,
    Move::Rp,
    Move::R2,
    Move::F,
    Move::Fp,
    Move::F2,
    Move::B,
    Move::Bp,
    Move::B2,
];

/// The ten moves that generate the phase-2 subgroup G1.
pub const PHASE2_MOVES: [Move; 10] = [
    Move::U,
    Move::Up,
    Move::U2,
    Move::D,
    Move::Dp,
    Move::D2,
    Move::L2,
    Move::R2,
    Move::F2,
    Move::B2,
];

const MOVE_NAMES: [&str; 18] = [
    "U", "U'", "U2", "D", "D'", "D2", "L", "L'", "L2", "R", "R'", "R2", "F", "F'", "F2", "B",
    "B'", "B2",
];

impl Move {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The face this move turns.
    #[inline]
    pub fn face(self) -> Face {
        Face::ALL[self.index() / 3]
    }

    /// How many clockwise quarter turns realize this move (1, 3, or 2).
    #[inline]
    pub fn quarter_turns(self) -> usize {
        match self.index() % 3 {
            0 => 1,
            1 => 3,
            _ => 2,
        }
    }

    /// Quarter turns invert to the opposite quarter turn; half turns are
    /// self-inverse.
    pub fn inverse(self) -> Move {
        let index = self.index();
        match index % 3 {
            0 => ALL_MOVES[index + 1],
            1 => ALL_MOVES[index - 1],
            _ => self,
        }
    }

    /// The canonical name, e.g. `"U'"` or `"F2"`.
    pub fn name(self) -> &'static str {
        MOVE_NAMES[self.index()]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a face turn")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MOVE_NAMES
            .iter()
            .position(|&name| name == s)
            .map(|index| ALL_MOVES[index])
            .ok_or_else(|| ParseMoveError(s.to_owned()))
    }
}

/// Parse a whitespace-separated move sequence like `"R U R' U2"`.
///
/// # Errors
///
/// If any token is not one of the eighteen canonical move names.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    s.split_whitespace().map(Move::from_str).collect()
}

/// Render a move sequence with the canonical names, space separated.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(|m| Move::name(*m)).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_order_matches_canonical_enumeration() {
        for (i, m) in ALL_MOVES.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
        assert_eq!(Move::U.face(), Face::U);
        assert_eq!(Move::Bp.face(), Face::B);
        assert_eq!(Move::R2.face(), Face::R);
    }

    #[test]
    fn phase2_moves_have_expected_absolute_indices() {
        let indices = PHASE2_MOVES.map(Move::index);
        assert_eq!(indices, [0, 1, 2, 3, 4, 5, 8, 11, 14, 17]);
    }

    #[test]
    fn inverse_flips_quarter_turns_only() {
        assert_eq!(Move::U.inverse(), Move::Up);
        assert_eq!(Move::Up.inverse(), Move::U);
        assert_eq!(Move::F2.inverse(), Move::F2);
        for m in ALL_MOVES {
            assert_eq!(m.inverse().inverse(), m);
        }
    }

    #[test]
    fn names_round_trip_through_parsing() {
        for m in ALL_MOVES {
            assert_eq!(m.name().parse::<Move>(), Ok(m));
        }
        assert!("X".parse::<Move>().is_err());
        assert!("U3".parse::<Move>().is_err());
    }

    #[test]
    fn parses_move_sequences() {
        let seq = parse_moves("R U R' U2").unwrap();
        assert_eq!(seq, vec![Move::R, Move::U, Move::Rp, Move::U2]);
        assert_eq!(format_moves(&seq), "R U R' U2");
        assert!(parse_moves("R U x").is_err());
        assert!(parse_moves("").unwrap().is_empty());
    }
}
