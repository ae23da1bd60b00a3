//! Facelet and piece-level models of the 3x3x3 cube.
//!
//! [`Cube`] is the authoritative facelet engine: 54 stickers, moves applied
//! as face rotations plus adjacency cycles, and solvability validation.
//! [`CubieCube`] is the derived piece representation the solver works on,
//! and [`coords`] holds the packed-integer encodings of its components.

pub mod coords;
pub mod cubie;
pub mod facelet;
pub mod moves;

pub use cubie::{CubieCube, InvalidCubeError};
pub use facelet::{Color, Cube, ParseCubeError};
pub use moves::{
    format_moves, parse_moves, Face, Move, ParseMoveError, ALL_MOVES, PHASE2_MOVES,
};
