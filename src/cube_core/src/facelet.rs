use std::fmt;

use thiserror::Error;

use crate::moves::{Face, Move, ALL_MOVES};

/// Sticker color. The discriminant order is fixed for the lifetime of the
/// process; everything else keys off the home-face assignment below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Yellow,
    Red,
    Orange,
    Green,
    Blue,
}

impl Color {
    pub const COUNT: usize = 6;
}

/// Home color of each face, indexed by `Face`: U white, D yellow, L green,
/// R blue, F red, B orange. Centers never move, so this is also the color
/// scheme of any legal state.
pub const HOME_COLORS: [Color; 6] = [
    Color::White,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::Orange,
];

const fn fi(face: Face, pos: usize) -> usize {
    face as usize * 9 + pos
}

// Corner positions URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB. The U/D facelet
// comes first, then clockwise around the corner.
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [fi(Face::U, 8), fi(Face::R, 0), fi(Face::F, 2)],
    [fi(Face::U, 6), fi(Face::F, 0), fi(Face::L, 2)],
    [fi(Face::U, 0), fi(Face::L, 0), fi(Face::B, 2)],
    [fi(Face::U, 2), fi(Face::B, 0), fi(Face::R, 2)],
    [fi(Face::D, 2), fi(Face::F, 8), fi(Face::R, 6)],
    [fi(Face::D, 0), fi(Face::L, 8), fi(Face::F, 6)],
    [fi(Face::D, 6), fi(Face::B, 8), fi(Face::L, 6)],
    [fi(Face::D, 8), fi(Face::R, 8), fi(Face::B, 6)],
];

const CORNER_COLORS: [[Color; 3]; 8] = [
    [Color::White, Color::Blue, Color::Red],
    [Color::White, Color::Red, Color::Green],
    [Color::White, Color::Green, Color::Orange],
    [Color::White, Color::Orange, Color::Blue],
    [Color::Yellow, Color::Red, Color::Blue],
    [Color::Yellow, Color::Green, Color::Red],
    [Color::Yellow, Color::Orange, Color::Green],
    [Color::Yellow, Color::Blue, Color::Orange],
];

// Edge positions UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR. The U/D
// facelet comes first for the first eight, the F/B facelet for the slice
// edges; an edge is unflipped exactly when its first facelet shows the
// first color of its pair.
const EDGE_FACELETS: [[usize; 2]; 12] = [
    [fi(Face::U, 5), fi(Face::R, 1)],
    [fi(Face::U, 7), fi(Face::F, 1)],
    [fi(Face::U, 3), fi(Face::L, 1)],
    [fi(Face::U, 1), fi(Face::B, 1)],
    [fi(Face::D, 5), fi(Face::R, 7)],
    [fi(Face::D, 1), fi(Face::F, 7)],
    [fi(Face::D, 3), fi(Face::L, 7)],
    [fi(Face::D, 7), fi(Face::B, 7)],
    [fi(Face::F, 5), fi(Face::R, 3)],
    [fi(Face::F, 3), fi(Face::L, 5)],
    [fi(Face::B, 5), fi(Face::L, 3)],
    [fi(Face::B, 3), fi(Face::R, 5)],
];

const EDGE_COLORS: [[Color; 2]; 12] = [
    [Color::White, Color::Blue],
    [Color::White, Color::Red],
    [Color::White, Color::Green],
    [Color::White, Color::Orange],
    [Color::Yellow, Color::Blue],
    [Color::Yellow, Color::Red],
    [Color::Yellow, Color::Green],
    [Color::Yellow, Color::Orange],
    [Color::Red, Color::Blue],
    [Color::Red, Color::Green],
    [Color::Orange, Color::Green],
    [Color::Orange, Color::Blue],
];

// For a clockwise turn of each face, the three 4-cycles among the adjacent
// facelets of the neighbor faces (contents advance a -> b -> c -> d -> a).
const NEIGHBOR_CYCLES: [[[usize; 4]; 3]; 6] = [
    // U
    [
        [fi(Face::F, 0), fi(Face::L, 0), fi(Face::B, 0), fi(Face::R, 0)],
        [fi(Face::F, 1), fi(Face::L, 1), fi(Face::B, 1), fi(Face::R, 1)],
        [fi(Face::F, 2), fi(Face::L, 2), fi(Face::B, 2), fi(Face::R, 2)],
    ],
    // D
    [
        [fi(Face::F, 6), fi(Face::R, 6), fi(Face::B, 6), fi(Face::L, 6)],
        [fi(Face::F, 7), fi(Face::R, 7), fi(Face::B, 7), fi(Face::L, 7)],
        [fi(Face::F, 8), fi(Face::R, 8), fi(Face::B, 8), fi(Face::L, 8)],
    ],
    // L
    [
        [fi(Face::U, 0), fi(Face::F, 0), fi(Face::D, 0), fi(Face::B, 8)],
        [fi(Face::U, 3), fi(Face::F, 3), fi(Face::D, 3), fi(Face::B, 5)],
        [fi(Face::U, 6), fi(Face::F, 6), fi(Face::D, 6), fi(Face::B, 2)],
    ],
    // R
    [
        [fi(Face::U, 2), fi(Face::B, 6), fi(Face::D, 2), fi(Face::F, 2)],
        [fi(Face::U, 5), fi(Face::B, 3), fi(Face::D, 5), fi(Face::F, 5)],
        [fi(Face::U, 8), fi(Face::B, 0), fi(Face::D, 8), fi(Face::F, 8)],
    ],
    // F
    [
        [fi(Face::U, 6), fi(Face::R, 0), fi(Face::D, 2), fi(Face::L, 8)],
        [fi(Face::U, 7), fi(Face::R, 3), fi(Face::D, 1), fi(Face::L, 5)],
        [fi(Face::U, 8), fi(Face::R, 6), fi(Face::D, 0), fi(Face::L, 2)],
    ],
    // B
    [
        [fi(Face::U, 2), fi(Face::L, 0), fi(Face::D, 6), fi(Face::R, 8)],
        [fi(Face::U, 1), fi(Face::L, 3), fi(Face::D, 7), fi(Face::R, 5)],
        [fi(Face::U, 0), fi(Face::L, 6), fi(Face::D, 8), fi(Face::R, 2)],
    ],
];

/// The facelet-level cube: six faces of nine stickers, stored face by face
/// with a row-major 3x3 layout inside each face block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cube {
    facelets: [Color; 54],
}

impl Default for Cube {
    fn default() -> Self {
        Cube::new()
    }
}

impl Cube {
    /// A solved cube in the home color scheme.
    pub fn new() -> Self {
        let mut cube = Cube {
            facelets: [Color::White; 54],
        };
        cube.reset();
        cube
    }

    /// Restore every face to its home color.
    pub fn reset(&mut self) {
        for face in Face::ALL {
            for pos in 0..9 {
                self.facelets[fi(face, pos)] = HOME_COLORS[face.index()];
            }
        }
    }

    /// The raw 54-facelet state in global index order.
    pub fn state(&self) -> &[Color; 54] {
        &self.facelets
    }

    pub fn set_state(&mut self, state: [Color; 54]) {
        self.facelets = state;
    }

    pub fn facelet(&self, face: Face, pos: usize) -> Color {
        self.facelets[fi(face, pos)]
    }

    /// Map a sticker surface coordinate (components in `{-1, 0, 1}`) to its
    /// position 0..8 on `face`, or `None` if the coordinate does not lie on
    /// that face. Row 0 is the top of the face as seen from outside.
    pub fn facelet_index_for(face: Face, x: i32, y: i32, z: i32) -> Option<usize> {
        let (row, col) = match face {
            Face::U if y == 1 => (z + 1, x + 1),
            Face::D if y == -1 => (1 - z, x + 1),
            Face::L if x == -1 => (1 - y, z + 1),
            Face::R if x == 1 => (1 - y, 1 - z),
            Face::F if z == 1 => (1 - y, x + 1),
            Face::B if z == -1 => (1 - y, 1 - x),
            _ => return None,
        };
        if (0..3).contains(&row) && (0..3).contains(&col) {
            Some((row * 3 + col) as usize)
        } else {
            None
        }
    }

    /// Apply one face turn to the facelet array.
    pub fn apply(&mut self, m: Move) {
        for _ in 0..m.quarter_turns() {
            self.turn_cw(m.face());
        }
    }

    pub fn apply_all(&mut self, moves: &[Move]) {
        for &m in moves {
            self.apply(m);
        }
    }

    fn turn_cw(&mut self, face: Face) {
        let base = face.index() * 9;
        self.cycle4(base, base + 2, base + 8, base + 6);
        self.cycle4(base + 1, base + 5, base + 7, base + 3);
        for cycle in &NEIGHBOR_CYCLES[face.index()] {
            self.cycle4(cycle[0], cycle[1], cycle[2], cycle[3]);
        }
    }

    // Contents advance a -> b -> c -> d -> a.
    fn cycle4(&mut self, a: usize, b: usize, c: usize, d: usize) {
        let tmp = self.facelets[d];
        self.facelets[d] = self.facelets[c];
        self.facelets[c] = self.facelets[b];
        self.facelets[b] = self.facelets[a];
        self.facelets[a] = tmp;
    }

    /// Apply `count` uniformly random face turns and return them.
    pub fn scramble(&mut self, count: usize) -> Vec<Move> {
        let moves: Vec<Move> = (0..count)
            .map(|_| ALL_MOVES[fastrand::usize(..ALL_MOVES.len())])
            .collect();
        self.apply_all(&moves);
        debug_assert!(self.is_solvable());
        moves
    }

    /// True iff every facelet of each face matches that face's center.
    pub fn is_solved(&self) -> bool {
        Face::ALL.iter().all(|&face| {
            let center = self.facelet(face, 4);
            (0..9).all(|pos| self.facelet(face, pos) == center)
        })
    }

    /// Which corner piece occupies corner position `pos`, or `None` if the
    /// three facelets there match no real corner.
    pub fn corner_permutation(&self, pos: usize) -> Option<u8> {
        let [c0, c1, c2] = CORNER_FACELETS[pos].map(|i| self.facelets[i]);
        if c0 == c1 || c1 == c2 || c0 == c2 {
            return None;
        }
        (0..8)
            .find(|&corner| {
                let colors = &CORNER_COLORS[corner];
                colors.contains(&c0) && colors.contains(&c1) && colors.contains(&c2)
            })
            .map(|corner| corner as u8)
    }

    /// Twist of the corner at position `pos`: 0 if its U/D-colored facelet is
    /// on the U or D face, 1 if twisted clockwise from there, 2 if twisted
    /// counter-clockwise.
    pub fn corner_orientation(&self, pos: usize) -> u8 {
        let c0 = self.facelets[CORNER_FACELETS[pos][0]];
        if matches!(c0, Color::White | Color::Yellow) {
            return 0;
        }
        let c1 = self.facelets[CORNER_FACELETS[pos][1]];
        if matches!(c1, Color::White | Color::Yellow) {
            1
        } else {
            2
        }
    }

    /// Which edge piece occupies edge position `pos`, or `None` if the two
    /// facelets there match no real edge.
    pub fn edge_permutation(&self, pos: usize) -> Option<u8> {
        let [c0, c1] = EDGE_FACELETS[pos].map(|i| self.facelets[i]);
        (0..12)
            .find(|&edge| {
                let [e0, e1] = EDGE_COLORS[edge];
                (c0 == e0 && c1 == e1) || (c0 == e1 && c1 == e0)
            })
            .map(|edge| edge as u8)
    }

    /// Flip of the edge at position `pos`: 0 if its primary facelet shows the
    /// primary color of the piece there. Unmatchable facelets report 0; the
    /// permutation query is the validity gate.
    pub fn edge_orientation(&self, pos: usize) -> u8 {
        let c0 = self.facelets[EDGE_FACELETS[pos][0]];
        match self.edge_permutation(pos) {
            Some(edge) => u8::from(c0 != EDGE_COLORS[edge as usize][0]),
            None => 0,
        }
    }

    /// Check the five reachability invariants: color counts, corner and edge
    /// permutation validity, twist sum mod 3, flip sum mod 2, and matching
    /// corner/edge permutation parity.
    pub fn is_solvable(&self) -> bool {
        let mut counts = [0usize; Color::COUNT];
        for &color in &self.facelets {
            counts[color as usize] += 1;
        }
        if counts != [9; Color::COUNT] {
            return false;
        }

        let mut corner_perm = [0u8; 8];
        let mut seen_corner = [false; 8];
        let mut co_sum = 0u32;
        for pos in 0..8 {
            let Some(corner) = self.corner_permutation(pos) else {
                return false;
            };
            if seen_corner[corner as usize] {
                return false;
            }
            seen_corner[corner as usize] = true;
            corner_perm[pos] = corner;
            co_sum += u32::from(self.corner_orientation(pos));
        }
        if co_sum % 3 != 0 {
            return false;
        }

        let mut edge_perm = [0u8; 12];
        let mut seen_edge = [false; 12];
        let mut eo_sum = 0u32;
        for pos in 0..12 {
            let Some(edge) = self.edge_permutation(pos) else {
                return false;
            };
            if seen_edge[edge as usize] {
                return false;
            }
            seen_edge[edge as usize] = true;
            edge_perm[pos] = edge;
            eo_sum += u32::from(self.edge_orientation(pos));
        }
        if eo_sum % 2 != 0 {
            return false;
        }

        permutation_parity(&corner_perm) == permutation_parity(&edge_perm)
    }

    /// The 54-character facelet string: each sticker as the initial of its
    /// home face, in global index order (faces U, D, L, R, F, B).
    pub fn facelet_string(&self) -> String {
        self.facelets
            .iter()
            .map(|&color| home_face(color).letter())
            .collect()
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.facelet_string())
    }
}

fn home_face(color: Color) -> Face {
    match color {
        Color::White => Face::U,
        Color::Yellow => Face::D,
        Color::Green => Face::L,
        Color::Blue => Face::R,
        Color::Red => Face::F,
        Color::Orange => Face::B,
    }
}

fn permutation_parity(perm: &[u8]) -> u32 {
    let mut inversions = 0;
    for i in 0..perm.len() {
        for j in i + 1..perm.len() {
            if perm[i] > perm[j] {
                inversions += 1;
            }
        }
    }
    inversions & 1
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCubeError {
    #[error("expected 54 facelet characters, got {0}")]
    BadLength(usize),
    #[error("`{0}` is not a face letter (expected one of U, D, L, R, F, B)")]
    BadFaceLetter(char),
}

impl TryFrom<&str> for Cube {
    type Error = ParseCubeError;

    /// Parse the format produced by [`Cube::facelet_string`]. The result is
    /// not validated beyond the alphabet; run [`Cube::is_solvable`] before
    /// handing it to a solver.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 54 {
            return Err(ParseCubeError::BadLength(chars.len()));
        }
        let mut facelets = [Color::White; 54];
        for (i, &c) in chars.iter().enumerate() {
            let face = Face::ALL
                .iter()
                .find(|face| face.letter() == c)
                .ok_or(ParseCubeError::BadFaceLetter(c))?;
            facelets[i] = HOME_COLORS[face.index()];
        }
        Ok(Cube { facelets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::parse_moves;

    #[test]
    fn reset_color_scheme() {
        let cube = Cube::new();
        assert_eq!(cube.facelet(Face::U, 4), Color::White);
        assert_eq!(cube.facelet(Face::D, 4), Color::Yellow);
        assert_eq!(cube.facelet(Face::L, 4), Color::Green);
        assert_eq!(cube.facelet(Face::R, 4), Color::Blue);
        assert_eq!(cube.facelet(Face::F, 4), Color::Red);
        assert_eq!(cube.facelet(Face::B, 4), Color::Orange);
        assert!(cube.is_solved());
    }

    #[test]
    fn move_then_inverse_is_identity() {
        for m in ALL_MOVES {
            let mut cube = Cube::new();
            let before = *cube.state();
            cube.apply(m);
            cube.apply(m.inverse());
            assert_eq!(*cube.state(), before, "{m} then {} not identity", m.inverse());
        }
    }

    #[test]
    fn four_quarter_turns_and_two_half_turns_are_identity() {
        for face in 0..6 {
            for kind in [0, 1] {
                let mut cube = Cube::new();
                let before = *cube.state();
                for _ in 0..4 {
                    cube.apply(ALL_MOVES[face * 3 + kind]);
                }
                assert_eq!(*cube.state(), before);
            }
            let mut cube = Cube::new();
            let before = *cube.state();
            cube.apply(ALL_MOVES[face * 3 + 2]);
            cube.apply(ALL_MOVES[face * 3 + 2]);
            assert_eq!(*cube.state(), before);
        }
    }

    #[test]
    fn centers_and_color_counts_survive_moves() {
        let mut cube = Cube::new();
        cube.apply_all(&parse_moves("U R F D L' B2 U' R' F' D' L B").unwrap());

        for face in Face::ALL {
            assert_eq!(cube.facelet(face, 4), HOME_COLORS[face.index()]);
        }

        let mut counts = [0usize; Color::COUNT];
        for &color in cube.state() {
            counts[color as usize] += 1;
        }
        assert_eq!(counts, [9; Color::COUNT]);
    }

    #[test]
    fn solved_and_scrambled_cubes_are_solvable() {
        let mut cube = Cube::new();
        assert!(cube.is_solvable());

        cube.apply_all(&parse_moves("R U R' U'").unwrap());
        assert!(cube.is_solvable());
        assert!(!cube.is_solved());
    }

    #[test]
    fn sticker_swap_across_pieces_is_unsolvable() {
        let mut cube = Cube::new();
        let mut state = *cube.state();
        state.swap(fi(Face::U, 8), fi(Face::F, 0));
        cube.set_state(state);
        assert!(!cube.is_solvable());
    }

    #[test]
    fn scramble_applies_the_returned_moves() {
        let mut cube = Cube::new();
        let moves = cube.scramble(20);
        assert_eq!(moves.len(), 20);
        assert!(cube.is_solvable());

        let mut replay = Cube::new();
        replay.apply_all(&moves);
        assert_eq!(replay, cube);
    }

    #[test]
    fn facelet_string_round_trips() {
        let mut cube = Cube::new();
        assert_eq!(
            cube.facelet_string(),
            "UUUUUUUUUDDDDDDDDDLLLLLLLLLRRRRRRRRRFFFFFFFFFBBBBBBBBB"
        );

        cube.apply_all(&parse_moves("R U R' U' F2 D").unwrap());
        let parsed = Cube::try_from(cube.facelet_string().as_str()).unwrap();
        assert_eq!(parsed, cube);

        assert_eq!(
            Cube::try_from("UUU"),
            Err(ParseCubeError::BadLength(3))
        );
        let mut bad = cube.facelet_string();
        bad.replace_range(0..1, "X");
        assert_eq!(
            Cube::try_from(bad.as_str()),
            Err(ParseCubeError::BadFaceLetter('X'))
        );
    }
}
