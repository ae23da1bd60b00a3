//! Coordinate transition tables.
//!
//! The piece motion of each move is derived once from the facelet engine,
//! which stays the single authority on what a move does. Each table then
//! maps `(coordinate, move) -> coordinate` by synthesizing a cubie state
//! whose relevant component decodes to the value, applying the move, and
//! re-encoding.

use cube_core::coords::{
    self, CO_COUNT, EO_COUNT, PERM4_COUNT, PERM8_COUNT, SLICE_COUNT,
};
use cube_core::{Cube, CubieCube, ALL_MOVES, PHASE2_MOVES};

pub const N_MOVES: usize = 18;
pub const N_PHASE2_MOVES: usize = 10;

pub struct MoveTables {
    /// Piece motion of each of the 18 moves, indexed by absolute move index.
    pub effects: [CubieCube; N_MOVES],
    /// `[CO_COUNT * N_MOVES]`: corner orientation after any move.
    pub co_move: Box<[u16]>,
    /// `[EO_COUNT * N_MOVES]`: edge orientation after any move.
    pub eo_move: Box<[u16]>,
    /// `[SLICE_COUNT * N_MOVES]`: slice occupancy after any move.
    pub slice_move: Box<[u16]>,
    /// `[PERM8_COUNT * N_PHASE2_MOVES]`: corner permutation after a phase-2 move.
    pub cp_move: Box<[u16]>,
    /// `[PERM8_COUNT * N_PHASE2_MOVES]`: non-slice edge permutation after a phase-2 move.
    pub ep_move: Box<[u16]>,
    /// `[PERM4_COUNT * N_PHASE2_MOVES]`: slice permutation after a phase-2 move.
    pub sp_move: Box<[u8]>,
}

impl MoveTables {
    pub fn build() -> Self {
        let effects = derive_move_effects();

        let mut co_move = vec![0u16; CO_COUNT * N_MOVES].into_boxed_slice();
        for coord in 0..CO_COUNT {
            let mut cc = CubieCube::SOLVED;
            cc.co = coords::co_from_coord(coord as u16);
            for (mi, effect) in effects.iter().enumerate() {
                co_move[coord * N_MOVES + mi] = cc.compose(effect).co_coord();
            }
        }

        let mut eo_move = vec![0u16; EO_COUNT * N_MOVES].into_boxed_slice();
        for coord in 0..EO_COUNT {
            let mut cc = CubieCube::SOLVED;
            cc.eo = coords::eo_from_coord(coord as u16);
            for (mi, effect) in effects.iter().enumerate() {
                eo_move[coord * N_MOVES + mi] = cc.compose(effect).eo_coord();
            }
        }

        let mut slice_move = vec![0u16; SLICE_COUNT * N_MOVES].into_boxed_slice();
        for coord in 0..SLICE_COUNT {
            let mut cc = CubieCube::SOLVED;
            cc.ep = coords::slice_from_coord(coord as u16);
            for (mi, effect) in effects.iter().enumerate() {
                slice_move[coord * N_MOVES + mi] = cc.compose(effect).slice_coord();
            }
        }

        let mut cp_move = vec![0u16; PERM8_COUNT * N_PHASE2_MOVES].into_boxed_slice();
        for coord in 0..PERM8_COUNT {
            let mut cc = CubieCube::SOLVED;
            cc.cp = coords::perm8_from_coord(coord as u16);
            for (mi, &m) in PHASE2_MOVES.iter().enumerate() {
                cp_move[coord * N_PHASE2_MOVES + mi] =
                    cc.compose(&effects[m.index()]).cp_coord();
            }
        }

        // Slice edges stay home under phase-2 moves, so positions 0..7 are a
        // self-contained permutation of edges 0..7.
        let mut ep_move = vec![0u16; PERM8_COUNT * N_PHASE2_MOVES].into_boxed_slice();
        for coord in 0..PERM8_COUNT {
            let mut cc = CubieCube::SOLVED;
            let perm = coords::perm8_from_coord(coord as u16);
            cc.ep[..8].copy_from_slice(&perm);
            for (mi, &m) in PHASE2_MOVES.iter().enumerate() {
                ep_move[coord * N_PHASE2_MOVES + mi] =
                    cc.compose(&effects[m.index()]).ep_coord();
            }
        }

        let mut sp_move = vec![0u8; PERM4_COUNT * N_PHASE2_MOVES].into_boxed_slice();
        for coord in 0..PERM4_COUNT {
            let mut cc = CubieCube::SOLVED;
            let perm = coords::perm4_from_coord(coord as u8);
            for (i, &p) in perm.iter().enumerate() {
                cc.ep[8 + i] = 8 + p;
            }
            for (mi, &m) in PHASE2_MOVES.iter().enumerate() {
                sp_move[coord * N_PHASE2_MOVES + mi] =
                    cc.compose(&effects[m.index()]).sp_coord();
            }
        }

        MoveTables {
            effects,
            co_move,
            eo_move,
            slice_move,
            cp_move,
            ep_move,
            sp_move,
        }
    }

    #[inline]
    pub fn co(&self, coord: u16, mi: usize) -> u16 {
        self.co_move[coord as usize * N_MOVES + mi]
    }

    #[inline]
    pub fn eo(&self, coord: u16, mi: usize) -> u16 {
        self.eo_move[coord as usize * N_MOVES + mi]
    }

    #[inline]
    pub fn slice(&self, coord: u16, mi: usize) -> u16 {
        self.slice_move[coord as usize * N_MOVES + mi]
    }

    #[inline]
    pub fn cp(&self, coord: u16, mi: usize) -> u16 {
        self.cp_move[coord as usize * N_PHASE2_MOVES + mi]
    }

    #[inline]
    pub fn ep(&self, coord: u16, mi: usize) -> u16 {
        self.ep_move[coord as usize * N_PHASE2_MOVES + mi]
    }

    #[inline]
    pub fn sp(&self, coord: u8, mi: usize) -> u8 {
        self.sp_move[coord as usize * N_PHASE2_MOVES + mi]
    }
}

fn derive_move_effects() -> [CubieCube; N_MOVES] {
    ALL_MOVES.map(|m| {
        let mut cube = Cube::new();
        cube.apply(m);
        CubieCube::try_from(&cube).expect("a single legal move yields real cubies")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::Move;

    #[test]
    fn move_effects_match_direct_decoding() {
        let effects = derive_move_effects();
        // U is a 4-cycle of the top-layer pieces with no twist or flip.
        let u = &effects[Move::U.index()];
        assert_eq!(u.cp, [3, 0, 1, 2, 4, 5, 6, 7]);
        assert_eq!(u.co, [0; 8]);
        assert_eq!(u.ep, [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11]);
        assert_eq!(u.eo, [0; 12]);
    }

    #[test]
    fn tables_fix_the_identity_under_no_op_rows() {
        let tables = MoveTables::build();
        // A half turn twice is the identity on every coordinate.
        for (mi, &m) in ALL_MOVES.iter().enumerate() {
            if m.quarter_turns() != 2 {
                continue;
            }
            let once = tables.co(0, mi);
            assert_eq!(tables.co(once, mi), 0);
            let once = tables.eo(0, mi);
            assert_eq!(tables.eo(once, mi), 0);
            let once = tables.slice(0, mi);
            assert_eq!(tables.slice(once, mi), 0);
        }
    }

    #[test]
    fn phase2_moves_preserve_the_subgroup() {
        let tables = MoveTables::build();
        for mi in 0..N_PHASE2_MOVES {
            let m = PHASE2_MOVES[mi];
            // Orientations and slice occupancy stay solved under G1 moves.
            assert_eq!(tables.co(0, m.index()), 0, "{m}");
            assert_eq!(tables.eo(0, m.index()), 0, "{m}");
            assert_eq!(tables.slice(0, m.index()), 0, "{m}");
        }
    }

    #[test]
    fn transition_rows_agree_with_the_facelet_engine() {
        let tables = MoveTables::build();
        let mut cube = Cube::new();
        let mut co = 0u16;
        let mut eo = 0u16;
        let mut slice = 0u16;

        for &m in &[Move::R, Move::U, Move::Fp, Move::D2, Move::L, Move::B] {
            cube.apply(m);
            let cc = CubieCube::try_from(&cube).unwrap();
            co = tables.co(co, m.index());
            eo = tables.eo(eo, m.index());
            slice = tables.slice(slice, m.index());
            assert_eq!(co, cc.co_coord());
            assert_eq!(eo, cc.eo_coord());
            assert_eq!(slice, cc.slice_coord());
        }
    }
}
