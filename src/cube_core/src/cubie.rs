use thiserror::Error;

use crate::coords;
use crate::facelet::Cube;

/// Piece-level cube state: `cp[i]`/`ep[i]` name the piece sitting in corner
/// or edge position `i`, `co`/`eo` its twist or flip there.
///
/// A move's effect is itself a `CubieCube` (the state a fresh cube reaches
/// after that one move), and [`CubieCube::compose`] applies such an effect
/// to any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubieCube {
    pub cp: [u8; 8],
    pub co: [u8; 8],
    pub ep: [u8; 12],
    pub eo: [u8; 12],
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("facelet configuration does not correspond to any arrangement of real cubies")]
pub struct InvalidCubeError;

impl CubieCube {
    pub const SOLVED: CubieCube = CubieCube {
        cp: [0, 1, 2, 3, 4, 5, 6, 7],
        co: [0; 8],
        ep: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        eo: [0; 12],
    };

    /// The state after performing `effect`'s piece motion on `self`:
    /// position `i` receives the piece from `effect.cp[i]` with the twists
    /// added mod 3, and likewise for edges with flips added mod 2.
    #[must_use]
    pub fn compose(&self, effect: &CubieCube) -> CubieCube {
        let mut out = CubieCube::SOLVED;
        for i in 0..8 {
            let from = effect.cp[i] as usize;
            out.cp[i] = self.cp[from];
            out.co[i] = (self.co[from] + effect.co[i]) % 3;
        }
        for i in 0..12 {
            let from = effect.ep[i] as usize;
            out.ep[i] = self.ep[from];
            out.eo[i] = self.eo[from] ^ effect.eo[i];
        }
        out
    }

    pub fn co_coord(&self) -> u16 {
        coords::co_coord(&self.co)
    }

    pub fn eo_coord(&self) -> u16 {
        coords::eo_coord(&self.eo)
    }

    pub fn slice_coord(&self) -> u16 {
        coords::slice_coord(&self.ep)
    }

    pub fn cp_coord(&self) -> u16 {
        coords::perm8_coord(&self.cp)
    }

    /// Rank of the non-slice edge permutation. Meaningful once the state is
    /// in the phase-2 subgroup, where positions 0..7 hold edges 0..7.
    pub fn ep_coord(&self) -> u16 {
        let mut p = [0u8; 8];
        p.copy_from_slice(&self.ep[..8]);
        coords::perm8_coord(&p)
    }

    /// Rank of the slice-edge permutation among positions 8..11. Meaningful
    /// once the state is in the phase-2 subgroup.
    pub fn sp_coord(&self) -> u8 {
        let mut p = [0u8; 4];
        for (i, slot) in p.iter_mut().enumerate() {
            *slot = self.ep[8 + i].wrapping_sub(8);
        }
        coords::perm4_coord(&p)
    }
}

impl TryFrom<&Cube> for CubieCube {
    type Error = InvalidCubeError;

    /// Decode the facelet array into pieces. Fails on facelet patterns that
    /// match no real cubie; duplicate pieces and parity violations are left
    /// to [`Cube::is_solvable`].
    fn try_from(cube: &Cube) -> Result<Self, Self::Error> {
        let mut cc = CubieCube::SOLVED;
        for i in 0..8 {
            cc.cp[i] = cube.corner_permutation(i).ok_or(InvalidCubeError)?;
            cc.co[i] = cube.corner_orientation(i);
        }
        for i in 0..12 {
            cc.ep[i] = cube.edge_permutation(i).ok_or(InvalidCubeError)?;
            cc.eo[i] = cube.edge_orientation(i);
        }
        Ok(cc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{parse_moves, ALL_MOVES};

    fn cubie_after(moves: &str) -> CubieCube {
        let mut cube = Cube::new();
        cube.apply_all(&parse_moves(moves).unwrap());
        CubieCube::try_from(&cube).unwrap()
    }

    #[test]
    fn solved_cube_decodes_to_identity() {
        let cc = CubieCube::try_from(&Cube::new()).unwrap();
        assert_eq!(cc, CubieCube::SOLVED);
    }

    #[test]
    fn all_coordinates_are_zero_on_solved() {
        let cc = CubieCube::SOLVED;
        assert_eq!(cc.co_coord(), 0);
        assert_eq!(cc.eo_coord(), 0);
        assert_eq!(cc.slice_coord(), 0);
        assert_eq!(cc.cp_coord(), 0);
        assert_eq!(cc.ep_coord(), 0);
        assert_eq!(cc.sp_coord(), 0);
    }

    #[test]
    fn cubie_invariants_hold_after_moves() {
        let cc = cubie_after("R U R' U' F U F' U' L2 D B");

        let mut seen_corner = [false; 8];
        let mut seen_edge = [false; 12];
        for &c in &cc.cp {
            assert!(!seen_corner[c as usize]);
            seen_corner[c as usize] = true;
        }
        for &e in &cc.ep {
            assert!(!seen_edge[e as usize]);
            seen_edge[e as usize] = true;
        }
        assert_eq!(cc.co.iter().map(|&t| u32::from(t)).sum::<u32>() % 3, 0);
        assert_eq!(cc.eo.iter().map(|&f| u32::from(f)).sum::<u32>() % 2, 0);
    }

    #[test]
    fn compose_matches_the_facelet_engine() {
        // The piece motion of each single move, read off the facelet engine.
        let effects: Vec<CubieCube> = ALL_MOVES
            .iter()
            .map(|&m| {
                let mut cube = Cube::new();
                cube.apply(m);
                CubieCube::try_from(&cube).unwrap()
            })
            .collect();

        let mut cube = Cube::new();
        let mut cc = CubieCube::SOLVED;
        for &m in &parse_moves("F R U R' U' F' L2 D B' U2 R").unwrap() {
            cube.apply(m);
            cc = cc.compose(&effects[m.index()]);
        }
        assert_eq!(cc, CubieCube::try_from(&cube).unwrap());
    }

    #[test]
    fn sticker_patterns_without_a_real_cubie_are_rejected() {
        let mut cube = Cube::new();
        let mut state = *cube.state();
        state.swap(8, 36); // U8 <-> F0, splits two pieces across each other
        cube.set_state(state);
        assert!(CubieCube::try_from(&cube).is_err());
    }
}
