//! BFS distance tables used as admissible heuristics.
//!
//! Each table pairs two coordinates and records the exact number of moves
//! needed to bring that pair back to `(0, 0)` under the phase's move set.
//! Breadth-first search from the solved pair fills every reachable cell;
//! the search heuristic takes the max of the two tables for its phase.

use cube_core::coords::{CO_COUNT, EO_COUNT, PERM4_COUNT, PERM8_COUNT, SLICE_COUNT};
use log::debug;

use crate::tables::{MoveTables, N_MOVES, N_PHASE2_MOVES};
use crate::working;

const UNVISITED: u8 = 0xFF;

pub struct PruningTables {
    /// `[CO_COUNT * SLICE_COUNT]`: moves to reach `CO = 0, SLICE = 0`.
    pub co_slice: Box<[u8]>,
    /// `[EO_COUNT * SLICE_COUNT]`: moves to reach `EO = 0, SLICE = 0`.
    pub eo_slice: Box<[u8]>,
    /// `[PERM8_COUNT * PERM4_COUNT]`: phase-2 moves to reach `CP = 0, SP = 0`.
    pub cp_sp: Box<[u8]>,
    /// `[PERM8_COUNT * PERM4_COUNT]`: phase-2 moves to reach `EP = 0, SP = 0`.
    pub ep_sp: Box<[u8]>,
}

impl PruningTables {
    pub fn build(tables: &MoveTables) -> Self {
        debug!(working!("Computing phase 1 pruning tables"));
        let co_slice = distances(CO_COUNT, SLICE_COUNT, N_MOVES, |a, b, mi| {
            (
                tables.co(a as u16, mi) as usize,
                tables.slice(b as u16, mi) as usize,
            )
        });
        let eo_slice = distances(EO_COUNT, SLICE_COUNT, N_MOVES, |a, b, mi| {
            (
                tables.eo(a as u16, mi) as usize,
                tables.slice(b as u16, mi) as usize,
            )
        });

        debug!(working!("Computing phase 2 pruning tables"));
        let cp_sp = distances(PERM8_COUNT, PERM4_COUNT, N_PHASE2_MOVES, |a, b, mi| {
            (
                tables.cp(a as u16, mi) as usize,
                tables.sp(b as u8, mi) as usize,
            )
        });
        let ep_sp = distances(PERM8_COUNT, PERM4_COUNT, N_PHASE2_MOVES, |a, b, mi| {
            (
                tables.ep(a as u16, mi) as usize,
                tables.sp(b as u8, mi) as usize,
            )
        });

        PruningTables {
            co_slice,
            eo_slice,
            cp_sp,
            ep_sp,
        }
    }

    #[inline]
    pub fn phase1(&self, co: u16, eo: u16, slice: u16) -> u8 {
        let co_slice = self.co_slice[co as usize * SLICE_COUNT + slice as usize];
        let eo_slice = self.eo_slice[eo as usize * SLICE_COUNT + slice as usize];
        co_slice.max(eo_slice)
    }

    #[inline]
    pub fn phase2(&self, cp: u16, ep: u16, sp: u8) -> u8 {
        let cp_sp = self.cp_sp[cp as usize * PERM4_COUNT + sp as usize];
        let ep_sp = self.ep_sp[ep as usize * PERM4_COUNT + sp as usize];
        cp_sp.max(ep_sp)
    }
}

fn distances<F>(size_a: usize, size_b: usize, n_moves: usize, step: F) -> Box<[u8]>
where
    F: Fn(usize, usize, usize) -> (usize, usize),
{
    let mut dist = vec![UNVISITED; size_a * size_b].into_boxed_slice();
    let mut queue: Vec<u32> = Vec::with_capacity(dist.len());

    dist[0] = 0;
    queue.push(0);

    let mut head = 0;
    while head < queue.len() {
        let index = queue[head] as usize;
        head += 1;
        let (a, b) = (index / size_b, index % size_b);
        let d = dist[index];
        for mi in 0..n_moves {
            let (na, nb) = step(a, b, mi);
            let next = na * size_b + nb;
            if dist[next] == UNVISITED {
                dist[next] = d + 1;
                queue.push(next as u32);
            }
        }
    }

    // Both phase move sets reach every cell of their product spaces.
    debug_assert!(dist.iter().all(|&d| d != UNVISITED));
    dist
}
