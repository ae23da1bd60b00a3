//! The two-phase iterative-deepening search.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use cube_core::{Cube, CubieCube, Move, ALL_MOVES, PHASE2_MOVES};
use log::{debug, info};

use crate::pruning::PruningTables;
use crate::tables::MoveTables;
use crate::{start, success, working};

/// Phase 1 never needs more than this many moves to reach the subgroup.
const MAX_PHASE1: usize = 12;
/// Upper bound on the total solution length in face turns.
const MAX_TOTAL: usize = 31;

struct Tables {
    moves: MoveTables,
    pruning: PruningTables,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        info!(start!("Building transition and pruning tables"));
        let started = Instant::now();
        let moves = MoveTables::build();
        let pruning = PruningTables::build(&moves);
        info!(
            success!("Tables ready in {:.3}s"),
            started.elapsed().as_secs_f64()
        );
        Tables { moves, pruning }
    })
}

/// Best-effort observability into a running solve. `nodes` counts DFS node
/// expansions; `depth` is `-1` while tables are being built on the first
/// call, then the current phase-1 target depth. Readers need no
/// synchronization beyond the atomic loads.
#[derive(Debug, Default)]
pub struct SolverProgress {
    pub nodes: AtomicU64,
    pub depth: AtomicI32,
}

impl SolverProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct Solver;

impl Solver {
    /// Solve without cancellation or progress reporting.
    pub fn solve(cube: &Cube) -> Vec<Move> {
        Self::solve_with(cube, &AtomicBool::new(false), &SolverProgress::new())
    }

    /// Find a move sequence that solves `cube`, at most [`MAX_TOTAL`] face
    /// turns long.
    ///
    /// The caller's cube is only read; the search works on a snapshot. An
    /// empty result means the cube was already solved, was unsolvable, the
    /// depth budget ran out, or `cancel` was asserted; callers that need to
    /// tell these apart check [`Cube::is_solved`] and [`Cube::is_solvable`]
    /// themselves and know whether they canceled.
    pub fn solve_with(
        cube: &Cube,
        cancel: &AtomicBool,
        progress: &SolverProgress,
    ) -> Vec<Move> {
        if cube.is_solved() || !cube.is_solvable() {
            return Vec::new();
        }
        if cancel.load(Ordering::Relaxed) {
            return Vec::new();
        }

        progress.nodes.store(0, Ordering::Relaxed);
        progress.depth.store(-1, Ordering::Relaxed);

        let tables = tables();

        // is_solvable already vetted every facelet.
        let Ok(start) = CubieCube::try_from(cube) else {
            return Vec::new();
        };

        let mut search = Search {
            tables,
            cancel,
            progress,
            start,
            path1: Vec::with_capacity(MAX_PHASE1),
            path2: Vec::with_capacity(MAX_TOTAL),
        };

        let co = start.co_coord();
        let eo = start.eo_coord();
        let slice = start.slice_coord();

        for depth1 in 0..=MAX_PHASE1 {
            if cancel.load(Ordering::Relaxed) {
                return Vec::new();
            }
            progress.depth.store(depth1 as i32, Ordering::Relaxed);
            debug!(working!("Phase 1 at depth {}"), depth1);

            search.path1.clear();
            search.path2.clear();
            if search.phase1(co, eo, slice, depth1, None) {
                let solution: Vec<Move> =
                    search.path1.iter().chain(&search.path2).copied().collect();
                info!(success!("Solved in {} moves"), solution.len());
                return solution;
            }
        }

        Vec::new()
    }
}

struct Search<'a> {
    tables: &'a Tables,
    cancel: &'a AtomicBool,
    progress: &'a SolverProgress,
    start: CubieCube,
    path1: Vec<Move>,
    path2: Vec<Move>,
}

impl Search<'_> {
    fn phase1(&mut self, co: u16, eo: u16, slice: u16, togo: usize, last: Option<Move>) -> bool {
        if self.cancel.load(Ordering::Relaxed) {
            return false;
        }
        self.progress.nodes.fetch_add(1, Ordering::Relaxed);

        if usize::from(self.tables.pruning.phase1(co, eo, slice)) > togo {
            return false;
        }

        if togo == 0 {
            if co != 0 || eo != 0 || slice != 0 {
                return false;
            }
            return self.enter_phase2();
        }

        let moves = &self.tables.moves;
        for (mi, &m) in ALL_MOVES.iter().enumerate() {
            if !move_allowed(m, last) {
                continue;
            }
            self.path1.push(m);
            if self.phase1(
                moves.co(co, mi),
                moves.eo(eo, mi),
                moves.slice(slice, mi),
                togo - 1,
                Some(m),
            ) {
                return true;
            }
            self.path1.pop();
        }
        false
    }

    /// At a phase-1 leaf, recover the piece state by replaying the path on
    /// the snapshot, then run the phase-2 deepening loop within the budget
    /// left under the total bound.
    fn enter_phase2(&mut self) -> bool {
        let mut cc = self.start;
        for &m in &self.path1 {
            cc = cc.compose(&self.tables.moves.effects[m.index()]);
        }
        let cp = cc.cp_coord();
        let ep = cc.ep_coord();
        let sp = cc.sp_coord();

        let budget = MAX_TOTAL - self.path1.len();
        for depth2 in 0..=budget {
            self.path2.clear();
            if self.phase2(cp, ep, sp, depth2, None) {
                return true;
            }
            if self.cancel.load(Ordering::Relaxed) {
                return false;
            }
        }
        false
    }

    fn phase2(&mut self, cp: u16, ep: u16, sp: u8, togo: usize, last: Option<Move>) -> bool {
        if self.cancel.load(Ordering::Relaxed) {
            return false;
        }
        self.progress.nodes.fetch_add(1, Ordering::Relaxed);

        if usize::from(self.tables.pruning.phase2(cp, ep, sp)) > togo {
            return false;
        }

        if togo == 0 {
            return cp == 0 && ep == 0 && sp == 0;
        }

        let moves = &self.tables.moves;
        for (mi, &m) in PHASE2_MOVES.iter().enumerate() {
            if !move_allowed(m, last) {
                continue;
            }
            self.path2.push(m);
            if self.phase2(
                moves.cp(cp, mi),
                moves.ep(ep, mi),
                moves.sp(sp, mi),
                togo - 1,
                Some(m),
            ) {
                return true;
            }
            self.path2.pop();
        }
        false
    }
}

/// Never turn the same face twice in a row, and order commuting turns of
/// opposite faces so each pair is explored once.
fn move_allowed(m: Move, last: Option<Move>) -> bool {
    let Some(last) = last else {
        return true;
    };
    let face = m.index() / 3;
    let last_face = last.index() / 3;
    if face == last_face {
        return false;
    }
    if face / 2 == last_face / 2 && face < last_face {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_ordering_rule() {
        assert!(move_allowed(Move::U, None));
        assert!(!move_allowed(Move::U, Some(Move::U2)));
        assert!(!move_allowed(Move::Up, Some(Move::U)));
        // U before D is allowed, D before U is not.
        assert!(move_allowed(Move::D, Some(Move::U)));
        assert!(!move_allowed(Move::U, Some(Move::D)));
        assert!(move_allowed(Move::R2, Some(Move::L)));
        assert!(!move_allowed(Move::L, Some(Move::R2)));
        assert!(move_allowed(Move::F, Some(Move::R)));
    }
}
