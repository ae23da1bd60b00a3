//! Two-phase (Kociemba-style) search engine for the 3x3x3 cube.
//!
//! Phase 1 brings an arbitrary solvable state into the subgroup generated by
//! `{U, D, L2, R2, F2, B2}`; phase 2 finishes the solve inside it. Both
//! phases are iterative-deepening DFS over packed coordinates, driven by
//! precomputed transition tables and BFS pruning tables that are built once
//! per process and shared by every solve.

#![warn(clippy::pedantic)]
#![allow(clippy::similar_names)]

pub mod pruning;
pub mod solver;
pub mod tables;

pub use crate::solver::{Solver, SolverProgress};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
