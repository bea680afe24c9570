//! Pipsolve is a parallel backtracking solver for domino-placement
//! constraint puzzles.
//!
//! A puzzle is a grid of cells partitioned into labeled regions, each with a
//! placement rule (all-equal, all-distinct, sum below/above/exactly a
//! target, or unconstrained), plus a bag of two-value dominoes. A solution
//! places every domino on an adjacent cell pair so that every cell receives
//! exactly one value and every region's rule holds.
//!
//! # Core Concepts
//!
//! - **[`puzzle::Puzzle`]**: the input contract — region descriptors and a
//!   domino bag, deserializable from the upstream feed shape.
//! - **[`solver::board::Board`]**: the validated cell arena with adjacency
//!   and regions precomputed once.
//! - **[`solver::engine::SearchContext`]**: one sealed, seeded backtracking
//!   attempt.
//! - **[`solver::race::solve`]**: the orchestrator that races several
//!   attempts against a deadline and returns the first success.
//!
//! # Example: A Two-Cell Puzzle
//!
//! One exact-sum region spanning two adjacent cells, one domino that
//! satisfies it:
//!
//! ```
//! use pipsolve::puzzle::{Domino, Puzzle, RegionKind, RegionSpec};
//! use pipsolve::solver::race::{solve, SolveOptions, Verdict};
//!
//! let puzzle = Puzzle {
//!     regions: vec![RegionSpec {
//!         kind: RegionKind::Sum,
//!         target: Some(8),
//!         indices: vec![(0, 0), (0, 1)],
//!     }],
//!     dominoes: vec![Domino(3, 5)],
//! };
//!
//! let verdict = solve(&puzzle, &SolveOptions::default()).unwrap();
//! match verdict {
//!     Verdict::Solved(assignment) => assert_eq!(assignment.len(), 2),
//!     other => panic!("expected a solution, got {:?}", other),
//! }
//! ```
pub mod error;
pub mod puzzle;
pub mod solver;
