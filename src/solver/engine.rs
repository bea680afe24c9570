//! The single-attempt search engine: randomized backtracking over domino
//! placements with MRV cell selection, forward checking, and a periodic
//! timeout/cancellation check.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use im::Vector;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    puzzle::{Domino, Pips, Solution},
    solver::board::{Board, CellId, RegionId},
};

/// The deadline and cancellation flag are consulted once every this many
/// recursive calls, to keep the check off the hot path.
const TIMEOUT_CHECK_INTERVAL: u64 = 200;

/// The verdict of one sealed search attempt.
///
/// `Exhausted` is a proof of unsatisfiability for this puzzle; `TimedOut`
/// means the search was cut short and proves nothing. Callers must not
/// conflate the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Solved(Solution),
    Exhausted,
    TimedOut,
}

impl AttemptOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Solved(_) => "solved",
            AttemptOutcome::Exhausted => "exhausted",
            AttemptOutcome::TimedOut => "timed out",
        }
    }
}

/// Counters accumulated over one attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub placements: u64,
    pub backtracks: u64,
    pub dead_end_prunes: u64,
}

/// One attempt's private search state: a value per cell, a seeded RNG for
/// tie-breaking, and the shared deadline. Nothing here is shared with
/// sibling attempts except the read-only board and the cancellation flag.
pub struct SearchContext<'b> {
    board: &'b Board,
    values: Vec<Option<Pips>>,
    rng: ChaCha8Rng,
    deadline: Instant,
    cancel: Arc<AtomicBool>,
    timed_out: bool,
    stats: SearchStats,
}

impl<'b> SearchContext<'b> {
    pub fn new(board: &'b Board, seed: u64, deadline: Instant, cancel: Arc<AtomicBool>) -> Self {
        Self {
            board,
            values: vec![None; board.cell_count()],
            rng: ChaCha8Rng::seed_from_u64(seed),
            deadline,
            cancel,
            timed_out: false,
            stats: SearchStats::default(),
        }
    }

    /// Runs the attempt to completion. Deterministic for a fixed seed on a
    /// fixed input.
    pub fn run(mut self, dominoes: &[Domino]) -> (AttemptOutcome, SearchStats) {
        // An already-expired deadline must report a timeout even on boards
        // trivial enough to solve before the first periodic check.
        if self.out_of_time() {
            return (AttemptOutcome::TimedOut, self.stats);
        }

        let bag: Vector<Domino> = dominoes.iter().copied().collect();
        let solved = self.backtrack(&bag);

        let outcome = if solved {
            AttemptOutcome::Solved(self.board.solution_from_values(&self.values))
        } else if self.timed_out {
            AttemptOutcome::TimedOut
        } else {
            AttemptOutcome::Exhausted
        };
        debug!(
            outcome = outcome.label(),
            nodes = self.stats.nodes_visited,
            backtracks = self.stats.backtracks,
            "attempt finished"
        );
        (outcome, self.stats)
    }

    fn backtrack(&mut self, bag: &Vector<Domino>) -> bool {
        self.stats.nodes_visited += 1;
        if self.stats.nodes_visited % TIMEOUT_CHECK_INTERVAL == 0 && self.out_of_time() {
            self.timed_out = true;
            return false;
        }

        let Some(cell) = self.most_constrained_cell() else {
            // Every cell is assigned; a solution also needs an empty bag.
            return bag.is_empty();
        };
        self.place_from(cell, bag)
    }

    /// Tries every remaining tile, in a per-attempt random order, across
    /// both orientations and every open neighbor of `cell`.
    fn place_from(&mut self, cell: CellId, bag: &Vector<Domino>) -> bool {
        let mut open_neighbors: Vec<CellId> = self.board.cells[cell]
            .neighbors
            .iter()
            .copied()
            .filter(|&n| self.values[n].is_none())
            .collect();
        if open_neighbors.is_empty() {
            return false;
        }
        // Land the second half on the most constrained neighbor first.
        open_neighbors.sort_by_key(|&n| self.open_neighbor_count(n));

        let mut order: Vec<usize> = (0..bag.len()).collect();
        order.shuffle(&mut self.rng);

        for tile_index in order {
            let tile = bag[tile_index];
            for (near, far) in tile.orientations() {
                for &neighbor in &open_neighbors {
                    if !self.admits_pair(cell, near, neighbor, far) {
                        continue;
                    }

                    self.values[cell] = Some(near);
                    self.values[neighbor] = Some(far);
                    self.stats.placements += 1;

                    if self.has_dead_end() {
                        self.stats.dead_end_prunes += 1;
                    } else {
                        let mut rest = bag.clone();
                        rest.remove(tile_index);
                        if self.backtrack(&rest) {
                            return true;
                        }
                    }

                    self.values[cell] = None;
                    self.values[neighbor] = None;
                    if self.timed_out {
                        return false;
                    }
                    self.stats.backtracks += 1;
                }
            }
        }
        false
    }

    /// MRV selection: the unassigned cell with the fewest open neighbors.
    /// A cell with zero open neighbors is returned immediately: it can never
    /// be filled, so the branch should fail as fast as possible.
    fn most_constrained_cell(&self) -> Option<CellId> {
        let mut best: Option<(usize, CellId)> = None;
        for (id, value) in self.values.iter().enumerate() {
            if value.is_some() {
                continue;
            }
            let open = self.open_neighbor_count(id);
            if open == 0 {
                return Some(id);
            }
            if best.map_or(true, |(fewest, _)| open < fewest) {
                best = Some((open, id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Forward check: did the latest placement strand an unassigned cell
    /// with no open neighbor to pair with?
    fn has_dead_end(&self) -> bool {
        self.values.iter().enumerate().any(|(id, value)| {
            value.is_none() && self.open_neighbor_count(id) == 0
        })
    }

    fn open_neighbor_count(&self, cell: CellId) -> usize {
        self.board.cells[cell]
            .neighbors
            .iter()
            .filter(|&&n| self.values[n].is_none())
            .count()
    }

    /// Admission check for a whole domino. When both halves land in the same
    /// region, that region is evaluated once with both candidate values.
    fn admits_pair(&self, first: CellId, near: Pips, second: CellId, far: Pips) -> bool {
        let first_region = self.board.cells[first].region;
        let second_region = self.board.cells[second].region;
        if first_region == second_region {
            self.region_admits(first_region, &[near, far])
        } else {
            self.region_admits(first_region, &[near]) && self.region_admits(second_region, &[far])
        }
    }

    fn region_admits(&self, region_id: RegionId, candidates: &[Pips]) -> bool {
        let region = &self.board.regions[region_id];
        let mut values = Vec::with_capacity(region.cells.len());
        let mut unassigned = 0usize;
        for &id in &region.cells {
            match self.values[id] {
                Some(v) => values.push(v),
                None => unassigned += 1,
            }
        }
        values.extend_from_slice(candidates);
        let is_full = unassigned == candidates.len();
        region.rule.admits(&values, is_full)
    }

    fn out_of_time(&self) -> bool {
        Instant::now() >= self.deadline || self.cancel.load(Ordering::Relaxed)
    }
}
