//! The attempt orchestrator: races independent, seeded search attempts on
//! worker threads against a shared wall-clock deadline. The first success
//! wins; the rest are cancelled cooperatively.

use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{unbounded, RecvTimeoutError};
use tracing::{debug, warn};

use crate::{
    error::Result,
    puzzle::{Puzzle, Solution},
    solver::{
        board::Board,
        engine::{AttemptOutcome, SearchContext, SearchStats},
        stats::{render_attempts_table, AttemptReport},
    },
};

/// Caller-facing configuration: the shared deadline and how many attempts
/// may run, bounded by the concurrency cap and the machine's core count.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub deadline: Duration,
    pub max_attempts: usize,
    pub concurrency: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(60),
            max_attempts: 7,
            concurrency: 4,
        }
    }
}

/// The overall verdict of a race.
///
/// `NoSolution` is only returned when every attempt proved exhaustion; a
/// race cut short by the deadline (or whose attempts all timed out or
/// faulted) reports `TimedOut`, which a caller may retry with a larger
/// budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Solved(Solution),
    NoSolution,
    TimedOut,
}

/// Seeds are derived from the attempt index and the puzzle size, so a rerun
/// of the same attempt on the same puzzle retraces the same search.
fn attempt_seed(attempt: usize, cell_count: usize) -> u64 {
    attempt as u64 * 1000 + cell_count as u64
}

struct AttemptResult {
    attempt: usize,
    seed: u64,
    // None when the worker panicked before producing an outcome.
    outcome: Option<AttemptOutcome>,
    stats: SearchStats,
    elapsed: Duration,
}

impl AttemptResult {
    fn report(&self) -> AttemptReport {
        AttemptReport {
            attempt: self.attempt,
            seed: self.seed,
            outcome: self.outcome.as_ref().map_or("faulted", |o| o.label()),
            elapsed: self.elapsed,
            stats: self.stats,
        }
    }
}

/// Validates the puzzle, then races up to
/// `min(max_attempts, concurrency, available cores)` independent attempts
/// against the deadline.
pub fn solve(puzzle: &Puzzle, options: &SolveOptions) -> Result<Verdict> {
    let board = Arc::new(Board::from_puzzle(puzzle)?);
    let deadline = Instant::now() + options.deadline;

    let workers = options
        .max_attempts
        .min(options.concurrency)
        .min(num_cpus::get())
        .max(1);

    if workers == 1 {
        return Ok(solve_inline(&board, puzzle, deadline));
    }

    let (result_tx, result_rx) = unbounded::<AttemptResult>();
    let cancel = Arc::new(AtomicBool::new(false));
    let mut handles = Vec::with_capacity(workers);

    for attempt in 0..workers {
        let board = Arc::clone(&board);
        let cancel = Arc::clone(&cancel);
        let result_tx = result_tx.clone();
        let dominoes = puzzle.dominoes.clone();
        let seed = attempt_seed(attempt, board.cell_count());

        handles.push(thread::spawn(move || {
            let started = Instant::now();
            let searched = catch_unwind(AssertUnwindSafe(|| {
                SearchContext::new(&board, seed, deadline, cancel).run(&dominoes)
            }));
            let result = match searched {
                Ok((outcome, stats)) => AttemptResult {
                    attempt,
                    seed,
                    outcome: Some(outcome),
                    stats,
                    elapsed: started.elapsed(),
                },
                Err(_) => {
                    warn!(attempt, "search attempt panicked, treating as failed");
                    AttemptResult {
                        attempt,
                        seed,
                        outcome: None,
                        stats: SearchStats::default(),
                        elapsed: started.elapsed(),
                    }
                }
            };
            // The consumer may already be gone if another attempt won.
            let _ = result_tx.send(result);
        }));
    }
    drop(result_tx);

    let mut reports: Vec<AttemptReport> = Vec::with_capacity(workers);
    let mut winner: Option<Solution> = None;
    let mut exhausted = 0usize;

    loop {
        match result_rx.recv_deadline(deadline) {
            Ok(result) => {
                reports.push(result.report());
                match result.outcome {
                    Some(AttemptOutcome::Solved(solution)) => {
                        winner = Some(solution);
                        break;
                    }
                    Some(AttemptOutcome::Exhausted) => exhausted += 1,
                    Some(AttemptOutcome::TimedOut) | None => {}
                }
                if reports.len() == workers {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // Shut the losers down, then drain once more: a success that arrived
    // while we were deciding must not be lost.
    cancel.store(true, Ordering::Relaxed);
    for handle in handles {
        let _ = handle.join();
    }
    while let Ok(result) = result_rx.try_recv() {
        reports.push(result.report());
        match result.outcome {
            Some(AttemptOutcome::Solved(solution)) => {
                if winner.is_none() {
                    winner = Some(solution);
                }
            }
            Some(AttemptOutcome::Exhausted) => exhausted += 1,
            Some(AttemptOutcome::TimedOut) | None => {}
        }
    }

    debug!(workers, "race finished:\n{}", render_attempts_table(&reports));

    Ok(match winner {
        Some(solution) => Verdict::Solved(solution),
        None if exhausted == workers => Verdict::NoSolution,
        None => Verdict::TimedOut,
    })
}

/// Single-attempt fast path: no threads, no channel.
fn solve_inline(board: &Board, puzzle: &Puzzle, deadline: Instant) -> Verdict {
    let seed = attempt_seed(0, board.cell_count());
    let started = Instant::now();
    let cancel = Arc::new(AtomicBool::new(false));
    let (outcome, stats) = SearchContext::new(board, seed, deadline, cancel).run(&puzzle.dominoes);

    let report = AttemptReport {
        attempt: 0,
        seed,
        outcome: outcome.label(),
        elapsed: started.elapsed(),
        stats,
    };
    debug!("single attempt finished:\n{}", render_attempts_table(&[report]));

    match outcome {
        AttemptOutcome::Solved(solution) => Verdict::Solved(solution),
        AttemptOutcome::Exhausted => Verdict::NoSolution,
        AttemptOutcome::TimedOut => Verdict::TimedOut,
    }
}
