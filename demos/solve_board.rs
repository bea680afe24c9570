//! Loads a daily puzzle JSON file, solves one difficulty tier, and prints
//! the verdict.
//!
//! ```text
//! cargo run --example solve_board -- boards/2025-10-02.json --difficulty medium
//! ```

use std::{fs, path::PathBuf, time::Duration};

use clap::Parser;
use pipsolve::{
    puzzle::{Difficulty, PuzzleSet, Solution},
    solver::race::{solve, SolveOptions, Verdict},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a puzzle JSON file with easy/medium/hard tiers.
    board: PathBuf,

    #[arg(long, value_enum, default_value = "easy")]
    difficulty: Difficulty,

    /// Wall-clock budget for the whole race, in seconds.
    #[arg(long, default_value_t = 60)]
    deadline_secs: u64,

    #[arg(long, default_value_t = 7)]
    attempts: usize,

    #[arg(long, default_value_t = 4)]
    concurrency: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let raw = fs::read_to_string(&args.board)?;
    let set: PuzzleSet = serde_json::from_str(&raw)?;
    let puzzle = set.tier(args.difficulty);

    let options = SolveOptions {
        deadline: Duration::from_secs(args.deadline_secs),
        max_attempts: args.attempts,
        concurrency: args.concurrency,
    };

    match solve(puzzle, &options)? {
        Verdict::Solved(assignment) => {
            println!("solved:");
            print_grid(&assignment);
        }
        Verdict::NoSolution => println!("no solution exists"),
        Verdict::TimedOut => {
            println!(
                "timed out after {}s; retry with a larger deadline or more attempts",
                args.deadline_secs
            )
        }
    }
    Ok(())
}

fn print_grid(assignment: &Solution) {
    let max_row = assignment.keys().map(|&(r, _)| r).max().unwrap_or(0);
    let max_col = assignment.keys().map(|&(_, c)| c).max().unwrap_or(0);
    for row in 0..=max_row {
        let line: String = (0..=max_col)
            .map(|col| match assignment.get(&(row, col)) {
                Some(value) => format!(" {value}"),
                None => "  ".to_string(),
            })
            .collect();
        println!("{line}");
    }
}
