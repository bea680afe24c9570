use std::time::Duration;

use prettytable::{Cell, Row, Table};

use crate::solver::engine::SearchStats;

/// The summary of one finished (or failed) attempt, as collected by the
/// orchestrator.
#[derive(Debug, Clone)]
pub struct AttemptReport {
    pub attempt: usize,
    pub seed: u64,
    pub outcome: &'static str,
    pub elapsed: Duration,
    pub stats: SearchStats,
}

pub fn render_attempts_table(reports: &[AttemptReport]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Attempt"),
        Cell::new("Seed"),
        Cell::new("Outcome"),
        Cell::new("Nodes"),
        Cell::new("Placements"),
        Cell::new("Backtracks"),
        Cell::new("Dead-end Prunes"),
        Cell::new("Time (ms)"),
    ]));

    let mut sorted: Vec<&AttemptReport> = reports.iter().collect();
    sorted.sort_by_key(|r| r.attempt);

    for report in sorted {
        table.add_row(Row::new(vec![
            Cell::new(&report.attempt.to_string()),
            Cell::new(&report.seed.to_string()),
            Cell::new(report.outcome),
            Cell::new(&report.stats.nodes_visited.to_string()),
            Cell::new(&report.stats.placements.to_string()),
            Cell::new(&report.stats.backtracks.to_string()),
            Cell::new(&report.stats.dead_end_prunes.to_string()),
            Cell::new(&format!("{:.2}", report.elapsed.as_secs_f64() * 1000.0)),
        ]));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_row_per_attempt() {
        let reports = vec![
            AttemptReport {
                attempt: 1,
                seed: 1006,
                outcome: "exhausted",
                elapsed: Duration::from_millis(12),
                stats: SearchStats::default(),
            },
            AttemptReport {
                attempt: 0,
                seed: 6,
                outcome: "solved",
                elapsed: Duration::from_millis(3),
                stats: SearchStats {
                    nodes_visited: 41,
                    placements: 12,
                    backtracks: 8,
                    dead_end_prunes: 2,
                },
            },
        ];
        let rendered = render_attempts_table(&reports);
        assert!(rendered.contains("solved"));
        assert!(rendered.contains("exhausted"));
        assert!(rendered.contains("41"));
    }
}
