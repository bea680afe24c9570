//! The board graph: a flat arena of cell records with index-based adjacency
//! and regions precomputed once at construction.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::{Result, ValidationError},
    puzzle::{Coord, Pips, Puzzle, Solution},
    solver::rules::RegionRule,
};

pub type CellId = usize;
pub type RegionId = usize;

/// One cell record in the arena. Neighbors are stored as indices into the
/// same arena, so the graph carries no ownership cycles. Assigned values
/// live in per-attempt state, never here.
#[derive(Debug, Clone)]
pub struct Cell {
    pub coord: Coord,
    pub region: RegionId,
    pub neighbors: Vec<CellId>,
}

/// A maximal set of cells sharing one rule and mutually connected through
/// matching cells.
#[derive(Debug, Clone)]
pub struct Region {
    pub rule: RegionRule,
    pub cells: Vec<CellId>,
}

/// The immutable puzzle graph shared by every search attempt.
#[derive(Debug, Clone)]
pub struct Board {
    pub cells: Vec<Cell>,
    pub regions: Vec<Region>,
}

impl Board {
    /// Builds the cell arena from a puzzle definition: validates the region
    /// descriptors, wires 4-neighbor adjacency, and flood-fills regions.
    ///
    /// Regions merge cells that share a rule AND are transitively adjacent
    /// through matching cells. Disjoint descriptors with the same rule stay
    /// separate regions; this is deliberately not a board-wide grouping by
    /// kind.
    pub fn from_puzzle(puzzle: &Puzzle) -> Result<Self> {
        let mut coords: Vec<Coord> = Vec::new();
        let mut cell_rules: Vec<RegionRule> = Vec::new();
        let mut index_of: HashMap<Coord, CellId> = HashMap::new();

        for (region_idx, spec) in puzzle.regions.iter().enumerate() {
            let rule = RegionRule::from_kind(region_idx, spec.kind, spec.target)?;
            for &(row, col) in &spec.indices {
                if row < 0 || col < 0 {
                    return Err(ValidationError::OutOfRangeCell {
                        region: region_idx,
                        row,
                        col,
                    }
                    .into());
                }
                if index_of.insert((row, col), coords.len()).is_some() {
                    return Err(ValidationError::DuplicateCell { row, col }.into());
                }
                coords.push((row, col));
                cell_rules.push(rule);
            }
        }

        if coords.len() % 2 != 0 {
            return Err(ValidationError::OddCellCount(coords.len()).into());
        }

        let mut cells: Vec<Cell> = coords
            .iter()
            .map(|&(row, col)| {
                let neighbors = [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
                    .into_iter()
                    .filter_map(|coord| index_of.get(&coord).copied())
                    .collect();
                Cell {
                    coord: (row, col),
                    region: 0,
                    neighbors,
                }
            })
            .collect();

        // Flood fill: a region is a maximal connected component of cells
        // whose descriptors carry the same rule.
        let mut regions: Vec<Region> = Vec::new();
        let mut assigned = vec![false; cells.len()];
        for start in 0..cells.len() {
            if assigned[start] {
                continue;
            }
            let region_id = regions.len();
            let rule = cell_rules[start];
            let mut members = vec![start];
            assigned[start] = true;
            let mut head = 0;
            while head < members.len() {
                let current = members[head];
                head += 1;
                cells[current].region = region_id;
                for &neighbor in &cells[current].neighbors {
                    if !assigned[neighbor] && cell_rules[neighbor] == rule {
                        assigned[neighbor] = true;
                        members.push(neighbor);
                    }
                }
            }
            regions.push(Region {
                rule,
                cells: members,
            });
        }

        debug!(
            cells = cells.len(),
            regions = regions.len(),
            "constructed board graph"
        );

        Ok(Self { cells, regions })
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The region a cell belongs to; a direct index lookup, never a
    /// traversal.
    pub fn region_of(&self, cell: CellId) -> &Region {
        &self.regions[self.cells[cell].region]
    }

    /// Materializes a finished value array into the caller-facing mapping.
    pub fn solution_from_values(&self, values: &[Option<Pips>]) -> Solution {
        self.cells
            .iter()
            .zip(values)
            .filter_map(|(cell, value)| value.map(|v| (cell.coord, v)))
            .collect()
    }

    /// Re-checks a complete assignment against every region rule. Useful
    /// for verifying solutions produced elsewhere.
    pub fn is_valid_solution(&self, solution: &Solution) -> bool {
        if solution.len() != self.cells.len() {
            return false;
        }
        self.regions.iter().all(|region| {
            let values: Option<Vec<Pips>> = region
                .cells
                .iter()
                .map(|&id| solution.get(&self.cells[id].coord).copied())
                .collect();
            match values {
                Some(values) => region.rule.admits(&values, true),
                None => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::ValidationError,
        puzzle::{Domino, RegionKind, RegionSpec},
    };

    fn region(kind: RegionKind, target: Option<i32>, indices: Vec<(i32, i32)>) -> RegionSpec {
        RegionSpec {
            kind,
            target,
            indices,
        }
    }

    fn puzzle(regions: Vec<RegionSpec>, dominoes: Vec<Domino>) -> Puzzle {
        Puzzle { regions, dominoes }
    }

    #[test]
    fn wires_four_neighbor_adjacency() {
        let p = puzzle(
            vec![region(
                RegionKind::Empty,
                None,
                vec![(0, 0), (0, 1), (1, 0), (1, 1)],
            )],
            vec![],
        );
        let board = Board::from_puzzle(&p).unwrap();

        assert_eq!(board.cell_count(), 4);
        for cell in &board.cells {
            // Every corner of a 2x2 grid touches exactly two others.
            assert_eq!(cell.neighbors.len(), 2, "cell {:?}", cell.coord);
        }
        // Diagonals are not adjacent.
        let origin = board.cells.iter().find(|c| c.coord == (0, 0)).unwrap();
        assert!(origin
            .neighbors
            .iter()
            .all(|&n| board.cells[n].coord != (1, 1)));
    }

    #[test]
    fn disjoint_regions_with_equal_rules_stay_separate() {
        let p = puzzle(
            vec![
                region(RegionKind::Sum, Some(5), vec![(0, 0), (0, 1)]),
                region(RegionKind::Empty, None, vec![(0, 2), (0, 3)]),
                region(RegionKind::Sum, Some(5), vec![(0, 4), (0, 5)]),
            ],
            vec![],
        );
        let board = Board::from_puzzle(&p).unwrap();

        assert_eq!(board.regions.len(), 3);
        let left = board.cells.iter().find(|c| c.coord == (0, 0)).unwrap();
        let right = board.cells.iter().find(|c| c.coord == (0, 4)).unwrap();
        assert_ne!(left.region, right.region);
    }

    #[test]
    fn touching_descriptors_with_equal_rules_merge() {
        let p = puzzle(
            vec![
                region(RegionKind::Equals, None, vec![(0, 0), (0, 1)]),
                region(RegionKind::Equals, None, vec![(1, 0), (1, 1)]),
            ],
            vec![],
        );
        let board = Board::from_puzzle(&p).unwrap();

        assert_eq!(board.regions.len(), 1);
        assert_eq!(board.regions[0].cells.len(), 4);
    }

    #[test]
    fn odd_cell_count_fails_validation() {
        let p = puzzle(
            vec![region(RegionKind::Empty, None, vec![(0, 0), (0, 1), (0, 2)])],
            vec![],
        );
        let err = Board::from_puzzle(&p).unwrap_err();
        assert!(matches!(
            err.validation(),
            ValidationError::OddCellCount(3)
        ));
    }

    #[test]
    fn duplicate_cell_fails_validation() {
        let p = puzzle(
            vec![
                region(RegionKind::Empty, None, vec![(0, 0), (0, 1)]),
                region(RegionKind::Equals, None, vec![(0, 1), (0, 2)]),
            ],
            vec![],
        );
        let err = Board::from_puzzle(&p).unwrap_err();
        assert!(matches!(
            err.validation(),
            ValidationError::DuplicateCell { row: 0, col: 1 }
        ));
    }

    #[test]
    fn negative_coordinate_fails_validation() {
        let p = puzzle(
            vec![region(RegionKind::Empty, None, vec![(0, 0), (-1, 0)])],
            vec![],
        );
        let err = Board::from_puzzle(&p).unwrap_err();
        assert!(matches!(
            err.validation(),
            ValidationError::OutOfRangeCell {
                region: 0,
                row: -1,
                col: 0
            }
        ));
    }

    #[test]
    fn target_kind_without_target_fails_validation() {
        let p = puzzle(
            vec![region(RegionKind::Greater, None, vec![(0, 0), (0, 1)])],
            vec![],
        );
        let err = Board::from_puzzle(&p).unwrap_err();
        assert!(matches!(
            err.validation(),
            ValidationError::MissingTarget {
                region: 0,
                kind: RegionKind::Greater
            }
        ));
    }

    #[test]
    fn validates_complete_solutions() {
        let p = puzzle(
            vec![region(RegionKind::Sum, Some(8), vec![(0, 0), (0, 1)])],
            vec![Domino(3, 5)],
        );
        let board = Board::from_puzzle(&p).unwrap();

        let good: Solution = [((0, 0), 3), ((0, 1), 5)].into_iter().collect();
        assert!(board.is_valid_solution(&good));

        let bad: Solution = [((0, 0), 3), ((0, 1), 4)].into_iter().collect();
        assert!(!board.is_valid_solution(&bad));

        let incomplete: Solution = [((0, 0), 3)].into_iter().collect();
        assert!(!board.is_valid_solution(&incomplete));
    }
}
