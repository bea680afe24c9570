//! The data contract between the solver core and its external collaborators:
//! the puzzle-source feed on the way in, and the solved assignment on the way
//! out.
//!
//! The wire shape mirrors the upstream JSON feed: each difficulty tier
//! carries a list of region descriptors (`type`, optional `target`, cell
//! `indices`) and a list of dominoes as two-element pip arrays. Fetching and
//! file parsing live outside this crate; only the deserialized shape is
//! modelled here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A cell identity: `(row, col)` on the grid.
pub type Coord = (i32, i32);

/// A single pip value on one half of a domino.
pub type Pips = u8;

/// A complete assignment of a pip value to every cell on a board.
pub type Solution = HashMap<Coord, Pips>;

/// The placement rule attached to a region descriptor.
///
/// A missing `type` on the wire means the region is unconstrained, so
/// `Empty` is the serde default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// No rule; any values are acceptable.
    #[default]
    Empty,
    /// All values in the region must be identical.
    Equals,
    /// All values in the region must be pairwise distinct.
    Unequal,
    /// The region's sum must stay strictly below its target.
    Less,
    /// The region's sum must end up strictly above its target.
    Greater,
    /// The region's sum must equal its target exactly.
    Sum,
}

impl RegionKind {
    /// Whether this kind is meaningless without a numeric target.
    pub fn requires_target(self) -> bool {
        matches!(self, RegionKind::Less | RegionKind::Greater | RegionKind::Sum)
    }
}

/// An unordered pair of pip values. The puzzle input is a bag of these;
/// two dominoes with equal pips are distinct usable tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Domino(pub Pips, pub Pips);

impl Domino {
    /// The distinct ways this tile can land on an ordered cell pair: one
    /// orientation for doubles, two otherwise.
    pub fn orientations(self) -> impl Iterator<Item = (Pips, Pips)> {
        let flipped = (self.0 != self.1).then_some((self.1, self.0));
        std::iter::once((self.0, self.1)).chain(flipped)
    }
}

/// One region descriptor as supplied by the puzzle source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSpec {
    #[serde(rename = "type", default)]
    pub kind: RegionKind,
    #[serde(default)]
    pub target: Option<i32>,
    pub indices: Vec<Coord>,
}

/// One solvable puzzle instance: a partitioned board plus a domino bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub regions: Vec<RegionSpec>,
    pub dominoes: Vec<Domino>,
}

impl Puzzle {
    /// Total number of cells across all region descriptors.
    pub fn cell_count(&self) -> usize {
        self.regions.iter().map(|r| r.indices.len()).sum()
    }
}

/// A difficulty tier in a daily puzzle set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A full daily feed entry: one puzzle per difficulty tier. Unknown keys in
/// the feed (dates, ids, official solutions) are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleSet {
    pub easy: Puzzle,
    pub medium: Puzzle,
    pub hard: Puzzle,
}

impl PuzzleSet {
    pub fn tier(&self, difficulty: Difficulty) -> &Puzzle {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserializes_feed_shaped_json() {
        let raw = r#"{
            "regions": [
                { "type": "sum", "target": 12, "indices": [[0, 0], [0, 1], [1, 0]] },
                { "type": "equals", "indices": [[1, 1]] },
                { "indices": [[2, 0], [2, 1]] }
            ],
            "dominoes": [[3, 5], [4, 4], [0, 6]]
        }"#;
        let puzzle: Puzzle = serde_json::from_str(raw).unwrap();

        assert_eq!(puzzle.regions.len(), 3);
        assert_eq!(puzzle.regions[0].kind, RegionKind::Sum);
        assert_eq!(puzzle.regions[0].target, Some(12));
        assert_eq!(puzzle.regions[0].indices, vec![(0, 0), (0, 1), (1, 0)]);
        // A descriptor without a "type" key is unconstrained.
        assert_eq!(puzzle.regions[2].kind, RegionKind::Empty);
        assert_eq!(puzzle.dominoes, vec![Domino(3, 5), Domino(4, 4), Domino(0, 6)]);
        assert_eq!(puzzle.cell_count(), 6);
    }

    #[test]
    fn double_domino_has_one_orientation() {
        let orientations: Vec<_> = Domino(4, 4).orientations().collect();
        assert_eq!(orientations, vec![(4, 4)]);
    }

    #[test]
    fn mixed_domino_has_two_orientations() {
        let orientations: Vec<_> = Domino(2, 5).orientations().collect();
        assert_eq!(orientations, vec![(2, 5), (5, 2)]);
    }

    #[test]
    fn puzzle_set_selects_tier() {
        let tier = |n: u8| Puzzle {
            regions: vec![RegionSpec {
                kind: RegionKind::Empty,
                target: None,
                indices: vec![(0, 0), (0, i32::from(n))],
            }],
            dominoes: vec![Domino(n, n)],
        };
        let set = PuzzleSet {
            easy: tier(1),
            medium: tier(2),
            hard: tier(3),
        };
        assert_eq!(set.tier(Difficulty::Medium).dominoes, vec![Domino(2, 2)]);
    }
}
