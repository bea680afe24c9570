//! Pure admission rules for regions: given the values a region would hold
//! after a tentative placement, decide whether the placement is still
//! consistent.

use crate::{
    error::ValidationError,
    puzzle::{Pips, RegionKind},
};

/// The rule a region enforces over its cells, with any target baked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRule {
    /// Unconstrained: every placement is admissible.
    Open,
    /// Every value in the region must be identical.
    AllEqual,
    /// No two values in the region may be equal.
    AllDistinct,
    /// The running sum must stay strictly below the target at all times.
    SumBelow(i32),
    /// The final sum must strictly exceed the target. A partially filled
    /// region is never rejected: later values can only raise the sum, so
    /// nothing can be disproved early.
    SumAbove(i32),
    /// The final sum must equal the target exactly; any partial sum over
    /// the target is rejected immediately.
    SumExact(i32),
}

impl RegionRule {
    /// Builds the rule for one region descriptor. Kinds that need a target
    /// fail validation without one.
    pub fn from_kind(
        region: usize,
        kind: RegionKind,
        target: Option<i32>,
    ) -> Result<Self, ValidationError> {
        let need = |target: Option<i32>| target.ok_or(ValidationError::MissingTarget { region, kind });
        Ok(match kind {
            RegionKind::Empty => RegionRule::Open,
            RegionKind::Equals => RegionRule::AllEqual,
            RegionKind::Unequal => RegionRule::AllDistinct,
            RegionKind::Less => RegionRule::SumBelow(need(target)?),
            RegionKind::Greater => RegionRule::SumAbove(need(target)?),
            RegionKind::Sum => RegionRule::SumExact(need(target)?),
        })
    }

    /// Decides whether a region holding `values` is (still) consistent.
    ///
    /// `values` must already include the candidate value(s) of the placement
    /// under consideration; when both halves of one domino land in the same
    /// region they are evaluated here jointly, never one against a stale
    /// partial state. `is_full` is true when the placement completes the
    /// region.
    pub fn admits(&self, values: &[Pips], is_full: bool) -> bool {
        match *self {
            RegionRule::Open => true,
            RegionRule::AllEqual => values.windows(2).all(|w| w[0] == w[1]),
            RegionRule::AllDistinct => {
                values
                    .iter()
                    .enumerate()
                    .all(|(i, v)| values[i + 1..].iter().all(|w| w != v))
            }
            RegionRule::SumBelow(target) => sum(values) < target,
            RegionRule::SumAbove(target) => !is_full || sum(values) > target,
            RegionRule::SumExact(target) => {
                let s = sum(values);
                s <= target && (!is_full || s == target)
            }
        }
    }
}

fn sum(values: &[Pips]) -> i32 {
    values.iter().map(|&v| i32::from(v)).sum()
}
