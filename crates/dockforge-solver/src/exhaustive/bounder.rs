//! Score bounders for branch-and-bound pruning.

use std::fmt::Debug;

use dockforge_core::AllocationScore;

use crate::model::AssignmentModel;

/// Estimates the best gain still achievable from a partial assignment.
///
/// The bound must never underestimate: any completion of ships
/// `next_ship..` under `residual` capacities must score at most the
/// returned gain.
pub trait ScoreBounder: Send + Sync + Debug {
    /// Returns `None` if no bound can be computed, which disables pruning.
    fn optimistic_gain(
        &self,
        model: &AssignmentModel,
        next_ship: usize,
        residual: &[i64],
    ) -> Option<AllocationScore>;
}

/// Sums, over the remaining ships, their best positive score among docks
/// that could still hold them on their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityAwareBounder;

impl ScoreBounder for CapacityAwareBounder {
    fn optimistic_gain(
        &self,
        model: &AssignmentModel,
        next_ship: usize,
        residual: &[i64],
    ) -> Option<AllocationScore> {
        let gain = (next_ship..model.ship_count())
            .map(|ship| {
                let length = model.length(ship);
                model
                    .options(ship)
                    .iter()
                    .filter(|option| length <= residual[option.dock])
                    .map(|option| option.score)
                    .max()
                    .unwrap_or_default()
                    .max(AllocationScore::ZERO)
            })
            .sum();
        Some(gain)
    }
}

/// Never bounds; the search enumerates every feasible leaf.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBounder;

impl ScoreBounder for NoBounder {
    fn optimistic_gain(&self, _: &AssignmentModel, _: usize, _: &[i64]) -> Option<AllocationScore> {
        None
    }
}
