//! Bounded heuristic: greedy construction, local-search repair and seeded
//! ruin-and-recreate.
//!
//! Every phase only accepts strict improvements in (score, tie-break)
//! order, so the result is deterministic for a given seed.

mod construction;
mod local_search;
mod ruin;
mod working;

use dockforge_config::HeuristicConfig;
use dockforge_core::SearchStrategy;
use tracing::debug;

use crate::model::AssignmentModel;
use crate::stats::SearchStats;
use crate::strategy::{AssignmentSolver, SolveOutcome};

pub(crate) use construction::construct;
pub use local_search::LocalSearch;
pub use ruin::RuinAndRecreate;
pub(crate) use working::Working;

/// Greedy construction followed by local search and ruin-and-recreate.
///
/// # Example
///
/// ```
/// use dockforge_config::HeuristicConfig;
/// use dockforge_solver::heuristic::HeuristicSolver;
///
/// let solver = HeuristicSolver::new(&HeuristicConfig::default());
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicSolver {
    local_search: LocalSearch,
    ruin: RuinAndRecreate,
}

impl HeuristicSolver {
    pub fn new(config: &HeuristicConfig) -> Self {
        Self {
            local_search: LocalSearch::new(config.local_search_step_limit),
            ruin: RuinAndRecreate::new(config.random_seed, config.ruin_iterations, config.ruin_fraction),
        }
    }
}

impl AssignmentSolver for HeuristicSolver {
    fn solve(&self, model: &AssignmentModel) -> SolveOutcome {
        let mut stats = SearchStats::default();
        stats.start();

        let mut working = construct(model);
        debug!(
            event = "construction_end",
            score = %working.score(),
            assigned = working.assigned_count(),
        );

        self.local_search.improve(model, &mut working, &mut stats);
        let best = self
            .ruin
            .run(model, working.to_solution(), &self.local_search, &mut stats);

        debug!(
            event = "heuristic_end",
            score = %best.score,
            assigned = best.assigned_count(),
            moves_accepted = stats.moves_accepted,
            ruin_rounds = stats.ruin_rounds,
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        SolveOutcome {
            solution: best,
            exhaustive: false,
            stats,
        }
    }

    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::BoundedHeuristic
    }
}

#[cfg(test)]
mod tests;
