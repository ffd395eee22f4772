//! Assignment solver abstraction and strategy selection.

use std::fmt::Debug;

use dockforge_config::{EngineConfig, StrategyType};
use dockforge_core::SearchStrategy;

use crate::model::{AssignmentModel, AssignmentSolution};
use crate::stats::SearchStats;

/// Result of one solver run.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub solution: AssignmentSolution,
    /// True only when optimality was proven.
    pub exhaustive: bool,
    pub stats: SearchStats,
}

/// Picks a score-maximizing assignment for a model.
///
/// Implementations must return a solution that passes
/// [`AssignmentModel::verify`] and must be deterministic for a given model.
pub trait AssignmentSolver: Send + Sync + Debug {
    fn solve(&self, model: &AssignmentModel) -> SolveOutcome;

    fn strategy(&self) -> SearchStrategy;
}

/// Resolves the configured strategy for a model with `pair_count` pairs.
pub fn select_strategy(config: &EngineConfig, pair_count: usize) -> SearchStrategy {
    match config.solver.strategy {
        StrategyType::ExhaustiveSearch => SearchStrategy::ExhaustiveSearch,
        StrategyType::BoundedHeuristic => SearchStrategy::BoundedHeuristic,
        StrategyType::Auto if pair_count <= config.solver.exact_pair_limit => {
            SearchStrategy::ExhaustiveSearch
        }
        StrategyType::Auto => SearchStrategy::BoundedHeuristic,
    }
}
