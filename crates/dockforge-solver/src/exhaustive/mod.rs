//! Exhaustive search using depth-first branch-and-bound.
//!
//! Ships are decided in ascending id order. Each ship branches over its
//! eligible docks in ascending id order, then over "unassigned". Leaves are
//! therefore visited in tie-break order, so the first leaf reaching the
//! optimal score is the preferred one.

mod bounder;

use std::time::Duration;

use dockforge_config::EngineConfig;
use dockforge_core::{AllocationScore, SearchStrategy};
use tracing::{debug, trace};

use crate::heuristic::HeuristicSolver;
use crate::model::{AssignmentModel, AssignmentSolution};
use crate::scope::SearchScope;
use crate::stats::SearchStats;
use crate::strategy::{AssignmentSolver, SolveOutcome};
use crate::termination::{NodeCountTermination, OrTermination, Termination, TimeTermination};

pub use bounder::{CapacityAwareBounder, NoBounder, ScoreBounder};

/// Branch-and-bound solver with a node and time budget.
///
/// The incumbent is warm-started from [`HeuristicSolver`] unless disabled.
/// When the budget runs out, the best incumbent is returned with
/// `exhaustive = false`.
///
/// # Example
///
/// ```
/// use dockforge_config::EngineConfig;
/// use dockforge_solver::exhaustive::ExhaustiveSolver;
///
/// let solver = ExhaustiveSolver::from_config(&EngineConfig::default())
///     .with_node_limit(Some(10_000));
/// ```
#[derive(Debug, Clone)]
pub struct ExhaustiveSolver<B = CapacityAwareBounder> {
    bounder: B,
    node_limit: Option<u64>,
    time_limit: Option<Duration>,
    warm_start: Option<HeuristicSolver>,
}

impl ExhaustiveSolver<CapacityAwareBounder> {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            bounder: CapacityAwareBounder,
            node_limit: config.node_limit(),
            time_limit: config.time_limit(),
            warm_start: Some(HeuristicSolver::new(&config.heuristic)),
        }
    }
}

impl<B: ScoreBounder> ExhaustiveSolver<B> {
    /// Replaces the bounder.
    pub fn with_bounder<B2: ScoreBounder>(self, bounder: B2) -> ExhaustiveSolver<B2> {
        ExhaustiveSolver {
            bounder,
            node_limit: self.node_limit,
            time_limit: self.time_limit,
            warm_start: self.warm_start,
        }
    }

    pub fn with_node_limit(mut self, node_limit: Option<u64>) -> Self {
        self.node_limit = node_limit;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Starts from the empty assignment instead of a heuristic solution.
    pub fn without_warm_start(mut self) -> Self {
        self.warm_start = None;
        self
    }

    /// Runs the depth-first search from `incumbent`. Returns the best
    /// solution and whether the search space was fully explored.
    fn search(
        &self,
        model: &AssignmentModel,
        incumbent: AssignmentSolution,
        stats: &mut SearchStats,
    ) -> (AssignmentSolution, bool) {
        let ship_count = model.ship_count();
        let mut best = incumbent;
        if ship_count == 0 {
            return (best, true);
        }

        let termination = OrTermination::new((
            self.time_limit.map(TimeTermination::new),
            self.node_limit.map(NodeCountTermination::new),
        ));
        let mut scope = SearchScope::new();
        scope.start();

        // Incumbents found by the search precede every later leaf in
        // tie-break order; a warm-start incumbent does not.
        let mut best_from_search = false;
        let mut assignment: Vec<Option<usize>> = vec![None; ship_count];
        let mut residual = model.capacities().to_vec();
        let mut score = AllocationScore::ZERO;
        let mut stack = Vec::with_capacity(ship_count);
        stack.push(Frame::new(0));
        let mut completed = true;

        while let Some(frame) = stack.last_mut() {
            let ship = frame.ship;
            let options = model.options(ship);
            let length = model.length(ship);

            if let Some(k) = assignment[ship].take() {
                residual[options[k].dock] += length;
                score = score - options[k].score;
            }

            let mut branch = None;
            while frame.next_branch <= options.len() {
                let candidate = frame.next_branch;
                frame.next_branch += 1;
                if candidate == options.len() {
                    branch = Some(None);
                    break;
                }
                if length <= residual[options[candidate].dock] {
                    branch = Some(Some(candidate));
                    break;
                }
            }
            let Some(choice) = branch else {
                stack.pop();
                continue;
            };

            if termination.is_terminated(&scope) {
                completed = false;
                break;
            }
            scope.increment_nodes();

            if let Some(k) = choice {
                residual[options[k].dock] -= length;
                score = score + options[k].score;
                assignment[ship] = Some(k);
            }
            trace!(event = "node", ship, choice = ?choice, score = %score);

            if ship + 1 == ship_count {
                let leaf = AssignmentSolution {
                    assignment: assignment.clone(),
                    score,
                };
                let replace = if best_from_search {
                    leaf.score > best.score
                } else {
                    leaf.is_better_than(&best)
                };
                if replace {
                    debug!(
                        event = "new_incumbent",
                        score = %leaf.score,
                        nodes = scope.nodes_explored(),
                    );
                    best = leaf;
                    best_from_search = true;
                    stats.record_improvement();
                }
                continue;
            }

            if let Some(gain) = self.bounder.optimistic_gain(model, ship + 1, &residual) {
                let bound = score + gain;
                if bound < best.score || (bound == best.score && best_from_search) {
                    continue;
                }
            }
            stack.push(Frame::new(ship + 1));
        }

        stats.nodes_explored += scope.nodes_explored();
        (best, completed)
    }
}

impl<B: ScoreBounder> AssignmentSolver for ExhaustiveSolver<B> {
    fn solve(&self, model: &AssignmentModel) -> SolveOutcome {
        let mut stats = SearchStats::default();
        stats.start();

        let incumbent = match &self.warm_start {
            Some(heuristic) => {
                let warm = heuristic.solve(model);
                stats.absorb(&warm.stats);
                warm.solution
            }
            None => model.empty_solution(),
        };
        debug!(event = "warm_start", score = %incumbent.score);

        let (solution, exhaustive) = self.search(model, incumbent, &mut stats);
        debug!(
            event = "exhaustive_end",
            score = %solution.score,
            assigned = solution.assigned_count(),
            exhaustive,
            nodes = stats.nodes_explored,
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        SolveOutcome {
            solution,
            exhaustive,
            stats,
        }
    }

    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::ExhaustiveSearch
    }
}

/// Search cursor for one ship.
#[derive(Debug, Clone, Copy)]
struct Frame {
    ship: usize,
    /// Next branch to try; `options.len()` is the unassigned branch.
    next_branch: usize,
}

impl Frame {
    fn new(ship: usize) -> Self {
        Self { ship, next_branch: 0 }
    }
}
