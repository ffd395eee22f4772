//! Engine: runs the allocation pipeline for one request.
//!
//! registry → gate → compatibility + capacity → objective + solver →
//! diagnostics → result.

use std::time::Instant;

use chrono::{DateTime, Utc};
use dockforge_config::{ConfigError, EngineConfig};
use dockforge_core::{
    Allocation, AllocationStatus, DockforgeError, Metrics, OptimizationRequest,
    OptimizationResult, SearchStrategy, SearchSummary,
};
use tracing::info;

use crate::capacity::{length_units, CapacityLedger};
use crate::compatibility::Eligibility;
use crate::diagnostics::{weather_unassigned, DiagnosticsReporter};
use crate::exhaustive::ExhaustiveSolver;
use crate::gate::{EnvironmentalGate, GateDecision};
use crate::heuristic::HeuristicSolver;
use crate::id_gen::AllocationIdGenerator;
use crate::model::{AssignmentModel, Options, PairOption};
use crate::objective::Objective;
use crate::registry::{Problem, Registry};
use crate::strategy::{select_strategy, AssignmentSolver, SolveOutcome};

/// The allocation engine.
///
/// Stateless between calls; one engine may serve many threads.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use dockforge_config::{ConfigError, EngineConfig};
/// use dockforge_core::OptimizationRequest;
/// use dockforge_solver::{Engine, SequentialIdGenerator};
///
/// let request: OptimizationRequest = serde_json::from_str(r#"{
///     "ships": [{
///         "id": "s1", "name": "Nordic Star", "type": "container",
///         "length": 180, "draft": 11, "priority": 2,
///         "arrivalTime": "2025-03-01T06:00:00Z",
///         "departureTime": "2025-03-02T06:00:00Z"
///     }],
///     "docks": [{
///         "id": "d1", "name": "Pier 1", "length": 250, "depth": 14,
///         "operationalStatus": "operational"
///     }],
///     "weatherData": { "tide": { "current": 4.0 }, "wind": { "speed": 5.0 } }
/// }"#).unwrap();
///
/// let engine = Engine::new(EngineConfig::default()).unwrap();
/// let result = engine
///     .solve(&request, &mut SequentialIdGenerator::new(), Utc::now())
///     .unwrap();
///
/// assert_eq!(result.allocations.len(), 1);
/// assert_eq!(result.allocations[0].id.as_str(), "alloc_s1_d1_1");
/// assert!(!result.weather_warning);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine after [`EngineConfig::validate`] accepts `config`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes allocations for `request`.
    ///
    /// New allocation ids come from `ids`; every new allocation is stamped
    /// with `created_at`.
    ///
    /// # Errors
    ///
    /// [`DockforgeError::Input`] for a malformed request,
    /// [`DockforgeError::Internal`] for a numeric fault. Unplaceable ships
    /// and exhausted budgets are reported in the result, not as errors.
    pub fn solve<G>(
        &self,
        request: &OptimizationRequest,
        ids: &mut G,
        created_at: DateTime<Utc>,
    ) -> Result<OptimizationResult, DockforgeError>
    where
        G: AllocationIdGenerator + ?Sized,
    {
        let started = Instant::now();
        let problem = Registry::new(&self.config).normalize(request)?;

        info!(
            event = "solve_start",
            ship_count = problem.ships.len(),
            dock_count = problem.docks.len(),
            existing_count = problem.existing.len(),
            criterion = %problem.criterion,
        );

        let result = match EnvironmentalGate.evaluate(&problem.weather) {
            GateDecision::Closed(violation) => OptimizationResult {
                allocations: Vec::new(),
                metrics: Metrics::default(),
                unassigned_ships: weather_unassigned(&problem, &violation),
                weather_warning: true,
                weather_data: problem.weather.into(),
                search: SearchSummary::skipped(),
            },
            GateDecision::Open => self.allocate(&problem, ids, created_at)?,
        };

        info!(
            event = "solve_end",
            assigned = result.allocations.len(),
            unassigned = result.unassigned_ships.len(),
            weather_warning = result.weather_warning,
            strategy = %result.search.strategy,
            exhaustive = result.search.exhaustive,
            objective = result.search.objective,
            nodes = result.search.nodes_explored,
            duration_ms = started.elapsed().as_millis() as u64,
        );
        Ok(result)
    }

    fn allocate<G>(
        &self,
        problem: &Problem,
        ids: &mut G,
        created_at: DateTime<Utc>,
    ) -> Result<OptimizationResult, DockforgeError>
    where
        G: AllocationIdGenerator + ?Sized,
    {
        let eligibility = Eligibility::build(problem);
        let ledger = CapacityLedger::build(problem, eligibility.operational_docks())?;
        let objective = Objective::new(
            problem.criterion,
            self.config.objective.balanced_utilization_weight,
        );
        let model = build_model(problem, &eligibility, &ledger, &objective)?;

        let (strategy, outcome) = self.run_solver(&model);
        model.verify(&outcome.solution)?;

        let mut allocations = Vec::new();
        let mut unassigned_ships = Vec::new();
        let mut assigned_units: i64 = 0;
        let residual = model.residuals(&outcome.solution.assignment);
        let reporter = DiagnosticsReporter::new(problem, &eligibility);

        for (candidate, choice) in outcome.solution.assignment.iter().enumerate() {
            let ship = &problem.ships[eligibility.candidates()[candidate]];
            match choice {
                Some(k) => {
                    let option = model.options(candidate)[*k];
                    let dock = &problem.docks[eligibility.operational_docks()[option.dock]];
                    assigned_units += model.length(candidate);
                    allocations.push(Allocation {
                        id: ids.next_id(&ship.id, &dock.id),
                        ship_id: ship.id.clone(),
                        dock_id: dock.id.clone(),
                        start_time: ship.arrival_time,
                        end_time: ship.departure_time,
                        created_at,
                        status: AllocationStatus::Scheduled,
                    });
                }
                None => {
                    unassigned_ships.push(reporter.explain(
                        candidate,
                        model.length(candidate),
                        &residual,
                    ));
                }
            }
        }

        let total_waiting_time: f64 = allocations
            .iter()
            .filter_map(|a| problem.ship(a.ship_id.as_str()).map(|s| (a, s)))
            .map(|(a, s)| (a.start_time - s.arrival_time).num_seconds() as f64 / 60.0)
            .sum();
        let total_units = ledger.total_length();
        let dock_utilization = if total_units > 0 {
            (assigned_units as f64 / total_units as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Ok(OptimizationResult {
            allocations,
            metrics: Metrics {
                total_waiting_time,
                dock_utilization,
                conflicts: ledger.conflicts(),
            },
            unassigned_ships,
            weather_warning: false,
            weather_data: problem.weather.into(),
            search: SearchSummary {
                strategy,
                exhaustive: outcome.exhaustive,
                objective: outcome.solution.score.to_f64(),
                nodes_explored: outcome.stats.nodes_explored,
            },
        })
    }

    fn run_solver(&self, model: &AssignmentModel) -> (SearchStrategy, SolveOutcome) {
        if model.pair_count() == 0 {
            let outcome = SolveOutcome {
                solution: model.empty_solution(),
                exhaustive: true,
                stats: Default::default(),
            };
            return (SearchStrategy::Skipped, outcome);
        }

        let solver: Box<dyn AssignmentSolver> = match select_strategy(&self.config, model.pair_count()) {
            SearchStrategy::BoundedHeuristic => Box::new(HeuristicSolver::new(&self.config.heuristic)),
            _ => Box::new(ExhaustiveSolver::from_config(&self.config)),
        };
        (solver.strategy(), solver.solve(model))
    }
}

/// Lays the eligible pairs out as an assignment model.
fn build_model(
    problem: &Problem,
    eligibility: &Eligibility,
    ledger: &CapacityLedger,
    objective: &Objective,
) -> Result<AssignmentModel, DockforgeError> {
    let candidates = eligibility.candidates();
    let mut lengths = Vec::with_capacity(candidates.len());
    let mut options = Vec::with_capacity(candidates.len());

    for (candidate, &ship_idx) in candidates.iter().enumerate() {
        let ship = &problem.ships[ship_idx];
        lengths.push(length_units(ship.length));
        let mut ship_options = Options::new();
        for &pos in eligibility.eligible_docks(candidate) {
            let dock = &problem.docks[eligibility.operational_docks()[pos]];
            ship_options.push(PairOption {
                dock: pos,
                score: objective.pair_score(ship, dock)?,
            });
        }
        options.push(ship_options);
    }

    AssignmentModel::new(lengths, ledger.available(), options)
}

#[cfg(test)]
mod tests;
