//! Wire shape of an optimization result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Allocation, Ship};
use crate::request::WeatherRecord;

/// Outcome of a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub allocations: Vec<Allocation>,
    pub metrics: Metrics,
    pub unassigned_ships: Vec<UnassignedShip>,
    pub weather_warning: bool,
    /// The weather reading with the thresholds actually applied.
    pub weather_data: WeatherRecord,
    pub search: SearchSummary,
}

/// Aggregate figures for the produced allocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Minutes between arrival and berthing, summed over new allocations.
    pub total_waiting_time: f64,
    /// Newly berthed length over total operational dock length, in `[0, 1]`.
    pub dock_utilization: f64,
    /// Docks whose existing allocations already exceed their length.
    pub conflicts: u32,
}

/// A candidate ship that received no allocation, with the first blocking reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedShip {
    pub ship: Ship,
    pub reason: String,
    pub kind: UnassignedKind,
}

/// Machine-readable category of an unassignment reason, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnassignedKind {
    WeatherTide,
    WeatherWind,
    NoOperationalDock,
    Incompatible,
    InsufficientCapacity,
    NotSelected,
}

impl UnassignedKind {
    /// Returns true for the two environmental-gate kinds.
    pub fn is_weather(&self) -> bool {
        matches!(self, UnassignedKind::WeatherTide | UnassignedKind::WeatherWind)
    }
}

/// Which solver produced the assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Nothing to optimize: the gate closed or there were no eligible pairs.
    Skipped,
    ExhaustiveSearch,
    BoundedHeuristic,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Skipped => write!(f, "Skipped"),
            SearchStrategy::ExhaustiveSearch => write!(f, "ExhaustiveSearch"),
            SearchStrategy::BoundedHeuristic => write!(f, "BoundedHeuristic"),
        }
    }
}

/// How the assignment was found.
///
/// `exhaustive` is true only when the search proved optimality. A budget
/// stop or a heuristic run leaves it false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    pub strategy: SearchStrategy,
    pub exhaustive: bool,
    pub objective: f64,
    pub nodes_explored: u64,
}

impl SearchSummary {
    /// Summary for a solve that never reached the solver.
    pub fn skipped() -> Self {
        Self {
            strategy: SearchStrategy::Skipped,
            exhaustive: true,
            objective: 0.0,
            nodes_explored: 0,
        }
    }
}
