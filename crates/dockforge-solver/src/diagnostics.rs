//! Diagnostics reporter: one reason per unassigned ship.
//!
//! Reasons are checked in order: weather, no compatible operational dock,
//! insufficient remaining capacity, not selected.

use dockforge_core::{OptimizationCriterion, Ship, UnassignedKind, UnassignedShip};

use crate::compatibility::Eligibility;
use crate::gate::WeatherViolation;
use crate::registry::Problem;

/// Every ship of the request, blocked by the weather.
pub fn weather_unassigned(problem: &Problem, violation: &WeatherViolation) -> Vec<UnassignedShip> {
    let reason = violation.to_string();
    problem
        .ships
        .iter()
        .map(|ship| UnassignedShip {
            ship: ship.clone(),
            reason: reason.clone(),
            kind: violation.kind(),
        })
        .collect()
}

/// Explains unassigned candidates after a solve.
#[derive(Debug)]
pub struct DiagnosticsReporter<'a> {
    problem: &'a Problem,
    eligibility: &'a Eligibility,
    criterion: OptimizationCriterion,
}

impl<'a> DiagnosticsReporter<'a> {
    pub fn new(problem: &'a Problem, eligibility: &'a Eligibility) -> Self {
        Self {
            problem,
            eligibility,
            criterion: problem.criterion,
        }
    }

    /// Reason for the candidate at position `candidate`.
    ///
    /// `residual` is the remaining length per operational dock after this
    /// solve's allocations; `length` is the ship length in the same units.
    pub fn explain(&self, candidate: usize, length: i64, residual: &[i64]) -> UnassignedShip {
        let ship = &self.problem.ships[self.eligibility.candidates()[candidate]];
        let eligible = self.eligibility.eligible_docks(candidate);

        let (kind, reason) = if !self.eligibility.has_operational_dock() {
            (
                UnassignedKind::NoOperationalDock,
                "No operational docks available".to_string(),
            )
        } else if eligible.is_empty() {
            (UnassignedKind::Incompatible, incompatible_reason(ship))
        } else if eligible.iter().all(|&dock| residual[dock] < length) {
            (
                UnassignedKind::InsufficientCapacity,
                "Not enough space left at compatible docks".to_string(),
            )
        } else {
            (
                UnassignedKind::NotSelected,
                format!(
                    "Not selected by the optimization ({} criterion)",
                    self.criterion
                ),
            )
        };

        UnassignedShip {
            ship: ship.clone(),
            reason,
            kind,
        }
    }
}

fn incompatible_reason(ship: &Ship) -> String {
    format!(
        "No docks available that meet the requirements (length: {}m, draft: {}m, type: {})",
        ship.length, ship.draft, ship.vessel_type
    )
}
