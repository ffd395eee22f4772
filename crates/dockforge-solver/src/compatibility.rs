//! Compatibility filter: prunes infeasible (ship, dock) pairs.
//!
//! Only eligible pairs ever reach the assignment model. Positions returned
//! here index the candidate list and the operational dock list, both in
//! ascending id order.

use dockforge_core::{Dock, Ship};

use crate::registry::Problem;

/// Returns true if `ship` physically and operationally fits `dock`.
///
/// Does not look at operational status or remaining capacity.
pub fn is_compatible(ship: &Ship, dock: &Dock) -> bool {
    ship.length <= dock.length && ship.draft <= dock.depth && dock.accepts(&ship.vessel_type)
}

/// Eligible pairs between candidate ships and operational docks.
#[derive(Debug, Clone)]
pub struct Eligibility {
    candidates: Vec<usize>,
    operational: Vec<usize>,
    eligible: Vec<Vec<usize>>,
}

impl Eligibility {
    pub fn build(problem: &Problem) -> Self {
        let candidates = problem.candidate_indices();
        let operational = problem.operational_dock_indices();
        let eligible = candidates
            .iter()
            .map(|&ship_idx| {
                let ship = &problem.ships[ship_idx];
                operational
                    .iter()
                    .enumerate()
                    .filter(|(_, &dock_idx)| is_compatible(ship, &problem.docks[dock_idx]))
                    .map(|(pos, _)| pos)
                    .collect()
            })
            .collect();

        Self {
            candidates,
            operational,
            eligible,
        }
    }

    /// Ship indices of the candidates, ascending.
    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    /// Dock indices of the operational docks, ascending.
    pub fn operational_docks(&self) -> &[usize] {
        &self.operational
    }

    /// Operational dock positions eligible for the candidate at `candidate`.
    pub fn eligible_docks(&self, candidate: usize) -> &[usize] {
        &self.eligible[candidate]
    }

    pub fn has_operational_dock(&self) -> bool {
        !self.operational.is_empty()
    }

    /// Total number of eligible pairs.
    pub fn pair_count(&self) -> usize {
        self.eligible.iter().map(Vec::len).sum()
    }
}
