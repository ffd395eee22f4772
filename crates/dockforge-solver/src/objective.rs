//! Objective builder: scores eligible (ship, dock) pairs.
//!
//! A larger priority number means a more urgent ship, and every criterion
//! is maximized.

use dockforge_core::{AllocationScore, Dock, DockforgeError, OptimizationCriterion, Ship};

/// Pair scoring function for one criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    criterion: OptimizationCriterion,
    utilization_weight: f64,
}

impl Objective {
    /// `utilization_weight` only affects [`OptimizationCriterion::Balanced`].
    pub fn new(criterion: OptimizationCriterion, utilization_weight: f64) -> Self {
        Self {
            criterion,
            utilization_weight,
        }
    }

    /// Score of assigning `ship` to `dock`.
    ///
    /// # Errors
    ///
    /// Returns [`DockforgeError::Internal`] if the value is not representable.
    pub fn pair_score(&self, ship: &Ship, dock: &Dock) -> Result<AllocationScore, DockforgeError> {
        let ratio = ship.length / dock.length;
        let value = match self.criterion {
            OptimizationCriterion::WaitingTime => ship.priority,
            OptimizationCriterion::DockUtilization => ratio,
            OptimizationCriterion::Balanced => ship.priority - self.utilization_weight * ratio,
        };
        AllocationScore::from_f64(value).ok_or_else(|| {
            DockforgeError::Internal(format!(
                "unrepresentable {} score {value} for ship {} at dock {}",
                self.criterion, ship.id, dock.id
            ))
        })
    }
}
