//! Capacity accountant: remaining dock length after existing allocations.
//!
//! Lengths are tracked in integer micrometres so capacity checks in the
//! solvers are exact. The registry only admits lengths that are a whole
//! number of micrometres, so the conversion loses nothing.

use dockforge_core::DockforgeError;
use tracing::{debug, warn};

use crate::registry::Problem;

/// Length units per meter.
pub const LENGTH_SCALE: f64 = 1_000_000.0;

/// Converts meters to length units.
///
/// Registry validation caps dimensions, so the result always fits.
pub fn length_units(meters: f64) -> i64 {
    (meters * LENGTH_SCALE).round() as i64
}

/// Whether `meters` is a whole number of length units, allowing only for
/// the error of representing a decimal length as `f64`.
pub fn is_whole_units(meters: f64) -> bool {
    let scaled = meters * LENGTH_SCALE;
    (scaled - scaled.round()).abs() <= scaled.abs() * 4.0 * f64::EPSILON
}

/// Converts length units back to meters.
pub fn meters(units: i64) -> f64 {
    units as f64 / LENGTH_SCALE
}

/// Length budget of one operational dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockBudget {
    /// Index into the problem's docks.
    pub dock: usize,
    pub length: i64,
    pub occupied: i64,
}

impl DockBudget {
    /// Remaining length, never negative.
    pub fn available(&self) -> i64 {
        (self.length - self.occupied).max(0)
    }

    /// Existing allocations already exceed the dock length.
    pub fn is_conflict(&self) -> bool {
        self.occupied > self.length
    }
}

/// Budgets for the operational docks, in the same order as the
/// operational dock list.
#[derive(Debug, Clone)]
pub struct CapacityLedger {
    budgets: Vec<DockBudget>,
}

impl CapacityLedger {
    /// Sums the length of every existing allocation per operational dock.
    ///
    /// All existing allocations at a dock count as occupying it at once.
    /// Allocations naming an unknown ship or dock are skipped with a warning.
    pub fn build(problem: &Problem, operational: &[usize]) -> Result<Self, DockforgeError> {
        let mut budgets: Vec<DockBudget> = operational
            .iter()
            .map(|&dock| DockBudget {
                dock,
                length: length_units(problem.docks[dock].length),
                occupied: 0,
            })
            .collect();

        for existing in &problem.existing {
            let Some(dock_idx) = problem.dock_index(existing.dock_id.as_str()) else {
                warn!(
                    event = "unknown_dock",
                    dock_id = %existing.dock_id,
                    ship_id = %existing.ship_id,
                    "existing allocation references an unknown dock"
                );
                continue;
            };
            let Some(ship) = problem.ship(existing.ship_id.as_str()) else {
                warn!(
                    event = "unknown_ship",
                    dock_id = %existing.dock_id,
                    ship_id = %existing.ship_id,
                    "existing allocation references an unknown ship"
                );
                continue;
            };
            let Ok(pos) = operational.binary_search(&dock_idx) else {
                continue;
            };
            let budget = &mut budgets[pos];
            budget.occupied = budget
                .occupied
                .checked_add(length_units(ship.length))
                .ok_or_else(|| {
                    DockforgeError::Internal(format!(
                        "occupied length overflow at dock {}",
                        existing.dock_id
                    ))
                })?;
        }

        for budget in &budgets {
            let dock = &problem.docks[budget.dock];
            debug!(
                event = "dock_capacity",
                dock_id = %dock.id,
                total = dock.length,
                occupied = meters(budget.occupied),
                available = meters(budget.available()),
            );
        }

        Ok(Self { budgets })
    }

    pub fn budget(&self, pos: usize) -> &DockBudget {
        &self.budgets[pos]
    }

    /// Available length per operational dock.
    pub fn available(&self) -> Vec<i64> {
        self.budgets.iter().map(DockBudget::available).collect()
    }

    /// Number of over-occupied docks.
    pub fn conflicts(&self) -> u32 {
        self.budgets.iter().filter(|b| b.is_conflict()).count() as u32
    }

    /// Total length of the operational docks.
    pub fn total_length(&self) -> i64 {
        self.budgets.iter().map(|b| b.length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use dockforge_config::EngineConfig;
    use dockforge_core::AllocationRecord;
    use dockforge_test::builders::{dock, request, ship};

    fn allocation(ship_id: &str, dock_id: &str) -> AllocationRecord {
        AllocationRecord {
            ship_id: Some(ship_id.into()),
            dock_id: Some(dock_id.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_occupied_and_available() {
        let mut req = request(
            vec![ship("s0", 50.0), ship("s1", 100.0)],
            vec![dock("d1", 200.0), dock("d2", 300.0)],
        );
        req.existing_allocations.push(allocation("s0", "d1"));
        let config = EngineConfig::default();
        let problem = Registry::new(&config).normalize(&req).unwrap();
        let ledger = CapacityLedger::build(&problem, &problem.operational_dock_indices()).unwrap();

        assert_eq!(meters(ledger.budget(0).available()), 150.0);
        assert_eq!(meters(ledger.budget(1).available()), 300.0);
        assert_eq!(ledger.conflicts(), 0);
        assert_eq!(meters(ledger.total_length()), 500.0);
    }

    #[test]
    fn test_over_occupied_dock_is_conflict() {
        let mut req = request(
            vec![ship("s0", 150.0), ship("s1", 100.0)],
            vec![dock("d1", 200.0)],
        );
        req.existing_allocations.push(allocation("s0", "d1"));
        req.existing_allocations.push(allocation("s1", "d1"));
        let config = EngineConfig::default();
        let problem = Registry::new(&config).normalize(&req).unwrap();
        let ledger = CapacityLedger::build(&problem, &problem.operational_dock_indices()).unwrap();

        assert_eq!(ledger.budget(0).available(), 0);
        assert_eq!(ledger.conflicts(), 1);
    }

    #[test]
    fn test_unknown_references_contribute_nothing() {
        let mut req = request(vec![ship("s1", 100.0)], vec![dock("d1", 200.0)]);
        req.existing_allocations.push(allocation("ghost", "d1"));
        req.existing_allocations.push(allocation("s1", "nowhere"));
        let config = EngineConfig::default();
        let problem = Registry::new(&config).normalize(&req).unwrap();
        let ledger = CapacityLedger::build(&problem, &problem.operational_dock_indices()).unwrap();

        assert_eq!(meters(ledger.budget(0).available()), 200.0);
    }

    #[test]
    fn test_whole_units() {
        assert!(is_whole_units(0.1));
        assert!(is_whole_units(123.456789));
        assert!(is_whole_units(50.000001));
        assert!(is_whole_units(999_999.999999));
        assert!(!is_whole_units(50.0000004));
        assert!(!is_whole_units(149.9999995));
        assert!(!is_whole_units(0.0000001));
    }

    #[test]
    fn test_length_units_round_trip() {
        assert_eq!(length_units(0.1) + length_units(0.2), length_units(0.3));
        assert_eq!(meters(length_units(123.456789)), 123.456789);
    }
}
