//! Dockforge - Ship-to-dock allocation engine
//!
//! Assigns arriving ships to docks under weather, dimension, specialization
//! and length-capacity constraints while maximizing a selectable criterion.
//!
//! # Quick Start
//!
//! ```
//! use dockforge::prelude::*;
//!
//! let request: OptimizationRequest = serde_json::from_str(r#"{
//!     "ships": [{
//!         "id": "s1", "name": "Nordic Star", "type": "container",
//!         "length": 180, "draft": 9, "priority": 2,
//!         "arrivalTime": "2025-03-01T06:00:00Z",
//!         "departureTime": "2025-03-02T06:00:00Z"
//!     }],
//!     "docks": [{
//!         "id": "d1", "name": "Quay 1", "length": 250, "depth": 12,
//!         "operationalStatus": "operational"
//!     }],
//!     "weatherData": { "tide": { "current": 4.0 }, "wind": { "speed": 5.0 } }
//! }"#).unwrap();
//!
//! let result = dockforge::solve(&request).unwrap();
//! assert_eq!(result.allocations[0].dock_id.as_str(), "d1");
//! ```
//!
//! Enable the `console` feature and call [`init_console`] to render engine
//! events on the terminal.

pub use dockforge_config::{
    ConfigError, EngineConfig, HeuristicConfig, ObjectiveConfig, SolverStrategyConfig,
    StrategyType, TerminationConfig, WeatherConfig,
};
pub use dockforge_core::{
    Allocation, AllocationId, AllocationScore, AllocationStatus, Dock, DockId, DockforgeError,
    InputError, Metrics, OperationalStatus, OptimizationCriterion, OptimizationRequest,
    OptimizationResult, SearchStrategy, SearchSummary, Ship, ShipId, UnassignedKind,
    UnassignedShip, VesselType,
};
pub use dockforge_solver::{AllocationIdGenerator, Engine, SequentialIdGenerator};

#[cfg(feature = "console")]
pub use dockforge_console::init as init_console;

use chrono::Utc;

pub mod prelude {
    pub use dockforge_config::{EngineConfig, StrategyType};
    pub use dockforge_core::{
        DockforgeError, OptimizationCriterion, OptimizationRequest, OptimizationResult,
        UnassignedKind,
    };
    pub use dockforge_solver::{AllocationIdGenerator, Engine, SequentialIdGenerator};
}

/// Solves `request` with the default configuration.
///
/// Allocation ids come from a fresh [`SequentialIdGenerator`] and every new
/// allocation is stamped with the current UTC time. Use [`Engine`] directly
/// to control configuration, ids or timestamps.
pub fn solve(request: &OptimizationRequest) -> Result<OptimizationResult, DockforgeError> {
    Engine::default().solve(request, &mut SequentialIdGenerator::new(), Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockforge_test::{check_invariants, dock, request, scenarios, ship};

    #[test]
    fn test_solve_uses_default_engine() {
        let req = scenarios::busy_port();
        let via_facade = solve(&req).unwrap();
        let via_engine = Engine::default()
            .solve(&req, &mut SequentialIdGenerator::new(), Utc::now())
            .unwrap();

        assert_eq!(via_facade.search.objective, via_engine.search.objective);
        let ids = |r: &OptimizationResult| {
            r.allocations
                .iter()
                .map(|a| a.id.as_str().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&via_facade), ids(&via_engine));
        check_invariants(&req, &via_facade).unwrap();
    }

    #[test]
    fn test_solve_stamps_current_time() {
        let before = Utc::now();
        let result = solve(&request(vec![ship("s1", 100.0)], vec![dock("d1", 200.0)])).unwrap();
        let after = Utc::now();

        let created = result.allocations[0].created_at;
        assert!(before <= created && created <= after);
        assert_eq!(result.allocations[0].id.as_str(), "alloc_s1_d1_1");
    }

    #[test]
    fn test_solve_reports_weather() {
        let result = solve(&scenarios::low_tide()).unwrap();
        assert!(result.weather_warning);
        assert!(result.allocations.is_empty());
        assert!(result.unassigned_ships.iter().all(|u| u.kind.is_weather()));
    }
}
