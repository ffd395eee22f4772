//! Record builders.
//!
//! Ships default to a 10 m draft container vessel with priority 1; docks
//! default to a 15 m deep operational berth with no specializations.
//!
//! # Example
//!
//! ```
//! use dockforge_test::builders::{dock, request, ship};
//!
//! let req = request(vec![ship("s1", 120.0)], vec![dock("d1", 200.0)]);
//! assert_eq!(req.ships[0].length, Some(120.0));
//! assert!(req.weather_data.is_some());
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use dockforge_core::{AllocationRecord, DockRecord, OptimizationRequest, ShipRecord, WeatherRecord};

/// Arrival time shared by all built ships.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn ship(id: &str, length: f64) -> ShipRecord {
    ShipRecord {
        id: Some(id.to_string()),
        name: Some(format!("Vessel {id}")),
        length: Some(length),
        draft: Some(10.0),
        vessel_type: Some("container".to_string()),
        priority: Some(1.0),
        arrival_time: Some(base_time()),
        departure_time: Some(base_time() + Duration::hours(36)),
        cargo_type: None,
    }
}

/// A ship with the given type and priority.
pub fn typed_ship(id: &str, length: f64, vessel_type: &str, priority: f64) -> ShipRecord {
    ShipRecord {
        vessel_type: Some(vessel_type.to_string()),
        priority: Some(priority),
        ..ship(id, length)
    }
}

pub fn dock(id: &str, length: f64) -> DockRecord {
    DockRecord {
        id: Some(id.to_string()),
        name: Some(format!("Berth {id}")),
        length: Some(length),
        depth: Some(15.0),
        operational_status: Some("operational".to_string()),
        specializations: None,
    }
}

/// A dock restricted to `types`.
pub fn specialized_dock(id: &str, length: f64, types: &[&str]) -> DockRecord {
    DockRecord {
        specializations: Some(types.iter().map(|t| t.to_string()).collect()),
        ..dock(id, length)
    }
}

pub fn allocation(ship_id: &str, dock_id: &str) -> AllocationRecord {
    AllocationRecord {
        ship_id: Some(ship_id.to_string()),
        dock_id: Some(dock_id.to_string()),
        ..Default::default()
    }
}

/// A request with calm weather (tide 4.0, wind 5.0) and no criterion.
pub fn request(ships: Vec<ShipRecord>, docks: Vec<DockRecord>) -> OptimizationRequest {
    OptimizationRequest {
        ships,
        docks,
        existing_allocations: Vec::new(),
        optimization_criteria: None,
        weather_data: Some(WeatherRecord::new(4.0, 5.0)),
    }
}
