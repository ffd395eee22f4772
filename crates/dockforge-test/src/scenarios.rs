//! Canonical requests.

use dockforge_core::{OptimizationRequest, WeatherRecord};

use crate::builders::{allocation, dock, request, ship};

/// Dock `d1` of 200 m already holds a 50 m ship; two 100 m candidates
/// compete for the remaining 150 m.
pub fn shared_berth() -> OptimizationRequest {
    let mut req = request(
        vec![ship("s0", 50.0), ship("s1", 100.0), ship("s2", 100.0)],
        vec![dock("d1", 200.0)],
    );
    req.existing_allocations.push(allocation("s0", "d1"));
    req.optimization_criteria = Some("balanced".to_string());
    req
}

/// Five ships and three docks under a 2.0 m tide.
pub fn low_tide() -> OptimizationRequest {
    let mut req = request(
        (1..=5).map(|i| ship(&format!("s{i}"), 80.0 + 10.0 * i as f64)).collect(),
        (1..=3).map(|i| dock(&format!("d{i}"), 300.0)).collect(),
    );
    req.weather_data = Some(WeatherRecord::new(2.0, 5.0));
    req
}

/// A mixed port: several types, specializations, an inactive dock and an
/// existing allocation.
pub fn busy_port() -> OptimizationRequest {
    use crate::builders::{specialized_dock, typed_ship};

    let mut closed = dock("d5", 400.0);
    closed.operational_status = Some("maintenance".to_string());
    let mut shallow = dock("d4", 220.0);
    shallow.depth = Some(8.0);

    let mut req = request(
        vec![
            typed_ship("s01", 290.0, "container", 3.0),
            typed_ship("s02", 180.0, "tanker", 5.0),
            typed_ship("s03", 120.0, "bulk", 1.0),
            typed_ship("s04", 150.0, "container", 2.0),
            typed_ship("s05", 95.0, "ro-ro", 4.0),
            typed_ship("s06", 210.0, "tanker", 2.5),
            typed_ship("s07", 60.0, "container", 1.5),
            typed_ship("s08", 240.0, "bulk", 3.5),
        ],
        vec![
            specialized_dock("d1", 350.0, &["container"]),
            specialized_dock("d2", 300.0, &["tanker", "bulk"]),
            dock("d3", 260.0),
            shallow,
            closed,
        ],
    );
    req.existing_allocations.push(allocation("s03", "d2"));
    req
}
