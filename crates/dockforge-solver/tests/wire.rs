//! Request and result wire shapes.

use chrono::{TimeZone, Utc};
use dockforge_core::{DockforgeError, InputError, OptimizationRequest, OptimizationResult};
use dockforge_solver::{Engine, SequentialIdGenerator};
use serde_json::{json, Value};

fn solve_json(body: Value) -> Result<Value, DockforgeError> {
    let request: OptimizationRequest = serde_json::from_value(body).unwrap();
    let created = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).single().unwrap();
    let result = Engine::default().solve(&request, &mut SequentialIdGenerator::new(), created)?;
    Ok(serde_json::to_value(result).unwrap())
}

fn port() -> Value {
    json!({
        "ships": [
            {
                "id": "s1", "name": "Atlantic Explorer", "type": "container",
                "length": 300, "draft": 14.5, "priority": 3,
                "arrivalTime": "2025-03-01T06:00:00Z",
                "departureTime": "2025-03-03T18:00:00Z",
                "cargoType": "Electronics"
            },
            {
                "id": "s2", "name": "Pacific Trader", "type": "tanker",
                "length": 220, "draft": 12, "priority": 2,
                "arrivalTime": "2025-03-01T08:00:00Z",
                "departureTime": "2025-03-02T08:00:00Z"
            }
        ],
        "docks": [
            {
                "id": "d1", "name": "North Terminal", "length": 350, "depth": 15,
                "operationalStatus": "operativo", "specializations": ["container"]
            },
            {
                "id": "d2", "name": "Fuel Pier", "length": 250, "depth": 13,
                "operationalStatus": "operational", "specializations": ["tanker"]
            }
        ],
        "existingAllocations": [],
        "optimizationCriteria": "balanced",
        "weatherData": { "tide": { "current": 4.2 }, "wind": { "speed": 6 } }
    })
}

#[test]
fn result_shape() {
    let out = solve_json(port()).unwrap();

    assert_eq!(out["weatherWarning"], false);
    assert_eq!(out["allocations"].as_array().map(Vec::len), Some(2));
    let first = &out["allocations"][0];
    assert_eq!(first["id"], "alloc_s1_d1_1");
    assert_eq!(first["shipId"], "s1");
    assert_eq!(first["dockId"], "d1");
    assert_eq!(first["status"], "scheduled");
    assert_eq!(first["startTime"], "2025-03-01T06:00:00Z");
    assert_eq!(first["created"], "2025-03-01T00:00:00Z");
    assert_eq!(out["metrics"]["conflicts"], 0);
    assert_eq!(out["metrics"]["totalWaitingTime"], 0.0);
    assert_eq!(out["search"]["strategy"], "exhaustive_search");
    assert_eq!(out["search"]["exhaustive"], true);
    assert!(out["unassignedShips"].as_array().is_some_and(Vec::is_empty));
    assert_eq!(out["weatherData"]["tide"]["current"], 4.2);
    assert_eq!(out["weatherData"]["wind"]["speed"], 6.0);
    assert_eq!(out["weatherData"]["settings"]["minTideLevel"], 3.0);
    assert_eq!(out["weatherData"]["settings"]["maxWindSpeed"], 8.0);
}

#[test]
fn result_round_trips() {
    let out = solve_json(port()).unwrap();
    let parsed: OptimizationResult = serde_json::from_value(out.clone()).unwrap();
    assert_eq!(serde_json::to_value(parsed).unwrap(), out);
}

#[test]
fn unassigned_shape() {
    let mut body = port();
    body["weatherData"]["wind"]["speed"] = json!(12);
    let out = solve_json(body).unwrap();

    assert_eq!(out["weatherWarning"], true);
    let unassigned = &out["unassignedShips"][0];
    assert_eq!(unassigned["ship"]["id"], "s1");
    assert_eq!(unassigned["kind"], "weather_wind");
    assert_eq!(unassigned["ship"]["type"], "container");
    assert_eq!(out["search"]["strategy"], "skipped");
    assert_eq!(out["weatherData"]["wind"]["speed"], 12.0);
}

#[test]
fn weather_echo_reports_applied_thresholds() {
    let mut body = port();
    body["weatherData"]["settings"] = json!({ "minTideLevel": 4.5 });
    let out = solve_json(body).unwrap();

    assert_eq!(out["weatherWarning"], true);
    assert_eq!(out["weatherData"]["settings"]["minTideLevel"], 4.5);
    assert_eq!(out["weatherData"]["settings"]["maxWindSpeed"], 8.0);
}

#[test]
fn missing_weather_is_input_error() {
    let mut body = port();
    body.as_object_mut().unwrap().remove("weatherData");
    let err = solve_json(body).unwrap_err();
    assert!(matches!(
        err,
        DockforgeError::Input(InputError::MissingField { field: "weatherData", .. })
    ));
}

#[test]
fn missing_ship_field_is_input_error() {
    let mut body = port();
    body["ships"][1].as_object_mut().unwrap().remove("draft");
    let err = solve_json(body).unwrap_err();
    assert_eq!(err.to_string(), "Invalid input: ship 's2' is missing required field 'draft'");
}
