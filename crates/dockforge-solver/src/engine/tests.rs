use chrono::TimeZone;
use dockforge_config::StrategyType;
use dockforge_core::{AllocationId, DockId, ShipId, UnassignedKind};
use dockforge_test::builders::{allocation, dock, request, ship};

use super::*;
use crate::id_gen::SequentialIdGenerator;

fn created() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).single().unwrap()
}

fn solve(engine: &Engine, request: &OptimizationRequest) -> OptimizationResult {
    engine
        .solve(request, &mut SequentialIdGenerator::new(), created())
        .unwrap()
}

#[test]
fn test_allocation_fields() {
    let req = request(vec![ship("s1", 100.0)], vec![dock("d1", 200.0)]);
    let result = solve(&Engine::default(), &req);

    let allocation = &result.allocations[0];
    assert_eq!(allocation.id.as_str(), "alloc_s1_d1_1");
    assert_eq!(allocation.status, AllocationStatus::Scheduled);
    assert_eq!(allocation.created_at, created());
    assert_eq!(Some(allocation.start_time), req.ships[0].arrival_time);
    assert_eq!(Some(allocation.end_time), req.ships[0].departure_time);
}

#[test]
fn test_metrics() {
    let mut req = request(
        vec![ship("s0", 400.0), ship("s1", 100.0), ship("s2", 100.0)],
        vec![dock("d1", 300.0), dock("d2", 500.0)],
    );
    req.existing_allocations.push(allocation("s0", "d2"));
    let result = solve(&Engine::default(), &req);

    assert_eq!(result.allocations.len(), 2);
    assert_eq!(result.metrics.total_waiting_time, 0.0);
    assert!((result.metrics.dock_utilization - 200.0 / 800.0).abs() < 1e-9);
    assert_eq!(result.metrics.conflicts, 0);
}

#[test]
fn test_conflict_counted() {
    let mut req = request(
        vec![ship("s0", 150.0), ship("s1", 100.0), ship("s2", 80.0)],
        vec![dock("d1", 200.0)],
    );
    req.existing_allocations.push(allocation("s0", "d1"));
    req.existing_allocations.push(allocation("s1", "d1"));
    let result = solve(&Engine::default(), &req);

    assert_eq!(result.metrics.conflicts, 1);
    assert!(result.allocations.is_empty());
    assert_eq!(result.unassigned_ships.len(), 1);
    assert_eq!(result.unassigned_ships[0].kind, UnassignedKind::InsufficientCapacity);
}

#[test]
fn test_no_pairs_skips_solver() {
    let req = request(vec![ship("s1", 500.0)], vec![dock("d1", 200.0)]);
    let result = solve(&Engine::default(), &req);
    assert_eq!(result.search.strategy, SearchStrategy::Skipped);
    assert!(result.search.exhaustive);
    assert_eq!(result.unassigned_ships[0].kind, UnassignedKind::Incompatible);
}

#[test]
fn test_strategy_reported() {
    let req = request(vec![ship("s1", 100.0)], vec![dock("d1", 200.0)]);

    let exact = solve(&Engine::default(), &req);
    assert_eq!(exact.search.strategy, SearchStrategy::ExhaustiveSearch);
    assert!(exact.search.exhaustive);

    let heuristic =
        Engine::new(EngineConfig::new().with_strategy(StrategyType::BoundedHeuristic)).unwrap();
    let result = solve(&heuristic, &req);
    assert_eq!(result.search.strategy, SearchStrategy::BoundedHeuristic);
    assert!(!result.search.exhaustive);
    assert_eq!(result.search.objective, exact.search.objective);
}

#[test]
fn test_custom_id_generator() {
    let req = request(vec![ship("s1", 100.0)], vec![dock("d1", 200.0)]);
    let mut ids = |ship: &ShipId, dock: &DockId| AllocationId::new(format!("{ship}@{dock}"));
    let result = Engine::default().solve(&req, &mut ids, created()).unwrap();
    assert_eq!(result.allocations[0].id.as_str(), "s1@d1");
}

#[test]
fn test_input_error_propagates() {
    let mut req = request(vec![ship("s1", 100.0)], vec![dock("d1", 200.0)]);
    req.optimization_criteria = Some("fastest".into());
    let err = Engine::default()
        .solve(&req, &mut SequentialIdGenerator::new(), created())
        .unwrap_err();
    assert!(matches!(err, DockforgeError::Input(_)));
}

#[test]
fn test_engine_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
}

#[test]
fn test_new_rejects_invalid_config() {
    let mut negative_weight = EngineConfig::default();
    negative_weight.objective.balanced_utilization_weight = -0.5;
    assert!(matches!(Engine::new(negative_weight), Err(ConfigError::Invalid(_))));

    let mut nan_fraction = EngineConfig::default();
    nan_fraction.heuristic.ruin_fraction = f64::NAN;
    assert!(matches!(Engine::new(nan_fraction), Err(ConfigError::Invalid(_))));

    let engine = Engine::new(EngineConfig::new().with_random_seed(3)).unwrap();
    assert_eq!(engine.config().heuristic.random_seed, 3);
}
