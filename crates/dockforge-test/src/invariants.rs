//! Result invariant checks.

use std::collections::{HashMap, HashSet};

use dockforge_core::{OperationalStatus, OptimizationRequest, OptimizationResult};

/// Length units per meter; dock capacity is compared in whole micrometres.
pub const MICROMETRES_PER_METER: f64 = 1_000_000.0;

fn micrometres(meters: f64) -> i64 {
    (meters * MICROMETRES_PER_METER).round() as i64
}

/// Checks a result against the request it answers.
///
/// Returns a description of the first violation found.
///
/// - every ship appears in at most one new allocation
/// - every allocation respects length, draft and specialization
/// - every allocation targets an operational dock
/// - new plus existing length at a dock stays within the dock length
/// - no ship of an existing allocation is reassigned
pub fn check_invariants(request: &OptimizationRequest, result: &OptimizationResult) -> Result<(), String> {
    let ships: HashMap<&str, _> = request
        .ships
        .iter()
        .filter_map(|s| s.id.as_deref().map(|id| (id, s)))
        .collect();
    let docks: HashMap<&str, _> = request
        .docks
        .iter()
        .filter_map(|d| d.id.as_deref().map(|id| (id, d)))
        .collect();
    let committed: HashSet<&str> = request
        .existing_allocations
        .iter()
        .filter_map(|a| a.ship_id.as_deref())
        .collect();

    let mut seen = HashSet::new();
    let mut new_length: HashMap<&str, i64> = HashMap::new();

    for allocation in &result.allocations {
        let ship_id = allocation.ship_id.as_str();
        let dock_id = allocation.dock_id.as_str();
        if !seen.insert(ship_id) {
            return Err(format!("ship {ship_id} allocated twice"));
        }
        if committed.contains(ship_id) {
            return Err(format!("ship {ship_id} already had an allocation"));
        }
        let ship = ships.get(ship_id).ok_or(format!("unknown ship {ship_id}"))?;
        let dock = docks.get(dock_id).ok_or(format!("unknown dock {dock_id}"))?;

        let status = dock.operational_status.as_deref().unwrap_or_default();
        if OperationalStatus::from_wire(status) != OperationalStatus::Operational {
            return Err(format!("dock {dock_id} is not operational"));
        }
        let length = ship.length.unwrap_or_default();
        if length > dock.length.unwrap_or_default() {
            return Err(format!("ship {ship_id} too long for {dock_id}"));
        }
        if ship.draft.unwrap_or_default() > dock.depth.unwrap_or_default() {
            return Err(format!("ship {ship_id} too deep for {dock_id}"));
        }
        if let (Some(types), Some(vessel_type)) = (&dock.specializations, &ship.vessel_type) {
            if !types.is_empty() && !types.contains(vessel_type) {
                return Err(format!("dock {dock_id} does not accept {vessel_type}"));
            }
        }
        *new_length.entry(dock_id).or_default() += micrometres(length);
    }

    for (dock_id, added) in new_length {
        let occupied: i64 = request
            .existing_allocations
            .iter()
            .filter(|a| a.dock_id.as_deref() == Some(dock_id))
            .filter_map(|a| a.ship_id.as_deref().and_then(|id| ships.get(id)))
            .filter_map(|s| s.length)
            .map(micrometres)
            .sum();
        let limit = micrometres(docks.get(dock_id).and_then(|d| d.length).unwrap_or_default());
        if added + occupied > limit {
            return Err(format!(
                "dock {dock_id} over capacity: {added} um new + {occupied} um existing > {limit} um"
            ));
        }
    }

    let unassigned: HashSet<&str> = result
        .unassigned_ships
        .iter()
        .map(|u| u.ship.id.as_str())
        .collect();
    if let Some(both) = seen.intersection(&unassigned).next() {
        return Err(format!("ship {both} both allocated and unassigned"));
    }

    let utilization = result.metrics.dock_utilization;
    if !(0.0..=1.0).contains(&utilization) {
        return Err(format!("dock utilization {utilization} outside [0, 1]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{allocation, base_time, dock, request, ship};
    use dockforge_core::{
        Allocation, AllocationId, AllocationStatus, DockId, Metrics, SearchSummary, ShipId,
        WeatherRecord,
    };

    fn allocated(ship_id: &str, dock_id: &str) -> OptimizationResult {
        OptimizationResult {
            allocations: vec![Allocation {
                id: AllocationId::new(format!("alloc_{ship_id}_{dock_id}_1")),
                ship_id: ShipId::new(ship_id),
                dock_id: DockId::new(dock_id),
                start_time: base_time(),
                end_time: base_time(),
                created_at: base_time(),
                status: AllocationStatus::Scheduled,
            }],
            metrics: Metrics::default(),
            unassigned_ships: Vec::new(),
            weather_warning: false,
            weather_data: WeatherRecord::new(4.0, 5.0),
            search: SearchSummary::skipped(),
        }
    }

    #[test]
    fn test_exact_fill_passes() {
        let mut req = request(
            vec![ship("s0", 50.000001), ship("s1", 149.999999)],
            vec![dock("d1", 200.0)],
        );
        req.existing_allocations.push(allocation("s0", "d1"));
        assert!(check_invariants(&req, &allocated("s1", "d1")).is_ok());
    }

    #[test]
    fn test_one_micrometre_over_fails() {
        let mut req = request(
            vec![ship("s0", 50.000001), ship("s1", 150.0)],
            vec![dock("d1", 200.0)],
        );
        req.existing_allocations.push(allocation("s0", "d1"));
        let err = check_invariants(&req, &allocated("s1", "d1")).unwrap_err();
        assert!(err.contains("over capacity"));
    }
}
