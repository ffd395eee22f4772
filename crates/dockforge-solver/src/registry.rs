//! Registry: normalizes and validates incoming records.
//!
//! Converts an [`OptimizationRequest`] of optional wire fields into a
//! [`Problem`] of validated domain types, sorted by id. Nothing downstream
//! re-checks field presence or numeric sanity.

use std::collections::{BTreeSet, HashSet};

use dockforge_config::EngineConfig;
use dockforge_core::domain::{
    AllocationId, Dock, DockId, ExistingAllocation, OperationalStatus, Ship, ShipId, VesselType,
    WeatherSnapshot,
};
use dockforge_core::request::{AllocationRecord, DockRecord, ShipRecord, WeatherRecord};
use dockforge_core::{InputError, OptimizationCriterion, OptimizationRequest, RecordKind};

use crate::capacity::is_whole_units;

/// Largest accepted length, draft or depth, in meters.
pub const MAX_DIMENSION: f64 = 1_000_000.0;

/// A validated request.
///
/// Ships and docks are sorted by ascending id; every index handed out by
/// this type refers to these sorted vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub ships: Vec<Ship>,
    pub docks: Vec<Dock>,
    pub existing: Vec<ExistingAllocation>,
    pub criterion: OptimizationCriterion,
    pub weather: WeatherSnapshot,
}

impl Problem {
    /// Indices of ships not already tied to a dock by an existing allocation.
    pub fn candidate_indices(&self) -> Vec<usize> {
        let committed: HashSet<&str> = self.existing.iter().map(|a| a.ship_id.as_str()).collect();
        self.ships
            .iter()
            .enumerate()
            .filter(|(_, ship)| !committed.contains(ship.id.as_str()))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Indices of operational docks.
    pub fn operational_dock_indices(&self) -> Vec<usize> {
        self.docks
            .iter()
            .enumerate()
            .filter(|(_, dock)| dock.is_operational())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Finds a ship by id.
    pub fn ship(&self, id: &str) -> Option<&Ship> {
        self.ships
            .binary_search_by(|ship| ship.id.as_str().cmp(id))
            .ok()
            .map(|idx| &self.ships[idx])
    }

    /// Finds a dock index by id.
    pub fn dock_index(&self, id: &str) -> Option<usize> {
        self.docks.binary_search_by(|dock| dock.id.as_str().cmp(id)).ok()
    }
}

/// Converts wire requests into [`Problem`]s using configured defaults.
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    config: &'a EngineConfig,
}

impl<'a> Registry<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Validates and normalizes a request.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found, checking ships, then docks,
    /// then allocations, then weather, then the criterion.
    pub fn normalize(&self, request: &OptimizationRequest) -> Result<Problem, InputError> {
        let mut ships = request
            .ships
            .iter()
            .enumerate()
            .map(|(idx, record)| normalize_ship(idx, record))
            .collect::<Result<Vec<_>, _>>()?;
        ensure_unique(RecordKind::Ship, ships.iter().map(|s| s.id.as_str()))?;
        ships.sort_by(|a, b| a.id.cmp(&b.id));

        let mut docks = request
            .docks
            .iter()
            .enumerate()
            .map(|(idx, record)| normalize_dock(idx, record))
            .collect::<Result<Vec<_>, _>>()?;
        ensure_unique(RecordKind::Dock, docks.iter().map(|d| d.id.as_str()))?;
        docks.sort_by(|a, b| a.id.cmp(&b.id));

        let existing = request
            .existing_allocations
            .iter()
            .enumerate()
            .map(|(idx, record)| normalize_allocation(idx, record))
            .collect::<Result<Vec<_>, _>>()?;

        let weather = self.normalize_weather(request.weather_data.as_ref())?;

        let criterion = match request.optimization_criteria.as_deref() {
            Some(name) => name.parse()?,
            None => self.config.objective.default_criterion,
        };

        Ok(Problem {
            ships,
            docks,
            existing,
            criterion,
            weather,
        })
    }

    fn normalize_weather(&self, record: Option<&WeatherRecord>) -> Result<WeatherSnapshot, InputError> {
        let id = "weatherData";
        let record = record.ok_or_else(|| InputError::missing(RecordKind::Request, "request", "weatherData"))?;
        let tide_current = record
            .tide
            .as_ref()
            .and_then(|t| t.current)
            .ok_or_else(|| InputError::missing(RecordKind::Weather, id, "tide.current"))?;
        let wind_speed = record
            .wind
            .as_ref()
            .and_then(|w| w.speed)
            .ok_or_else(|| InputError::missing(RecordKind::Weather, id, "wind.speed"))?;

        let settings = record.settings.as_ref();
        let min_tide_level = settings
            .and_then(|s| s.min_tide_level)
            .unwrap_or(self.config.weather.min_tide_level);
        let max_wind_speed = settings
            .and_then(|s| s.max_wind_speed)
            .unwrap_or(self.config.weather.max_wind_speed);

        finite(RecordKind::Weather, id, "tide.current", tide_current)?;
        finite(RecordKind::Weather, id, "wind.speed", wind_speed)?;
        finite(RecordKind::Weather, id, "settings.minTideLevel", min_tide_level)?;
        finite(RecordKind::Weather, id, "settings.maxWindSpeed", max_wind_speed)?;

        Ok(WeatherSnapshot::new(tide_current, wind_speed).with_thresholds(min_tide_level, max_wind_speed))
    }
}

fn record_label(id: Option<&str>, idx: usize) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => format!("#{idx}"),
    }
}

fn required_id(kind: RecordKind, id: Option<&str>, idx: usize) -> Result<String, InputError> {
    match id {
        None => Err(InputError::missing(kind, format!("#{idx}"), "id")),
        Some(id) if id.trim().is_empty() => {
            Err(InputError::invalid(kind, format!("#{idx}"), "id", "must not be empty"))
        }
        Some(id) => Ok(id.to_string()),
    }
}

fn finite(kind: RecordKind, id: &str, field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::invalid(kind, id, field, "must be a finite number"))
    }
}

fn dimension(kind: RecordKind, id: &str, field: &'static str, value: f64) -> Result<f64, InputError> {
    finite(kind, id, field, value)?;
    if value < 0.0 {
        return Err(InputError::invalid(kind, id, field, "must not be negative"));
    }
    if value > MAX_DIMENSION {
        return Err(InputError::invalid(
            kind,
            id,
            field,
            format!("must not exceed {MAX_DIMENSION}"),
        ));
    }
    Ok(value)
}

/// A ship or dock length; capacity is accounted in whole micrometres.
fn length_field(kind: RecordKind, id: &str, value: f64) -> Result<f64, InputError> {
    dimension(kind, id, "length", value)?;
    if !is_whole_units(value) {
        return Err(InputError::invalid(
            kind,
            id,
            "length",
            "must be a whole number of micrometres",
        ));
    }
    Ok(value)
}

fn ensure_unique<'a>(kind: RecordKind, ids: impl Iterator<Item = &'a str>) -> Result<(), InputError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(InputError::DuplicateId {
                record: kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn normalize_ship(idx: usize, record: &ShipRecord) -> Result<Ship, InputError> {
    let kind = RecordKind::Ship;
    let id = required_id(kind, record.id.as_deref(), idx)?;
    let missing = |field| InputError::missing(kind, id.as_str(), field);

    let name = record.name.clone().ok_or_else(|| missing("name"))?;
    let length = length_field(kind, &id, record.length.ok_or_else(|| missing("length"))?)?;
    let draft = dimension(kind, &id, "draft", record.draft.ok_or_else(|| missing("draft"))?)?;
    let vessel_type = record.vessel_type.clone().ok_or_else(|| missing("type"))?;
    let priority = finite(kind, &id, "priority", record.priority.ok_or_else(|| missing("priority"))?)?;
    let arrival_time = record.arrival_time.ok_or_else(|| missing("arrivalTime"))?;
    let departure_time = record.departure_time.ok_or_else(|| missing("departureTime"))?;

    if departure_time < arrival_time {
        return Err(InputError::invalid(
            kind,
            id,
            "departureTime",
            "must not precede arrivalTime",
        ));
    }

    Ok(Ship {
        id: ShipId::new(id),
        name,
        length,
        draft,
        vessel_type: VesselType::new(vessel_type),
        priority,
        arrival_time,
        departure_time,
        cargo_type: record.cargo_type.clone(),
    })
}

fn normalize_dock(idx: usize, record: &DockRecord) -> Result<Dock, InputError> {
    let kind = RecordKind::Dock;
    let id = required_id(kind, record.id.as_deref(), idx)?;
    let missing = |field| InputError::missing(kind, id.as_str(), field);

    let name = record.name.clone().ok_or_else(|| missing("name"))?;
    let length = length_field(kind, &id, record.length.ok_or_else(|| missing("length"))?)?;
    if length == 0.0 {
        return Err(InputError::invalid(kind, id, "length", "must be positive"));
    }
    let depth = dimension(kind, &id, "depth", record.depth.ok_or_else(|| missing("depth"))?)?;
    let status = record
        .operational_status
        .as_deref()
        .ok_or_else(|| missing("operationalStatus"))?;
    if status.trim().is_empty() {
        return Err(InputError::invalid(kind, id, "operationalStatus", "must not be empty"));
    }

    let specializations: BTreeSet<VesselType> = record
        .specializations
        .iter()
        .flatten()
        .map(|s| VesselType::new(s.as_str()))
        .collect();

    Ok(Dock {
        id: DockId::new(id),
        name,
        length,
        depth,
        operational_status: OperationalStatus::from_wire(status),
        specializations,
    })
}

fn normalize_allocation(idx: usize, record: &AllocationRecord) -> Result<ExistingAllocation, InputError> {
    let kind = RecordKind::Allocation;
    let label = record_label(record.id.as_deref(), idx);
    let ship_id = record
        .ship_id
        .as_deref()
        .ok_or_else(|| InputError::missing(kind, label.as_str(), "shipId"))?;
    let dock_id = record
        .dock_id
        .as_deref()
        .ok_or_else(|| InputError::missing(kind, label.as_str(), "dockId"))?;

    Ok(ExistingAllocation {
        id: record.id.as_deref().map(AllocationId::new),
        ship_id: ShipId::new(ship_id),
        dock_id: DockId::new(dock_id),
        status: record.status.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockforge_core::request::WeatherSettings;
    use dockforge_test::builders::{dock, request, ship};

    fn normalize(request: &OptimizationRequest) -> Result<Problem, InputError> {
        let config = EngineConfig::default();
        Registry::new(&config).normalize(request)
    }

    #[test]
    fn test_sorts_by_id() {
        let req = request(
            vec![ship("s2", 100.0), ship("s1", 120.0)],
            vec![dock("d2", 300.0), dock("d1", 200.0)],
        );
        let problem = normalize(&req).unwrap();
        assert_eq!(problem.ships[0].id.as_str(), "s1");
        assert_eq!(problem.docks[0].id.as_str(), "d1");
        assert_eq!(problem.ship("s2").map(|s| s.length), Some(100.0));
        assert_eq!(problem.dock_index("d2"), Some(1));
    }

    #[test]
    fn test_missing_ship_field() {
        let mut s = ship("s1", 100.0);
        s.draft = None;
        let err = normalize(&request(vec![s], vec![])).unwrap_err();
        assert_eq!(err, InputError::missing(RecordKind::Ship, "s1", "draft"));
    }

    #[test]
    fn test_missing_id_uses_position() {
        let mut s = ship("s1", 100.0);
        s.id = None;
        let err = normalize(&request(vec![ship("s0", 50.0), s], vec![])).unwrap_err();
        assert_eq!(err, InputError::missing(RecordKind::Ship, "#1", "id"));
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        let mut s = ship("s1", -1.0);
        let err = normalize(&request(vec![s.clone()], vec![])).unwrap_err();
        assert!(matches!(err, InputError::InvalidValue { field: "length", .. }));

        s.length = Some(100.0);
        s.priority = Some(f64::NAN);
        let err = normalize(&request(vec![s], vec![])).unwrap_err();
        assert!(matches!(err, InputError::InvalidValue { field: "priority", .. }));
    }

    #[test]
    fn test_rejects_sub_micrometre_lengths() {
        let err = normalize(&request(vec![ship("s1", 50.0000004)], vec![])).unwrap_err();
        assert_eq!(
            err,
            InputError::invalid(
                RecordKind::Ship,
                "s1",
                "length",
                "must be a whole number of micrometres"
            )
        );

        let err = normalize(&request(vec![], vec![dock("d1", 199.9999996)])).unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidValue { record: RecordKind::Dock, field: "length", .. }
        ));

        assert!(normalize(&request(vec![ship("s1", 50.000001)], vec![dock("d1", 0.1)])).is_ok());
    }

    #[test]
    fn test_rejects_zero_length_dock() {
        let err = normalize(&request(vec![], vec![dock("d1", 0.0)])).unwrap_err();
        assert!(matches!(err, InputError::InvalidValue { field: "length", .. }));
    }

    #[test]
    fn test_rejects_departure_before_arrival() {
        let mut s = ship("s1", 100.0);
        std::mem::swap(&mut s.arrival_time, &mut s.departure_time);
        let err = normalize(&request(vec![s], vec![])).unwrap_err();
        assert!(matches!(err, InputError::InvalidValue { field: "departureTime", .. }));
    }

    #[test]
    fn test_duplicate_ids() {
        let err = normalize(&request(vec![ship("s1", 1.0), ship("s1", 2.0)], vec![])).unwrap_err();
        assert_eq!(
            err,
            InputError::DuplicateId {
                record: RecordKind::Ship,
                id: "s1".into()
            }
        );
    }

    #[test]
    fn test_missing_weather() {
        let mut req = request(vec![], vec![]);
        req.weather_data = None;
        let err = normalize(&req).unwrap_err();
        assert_eq!(err, InputError::missing(RecordKind::Request, "request", "weatherData"));

        req.weather_data = Some(WeatherRecord {
            tide: None,
            ..WeatherRecord::new(4.0, 2.0)
        });
        let err = normalize(&req).unwrap_err();
        assert_eq!(err, InputError::missing(RecordKind::Weather, "weatherData", "tide.current"));
    }

    #[test]
    fn test_weather_thresholds_default_and_override() {
        let mut req = request(vec![], vec![]);
        let problem = normalize(&req).unwrap();
        assert_eq!(problem.weather.min_tide_level, 3.0);
        assert_eq!(problem.weather.max_wind_speed, 8.0);

        if let Some(weather) = req.weather_data.as_mut() {
            weather.settings = Some(WeatherSettings {
                min_tide_level: None,
                max_wind_speed: Some(15.0),
            });
        }
        let problem = normalize(&req).unwrap();
        assert_eq!(problem.weather.min_tide_level, 3.0);
        assert_eq!(problem.weather.max_wind_speed, 15.0);
    }

    #[test]
    fn test_criterion_default_and_unknown() {
        let mut req = request(vec![], vec![]);
        assert_eq!(normalize(&req).unwrap().criterion, OptimizationCriterion::Balanced);

        req.optimization_criteria = Some("dock_utilization".into());
        assert_eq!(
            normalize(&req).unwrap().criterion,
            OptimizationCriterion::DockUtilization
        );

        req.optimization_criteria = Some("shortest".into());
        assert_eq!(
            normalize(&req).unwrap_err(),
            InputError::UnknownCriterion("shortest".into())
        );
    }

    #[test]
    fn test_candidates_exclude_committed_ships() {
        let mut req = request(
            vec![ship("s1", 100.0), ship("s2", 100.0), ship("s3", 100.0)],
            vec![dock("d1", 400.0)],
        );
        req.existing_allocations.push(AllocationRecord {
            ship_id: Some("s2".into()),
            dock_id: Some("d1".into()),
            ..Default::default()
        });
        let problem = normalize(&req).unwrap();
        assert_eq!(problem.candidate_indices(), vec![0, 2]);
    }

    #[test]
    fn test_allocation_requires_ship_and_dock() {
        let mut req = request(vec![], vec![]);
        req.existing_allocations.push(AllocationRecord {
            id: Some("a7".into()),
            ship_id: Some("s1".into()),
            ..Default::default()
        });
        assert_eq!(
            normalize(&req).unwrap_err(),
            InputError::missing(RecordKind::Allocation, "a7", "dockId")
        );
    }

    #[test]
    fn test_inactive_dock_status() {
        let mut d = dock("d1", 200.0);
        d.operational_status = Some("maintenance".into());
        let problem = normalize(&request(vec![], vec![d, dock("d2", 100.0)])).unwrap();
        assert_eq!(problem.operational_dock_indices(), vec![1]);
    }
}
