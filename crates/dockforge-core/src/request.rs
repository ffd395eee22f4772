//! Wire shape of an optimization request.
//!
//! Every field is optional here. The registry reports missing required
//! fields as [`InputError`](crate::InputError).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AllocationStatus, WeatherSnapshot};

/// Incoming request: candidate ships, dock inventory, committed allocations,
/// criterion and weather.
///
/// # Examples
///
/// ```
/// use dockforge_core::OptimizationRequest;
///
/// let request: OptimizationRequest = serde_json::from_str(r#"{
///     "ships": [],
///     "docks": [],
///     "optimizationCriteria": "waiting_time",
///     "weatherData": { "tide": { "current": 4.2 }, "wind": { "speed": 3.0 } }
/// }"#).unwrap();
///
/// assert_eq!(request.optimization_criteria.as_deref(), Some("waiting_time"));
/// assert!(request.existing_allocations.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    #[serde(default)]
    pub ships: Vec<ShipRecord>,
    #[serde(default)]
    pub docks: Vec<DockRecord>,
    #[serde(default)]
    pub existing_allocations: Vec<AllocationRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization_criteria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_data: Option<WeatherRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub length: Option<f64>,
    pub draft: Option<f64>,
    #[serde(rename = "type")]
    pub vessel_type: Option<String>,
    pub priority: Option<f64>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub length: Option<f64>,
    pub depth: Option<f64>,
    pub operational_status: Option<String>,
    #[serde(default)]
    pub specializations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub ship_id: Option<String>,
    pub dock_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<AllocationStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub tide: Option<TideRecord>,
    pub wind: Option<WindRecord>,
    #[serde(default)]
    pub settings: Option<WeatherSettings>,
}

impl WeatherRecord {
    /// Creates a reading without threshold overrides.
    pub fn new(tide_current: f64, wind_speed: f64) -> Self {
        Self {
            tide: Some(TideRecord {
                current: Some(tide_current),
            }),
            wind: Some(WindRecord {
                speed: Some(wind_speed),
            }),
            settings: None,
        }
    }

    pub fn with_settings(mut self, min_tide_level: f64, max_wind_speed: f64) -> Self {
        self.settings = Some(WeatherSettings {
            min_tide_level: Some(min_tide_level),
            max_wind_speed: Some(max_wind_speed),
        });
        self
    }
}

/// The reading with the thresholds it was judged against.
impl From<WeatherSnapshot> for WeatherRecord {
    fn from(snapshot: WeatherSnapshot) -> Self {
        WeatherRecord::new(snapshot.tide_current, snapshot.wind_speed)
            .with_settings(snapshot.min_tide_level, snapshot.max_wind_speed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TideRecord {
    pub current: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindRecord {
    pub speed: Option<f64>,
}

/// Per-request threshold overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSettings {
    pub min_tide_level: Option<f64>,
    pub max_wind_speed: Option<f64>,
}
