//! Ship - a vessel requesting a berth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ShipId, VesselType};

/// A validated ship record.
///
/// `priority` follows the crate-wide convention: larger means more urgent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    /// Length overall, in meters.
    pub length: f64,
    /// Draft, in meters.
    pub draft: f64,
    #[serde(rename = "type")]
    pub vessel_type: VesselType,
    pub priority: f64,
    pub arrival_time: DateTime<Utc>,
    pub departure_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_type: Option<String>,
}
