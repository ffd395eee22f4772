//! Dock - a capacity-limited berth.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{DockId, VesselType};

/// Whether a dock may receive ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    Operational,
    /// Maintenance, closed, or any other non-operational state.
    Inactive,
}

impl OperationalStatus {
    /// Parses the wire status. `operational` and its legacy alias
    /// `operativo` mean operational (case-insensitive); anything else
    /// means inactive.
    pub fn from_wire(status: &str) -> Self {
        let status = status.trim();
        if status.eq_ignore_ascii_case("operational") || status.eq_ignore_ascii_case("operativo") {
            OperationalStatus::Operational
        } else {
            OperationalStatus::Inactive
        }
    }
}

/// A validated dock record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dock {
    pub id: DockId,
    pub name: String,
    /// Berth length, in meters.
    pub length: f64,
    /// Water depth, in meters.
    pub depth: f64,
    pub operational_status: OperationalStatus,
    /// Vessel types this dock accepts. Empty means unrestricted.
    #[serde(default)]
    pub specializations: BTreeSet<VesselType>,
}

impl Dock {
    #[inline]
    pub fn is_operational(&self) -> bool {
        self.operational_status == OperationalStatus::Operational
    }

    /// Returns true if the dock's specializations admit this vessel type.
    pub fn accepts(&self, vessel_type: &VesselType) -> bool {
        self.specializations.is_empty() || self.specializations.contains(vessel_type)
    }
}
