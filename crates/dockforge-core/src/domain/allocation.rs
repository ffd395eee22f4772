//! Allocations - committed ship-to-dock assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AllocationId, DockId, ShipId};

/// Lifecycle state of an allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

/// A newly produced allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: AllocationId,
    pub ship_id: ShipId,
    pub dock_id: DockId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    pub status: AllocationStatus,
}

/// A pre-existing allocation supplied with the request.
///
/// Only the ship and dock matter to the engine: every existing allocation
/// occupies its dock for the whole solve, whatever its time window.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingAllocation {
    pub id: Option<AllocationId>,
    pub ship_id: ShipId,
    pub dock_id: DockId,
    pub status: AllocationStatus,
}
