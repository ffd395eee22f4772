//! Validated domain types.
//!
//! These are produced by the registry from wire records and stay immutable
//! for the duration of a solve.

mod allocation;
mod dock;
mod ids;
mod ship;
mod weather;

pub use allocation::{Allocation, AllocationStatus, ExistingAllocation};
pub use dock::{Dock, OperationalStatus};
pub use ids::{AllocationId, DockId, ShipId, VesselType};
pub use ship::Ship;
pub use weather::{WeatherSnapshot, DEFAULT_MAX_WIND_SPEED, DEFAULT_MIN_TIDE_LEVEL};
