//! Dockforge Core - Domain types for berth allocation
//!
//! This crate provides the fundamental abstractions for Dockforge:
//! - Validated domain types (ships, docks, allocations, weather)
//! - Wire request/result shapes exchanged with the hosting shell
//! - Fixed-point score type used by the objective and the solvers
//! - Error types shared by all crates

pub mod criterion;
pub mod domain;
pub mod error;
pub mod request;
pub mod result;
pub mod score;

pub use criterion::OptimizationCriterion;
pub use domain::{
    Allocation, AllocationId, AllocationStatus, Dock, DockId, ExistingAllocation,
    OperationalStatus, Ship, ShipId, VesselType, WeatherSnapshot,
};
pub use error::{DockforgeError, InputError, RecordKind, Result};
pub use request::{
    AllocationRecord, DockRecord, OptimizationRequest, ShipRecord, TideRecord, WeatherRecord,
    WeatherSettings, WindRecord,
};
pub use result::{
    Metrics, OptimizationResult, SearchStrategy, SearchSummary, UnassignedKind, UnassignedShip,
};
pub use score::AllocationScore;
