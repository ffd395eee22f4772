//! Dockforge Solver - berth allocation engine
//!
//! This crate turns an [`OptimizationRequest`](dockforge_core::OptimizationRequest)
//! into an [`OptimizationResult`](dockforge_core::OptimizationResult):
//! - Registry: validation and normalization of incoming records
//! - Environmental gate: weather safety short-circuit
//! - Compatibility filter and capacity accountant
//! - Objective builder and the two assignment solvers
//!   (branch-and-bound exhaustive search, bounded heuristic)
//! - Termination conditions for the search budget
//! - Diagnostics for every unplaced ship

pub mod capacity;
pub mod compatibility;
pub mod diagnostics;
pub mod engine;
pub mod exhaustive;
pub mod gate;
pub mod heuristic;
pub mod id_gen;
pub mod model;
pub mod objective;
pub mod registry;
pub mod scope;
pub mod stats;
pub mod strategy;
pub mod termination;

pub use engine::Engine;
pub use exhaustive::ExhaustiveSolver;
pub use gate::{EnvironmentalGate, GateDecision, WeatherViolation};
pub use heuristic::HeuristicSolver;
pub use id_gen::{AllocationIdGenerator, SequentialIdGenerator};
pub use model::{AssignmentModel, AssignmentSolution, PairOption};
pub use registry::{Problem, Registry};
pub use strategy::{AssignmentSolver, SolveOutcome};
