//! Shared test fixtures for Dockforge crates.
//!
//! - [`builders`] - ship, dock and request records with sensible defaults
//! - [`scenarios`] - small canonical requests
//! - [`invariants`] - checks every produced result must pass
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! dockforge-test = { workspace = true }
//! ```

pub mod builders;
pub mod invariants;
pub mod scenarios;

pub use builders::{allocation, dock, request, ship};
pub use invariants::check_invariants;
