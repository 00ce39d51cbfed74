//! Orbital Calculator: two-body conic orbits, transfer ellipses and payload
//! budgets, each resolved from whatever subset of parameters is known.
//!
//! This crate re-exports the workspace libraries so front-ends depend on a
//! single package.

pub use orbital_bodies as bodies;
pub use orbital_config as config;
pub use orbital_conics as conics;
pub use orbital_export as export;
pub use orbital_mission as mission;
pub use orbital_propulsion as propulsion;
pub use orbital_solver as solver;

pub use orbital_core::{Decimal, NumericError, Quantity, constants, numeric, time, units};

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
