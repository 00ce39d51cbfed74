//! Conic-section orbit entities.
//!
//! Every entity owns a formula table and resolves its remaining parameters
//! with [`orbital_solver::solve`] when it is constructed. The result is
//! immutable and keeps the solver trace.

pub mod common;
pub mod ellipse;
mod formula;
pub mod hyperbola;
pub mod launch_window;
pub mod transfer;

use orbital_core::NumericError;
use orbital_solver::SolveError;
use thiserror::Error;

pub use common::{circular_speed, eccentricity_from_radii, orbit_radius, vis_viva};
pub use ellipse::Ellipse;
pub use hyperbola::Hyperbola;
pub use launch_window::{LaunchWindowError, LaunchWindows};
pub use transfer::{Direction, Phasing, TransferEllipse, TransferKind};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error(transparent)]
    Numeric(#[from] NumericError),
}
