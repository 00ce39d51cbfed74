//! Constraint propagation over named physical parameters.
//!
//! An entity describes its parameters in a [`FormulaTable`]: every parameter
//! lists candidate [`Derivation`]s, each computing that parameter from a fixed
//! set of other parameters. [`solve`] starts from the known values and keeps
//! applying ready derivations until every parameter is resolved or a full pass
//! makes no progress.

pub mod knowns;
pub mod params;
pub mod solve;
pub mod table;

pub use knowns::Knowns;
pub use params::{FormulaError, ParamName, Params};
pub use solve::{Solution, SolveError, Step, solve};
pub use table::{Compute, Derivation, Derived, FormulaTable, ParamSpec, TableError};
