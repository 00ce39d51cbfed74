//! Small adapters shared by the formula tables of this crate.

use orbital_bodies::Body;
use orbital_core::numeric;
use orbital_core::{Decimal, Quantity};
use orbital_solver::{Derived, FormulaError, Knowns, Params};
use serde::Serializer;

use crate::OrbitError;

pub(crate) fn some(value: Decimal) -> Derived {
    Ok(Some(value))
}

/// Eccentricities are rounded before they are fed to later formulas.
pub(crate) fn eccentricity(value: Decimal) -> Derived {
    Ok(Some(numeric::round_eccentricity(value)))
}

pub(crate) fn float(p: &Params, name: &'static str) -> Result<f64, FormulaError> {
    Ok(numeric::to_f64(p.value(name)?))
}

pub(crate) fn from_float(value: f64) -> Derived {
    Ok(Some(numeric::from_f64(value)?))
}

/// Value of a branch selector: `Some(value)` when the `inward` flag matches.
pub(crate) fn when_inward(
    p: &Params,
    inward: bool,
    value: impl FnOnce() -> Result<Decimal, FormulaError>,
) -> Derived {
    if p.flag("inward")? == inward {
        value().map(Some)
    } else {
        Ok(None)
    }
}

/// Seed a body property unless the caller supplied the parameter already.
/// Unknown (`NaN`) properties are skipped.
pub(crate) fn seed(knowns: &mut Knowns, name: &str, value: Option<f64>) -> Result<(), OrbitError> {
    if let Some(value) = value {
        let value = numeric::from_f64(value)
            .map_err(|err| OrbitError::InvalidGeometry(format!("{name}: {err}")))?;
        knowns.seed(name, value);
    }
    Ok(())
}

pub(crate) fn body_name<S: Serializer>(body: &&Body, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&body.name)
}

pub(crate) fn optional_body_name<S: Serializer>(
    body: &Option<&Body>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match body {
        Some(body) => serializer.serialize_some(&body.name),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn is_positive(quantity: &Quantity) -> bool {
    quantity.value > Decimal::ZERO
}
