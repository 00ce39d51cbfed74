//! Decimal arithmetic helpers.
//!
//! Values flow through the solver as [`Decimal`]. Transcendental functions are
//! evaluated in `f64` and converted back, and every helper reports a
//! [`NumericError`] instead of panicking or producing a non-finite value.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use thiserror::Error;

use crate::constants::EPSILON_PRECISION;

/// Arguments of `acos`/`asin` may overshoot ±1 by this much from rounding.
const UNIT_INTERVAL_TOLERANCE: f64 = 1e-9;

/// Domain and range failures raised by formula arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("square root of negative value {0}")]
    NegativeSqrt(Decimal),
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
    #[error("{operation} is undefined for {value}")]
    OutOfDomain {
        operation: &'static str,
        value: Decimal,
    },
    #[error("result {0} is not representable as a decimal")]
    NotRepresentable(f64),
}

/// Convert to `f64` for transcendental evaluation.
pub fn to_f64(value: Decimal) -> f64 {
    // Every `Decimal` fits in an `f64` (with rounding).
    value.to_f64().unwrap_or(f64::NAN)
}

/// Convert an `f64` result back into the decimal domain.
pub fn from_f64(value: f64) -> Result<Decimal, NumericError> {
    if !value.is_finite() {
        return Err(NumericError::NotRepresentable(value));
    }
    Decimal::from_f64(value).ok_or(NumericError::NotRepresentable(value))
}

/// Checked decimal addition.
pub fn add(lhs: Decimal, rhs: Decimal) -> Result<Decimal, NumericError> {
    lhs.checked_add(rhs).ok_or(NumericError::Overflow("addition"))
}

/// Checked decimal subtraction.
pub fn sub(lhs: Decimal, rhs: Decimal) -> Result<Decimal, NumericError> {
    lhs.checked_sub(rhs).ok_or(NumericError::Overflow("subtraction"))
}

/// Checked decimal division.
pub fn div(numerator: Decimal, denominator: Decimal) -> Result<Decimal, NumericError> {
    if denominator.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    numerator
        .checked_div(denominator)
        .ok_or(NumericError::Overflow("division"))
}

/// Checked decimal multiplication.
pub fn mul(lhs: Decimal, rhs: Decimal) -> Result<Decimal, NumericError> {
    lhs.checked_mul(rhs).ok_or(NumericError::Overflow("multiplication"))
}

pub fn sqrt(value: Decimal) -> Result<Decimal, NumericError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(NumericError::NegativeSqrt(value));
    }
    from_f64(to_f64(value).sqrt())
}

pub fn cbrt(value: Decimal) -> Result<Decimal, NumericError> {
    from_f64(to_f64(value).cbrt())
}

pub fn exp(value: Decimal) -> Result<Decimal, NumericError> {
    from_f64(to_f64(value).exp())
}

/// Natural logarithm; defined for positive values only.
pub fn ln(value: Decimal) -> Result<Decimal, NumericError> {
    if value <= Decimal::ZERO {
        return Err(NumericError::OutOfDomain {
            operation: "ln",
            value,
        });
    }
    from_f64(to_f64(value).ln())
}

#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

pub fn sin_deg(degrees: Decimal) -> f64 {
    deg_to_rad(to_f64(degrees)).sin()
}

pub fn cos_deg(degrees: Decimal) -> f64 {
    deg_to_rad(to_f64(degrees)).cos()
}

/// `acos` in degrees. Arguments within rounding distance of ±1 are clamped.
pub fn acos_deg(value: Decimal) -> Result<Decimal, NumericError> {
    let x = unit_interval("acos", value)?;
    from_f64(rad_to_deg(x.acos()))
}

/// `asin` in degrees. Arguments within rounding distance of ±1 are clamped.
pub fn asin_deg(value: Decimal) -> Result<Decimal, NumericError> {
    let x = unit_interval("asin", value)?;
    from_f64(rad_to_deg(x.asin()))
}

fn unit_interval(operation: &'static str, value: Decimal) -> Result<f64, NumericError> {
    let x = to_f64(value);
    if x.abs() > 1.0 + UNIT_INTERVAL_TOLERANCE {
        return Err(NumericError::OutOfDomain { operation, value });
    }
    Ok(x.clamp(-1.0, 1.0))
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(degrees: Decimal) -> Decimal {
    let full = Decimal::from(360);
    let reduced = degrees % full;
    if reduced.is_sign_negative() && !reduced.is_zero() {
        reduced + full
    } else {
        reduced
    }
}

/// Round an eccentricity to [`EPSILON_PRECISION`] decimal places.
pub fn round_eccentricity(epsilon: Decimal) -> Decimal {
    epsilon.round_dp(EPSILON_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sqrt_rejects_negative_values() {
        assert_eq!(
            sqrt(dec!(-4)),
            Err(NumericError::NegativeSqrt(dec!(-4)))
        );
        assert_eq!(sqrt(dec!(0)), Ok(dec!(0)));
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(div(dec!(1), dec!(0)), Err(NumericError::DivisionByZero));
        assert_eq!(div(dec!(1), dec!(4)), Ok(dec!(0.25)));
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(add(Decimal::MAX, dec!(1)), Err(NumericError::Overflow("addition")));
        assert_eq!(sub(Decimal::MIN, dec!(1)), Err(NumericError::Overflow("subtraction")));
        assert_eq!(
            mul(Decimal::MAX, dec!(2)),
            Err(NumericError::Overflow("multiplication"))
        );
        assert_eq!(add(dec!(1.5), dec!(2)), Ok(dec!(3.5)));
    }

    #[test]
    fn acos_clamps_rounding_overshoot_only() {
        assert_eq!(acos_deg(dec!(1.0000000000001)), Ok(dec!(0)));
        assert!(acos_deg(dec!(1.1)).is_err());
    }

    #[test]
    fn normalize_wraps_negative_angles() {
        assert_eq!(normalize_degrees(dec!(-90)), dec!(270));
        assert_eq!(normalize_degrees(dec!(720.5)), dec!(0.5));
        assert_eq!(normalize_degrees(dec!(360)), dec!(0));
    }

    #[test]
    fn ln_is_undefined_for_non_positive_values() {
        assert!(ln(dec!(0)).is_err());
        assert!(ln(dec!(-1)).is_err());
    }
}
