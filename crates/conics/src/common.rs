//! Closed-form relations used both by the formula tables and directly by callers.

use orbital_core::numeric::{self, NumericError, add, div, mul, sqrt, sub};
use orbital_core::Decimal;

/// `ε = (ra − rp) / (ra + rp)`, rounded to the working precision.
pub fn eccentricity_from_radii(ra: Decimal, rp: Decimal) -> Result<Decimal, NumericError> {
    Ok(numeric::round_eccentricity(div(sub(ra, rp)?, add(ra, rp)?)?))
}

/// Speed of a circular orbit of radius `r`.
pub fn circular_speed(mu: Decimal, r: Decimal) -> Result<Decimal, NumericError> {
    sqrt(div(mu, r)?)
}

/// Vis-viva: speed at radius `r` on a conic with semi-major axis `a`
/// (positive for ellipses).
pub fn vis_viva(mu: Decimal, r: Decimal, a: Decimal) -> Result<Decimal, NumericError> {
    sqrt(mul(mu, sub(div(Decimal::TWO, r)?, div(Decimal::ONE, a)?)?)?)
}

/// Orbit equation `r = p / (1 + ε cos φ)` for a true anomaly in degrees.
pub fn orbit_radius(p: Decimal, epsilon: Decimal, anomaly_deg: Decimal) -> Result<Decimal, NumericError> {
    let cos = numeric::from_f64(numeric::cos_deg(anomaly_deg))?;
    div(p, add(Decimal::ONE, mul(epsilon, cos)?)?)
}

/// Speed at periapsis `rp` of a conic with semi-latus rectum `p`.
pub fn periapsis_speed(mu: Decimal, rp: Decimal, epsilon: Decimal, p: Decimal) -> Result<Decimal, NumericError> {
    apsis_speed(mu, rp, epsilon, p)
}

/// `v = √(mu (2/r + (ε² − 1)/p))` at an apsis `r`.
pub(crate) fn apsis_speed(mu: Decimal, r: Decimal, epsilon: Decimal, p: Decimal) -> Result<Decimal, NumericError> {
    let energy = add(div(Decimal::TWO, r)?, div(sub(mul(epsilon, epsilon)?, Decimal::ONE)?, p)?)?;
    sqrt(mul(mu, energy)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn geostationary_transfer_eccentricity() {
        let epsilon = eccentricity_from_radii(dec!(42164), dec!(6578)).unwrap();
        // (42164 − 6578) / (42164 + 6578)
        assert_relative_eq!(numeric::to_f64(epsilon), 0.730089, epsilon = 1e-6);
    }

    #[test]
    fn low_earth_orbit_speed() {
        let v = circular_speed(dec!(398599), dec!(6578)).unwrap();
        assert_relative_eq!(numeric::to_f64(v), 7.784, epsilon = 1e-3);
    }

    #[test]
    fn vis_viva_matches_circular_speed_on_circles() {
        let circular = circular_speed(dec!(398599), dec!(7000)).unwrap();
        let vis = vis_viva(dec!(398599), dec!(7000), dec!(7000)).unwrap();
        assert_relative_eq!(numeric::to_f64(circular), numeric::to_f64(vis), epsilon = 1e-9);
    }

    #[test]
    fn orbit_radius_at_apsides() {
        let epsilon = eccentricity_from_radii(dec!(42164), dec!(6578)).unwrap();
        let p = dec!(6578) * (Decimal::ONE + epsilon);
        let rp = orbit_radius(p, epsilon, dec!(0)).unwrap();
        let ra = orbit_radius(p, epsilon, dec!(180)).unwrap();
        assert_relative_eq!(numeric::to_f64(rp), 6578.0, max_relative = 1e-9);
        assert_relative_eq!(numeric::to_f64(ra), 42164.0, max_relative = 1e-6);
    }

    #[test]
    fn periapsis_speed_on_circle_is_circular() {
        let v = periapsis_speed(dec!(398599), dec!(6578), dec!(0), dec!(6578)).unwrap();
        assert_relative_eq!(numeric::to_f64(v), 7.784, epsilon = 1e-3);
    }
}
