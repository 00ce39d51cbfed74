//! Closed elliptical orbits (`0 ≤ ε < 1`).

use std::f64::consts::TAU;
use std::sync::LazyLock;

use log::info;
use orbital_bodies::Body;
use orbital_core::numeric::{add, div, mul, sqrt, sub};
use orbital_core::units::{DIMENSIONLESS, KM, KM3_S2, KM_S, SECONDS};
use orbital_core::{Decimal, Quantity};
use orbital_solver::{Derivation, Derived, FormulaTable, Knowns, Params, Step, solve};
use serde::Serialize;

use crate::OrbitError;
use crate::common::{apsis_speed, eccentricity_from_radii};
use crate::formula::{body_name, eccentricity, float, from_float, seed, some};

static TABLE: LazyLock<FormulaTable> = LazyLock::new(|| {
    FormulaTable::new()
        .param("mu", KM3_S2, "gravitational parameter of the central body", [])
        .param(
            "ra",
            KM,
            "apoapsis radius",
            [
                Derivation::new("ra = a + e", &["a", "e"], ra_from_a_e),
                Derivation::new("ra = a(1 + ε)", &["a", "epsilon"], ra_from_a_epsilon),
                Derivation::new("ra = p / (1 − ε)", &["p", "epsilon"], ra_from_p_epsilon),
                Derivation::new("ra = 2a − rp", &["a", "rp"], ra_from_a_rp),
            ],
        )
        .param(
            "rp",
            KM,
            "periapsis radius",
            [
                Derivation::new("rp = a(1 − ε)", &["a", "epsilon"], rp_from_a_epsilon),
                Derivation::new("rp = 2a − ra", &["a", "ra"], rp_from_a_ra),
                Derivation::new("rp = p / (1 + ε)", &["p", "epsilon"], rp_from_p_epsilon),
            ],
        )
        .param(
            "epsilon",
            DIMENSIONLESS,
            "numerical eccentricity",
            [
                Derivation::new("ε = e / a", &["e", "a"], epsilon_from_e_a),
                Derivation::new("ε = (ra − rp) / (ra + rp)", &["ra", "rp"], epsilon_from_radii),
                Derivation::new("ε = √(1 − p / a)", &["p", "a"], epsilon_from_p_a),
                Derivation::new("ε = p / rp − 1", &["p", "rp"], epsilon_from_p_rp),
                Derivation::new("ε = 1 − p / ra", &["p", "ra"], epsilon_from_p_ra),
            ],
        )
        .param(
            "p",
            KM,
            "semi-latus rectum",
            [
                Derivation::new("p = rp(1 + ε)", &["rp", "epsilon"], p_from_rp_epsilon),
                Derivation::new("p = ra(1 − ε)", &["ra", "epsilon"], p_from_ra_epsilon),
                Derivation::new("p = a(1 − ε²)", &["a", "epsilon"], p_from_a_epsilon),
            ],
        )
        .param(
            "a",
            KM,
            "semi-major axis",
            [
                Derivation::new("a = (ra + rp) / 2", &["ra", "rp"], a_from_radii),
                Derivation::new("a = p / (1 − ε²)", &["p", "epsilon"], a_from_p_epsilon),
                Derivation::new("a = ∛(mu (T / 2π)²)", &["mu", "period"], a_from_period),
            ],
        )
        .param(
            "b",
            KM,
            "semi-minor axis",
            [
                Derivation::new("b = √(a² − e²)", &["a", "e"], b_from_a_e),
                Derivation::new("b = √(a p)", &["a", "p"], b_from_a_p),
            ],
        )
        .param(
            "e",
            KM,
            "linear eccentricity",
            [
                Derivation::new("e = a − rp", &["a", "rp"], e_from_a_rp),
                Derivation::new("e = a ε", &["a", "epsilon"], e_from_a_epsilon),
                Derivation::new("e = √(a² − b²)", &["a", "b"], e_from_a_b),
            ],
        )
        .param(
            "vp",
            KM_S,
            "speed at periapsis",
            [
                Derivation::new("vp = √(mu (2/rp + (ε² − 1)/p))", &["mu", "rp", "epsilon", "p"], vp_from_p),
                Derivation::new("vp = √(2 mu (1/rp − 1/(rp + ra)))", &["mu", "rp", "ra"], vp_from_radii),
            ],
        )
        .param(
            "va",
            KM_S,
            "speed at apoapsis",
            [
                Derivation::new("va = √(mu (2/ra + (ε² − 1)/p))", &["mu", "ra", "epsilon", "p"], va_from_p),
                Derivation::new("va = √(2 mu (1/ra − 1/(ra + rp)))", &["mu", "ra", "rp"], va_from_radii),
            ],
        )
        .param(
            "period",
            SECONDS,
            "orbital period",
            [Derivation::new("T = 2π √(a³ / mu)", &["a", "mu"], period_from_a)],
        )
});

/// Formula table shared by every elliptical entity.
pub fn table() -> &'static FormulaTable {
    &TABLE
}

fn ra_from_a_e(p: &Params) -> Derived {
    some(add(p.value("a")?, p.value("e")?)?)
}

fn ra_from_a_epsilon(p: &Params) -> Derived {
    some(mul(p.value("a")?, add(Decimal::ONE, p.value("epsilon")?)?)?)
}

fn ra_from_p_epsilon(p: &Params) -> Derived {
    some(div(p.value("p")?, sub(Decimal::ONE, p.value("epsilon")?)?)?)
}

fn ra_from_a_rp(p: &Params) -> Derived {
    some(sub(mul(Decimal::TWO, p.value("a")?)?, p.value("rp")?)?)
}

fn rp_from_a_epsilon(p: &Params) -> Derived {
    some(mul(p.value("a")?, sub(Decimal::ONE, p.value("epsilon")?)?)?)
}

fn rp_from_a_ra(p: &Params) -> Derived {
    some(sub(mul(Decimal::TWO, p.value("a")?)?, p.value("ra")?)?)
}

fn rp_from_p_epsilon(p: &Params) -> Derived {
    some(div(p.value("p")?, add(Decimal::ONE, p.value("epsilon")?)?)?)
}

fn epsilon_from_e_a(p: &Params) -> Derived {
    eccentricity(div(p.value("e")?, p.value("a")?)?)
}

fn epsilon_from_radii(p: &Params) -> Derived {
    some(eccentricity_from_radii(p.value("ra")?, p.value("rp")?)?)
}

fn epsilon_from_p_a(p: &Params) -> Derived {
    eccentricity(sqrt(sub(Decimal::ONE, div(p.value("p")?, p.value("a")?)?)?)?)
}

fn epsilon_from_p_rp(p: &Params) -> Derived {
    eccentricity(sub(div(p.value("p")?, p.value("rp")?)?, Decimal::ONE)?)
}

fn epsilon_from_p_ra(p: &Params) -> Derived {
    eccentricity(sub(Decimal::ONE, div(p.value("p")?, p.value("ra")?)?)?)
}

fn p_from_rp_epsilon(p: &Params) -> Derived {
    some(mul(p.value("rp")?, add(Decimal::ONE, p.value("epsilon")?)?)?)
}

fn p_from_ra_epsilon(p: &Params) -> Derived {
    some(mul(p.value("ra")?, sub(Decimal::ONE, p.value("epsilon")?)?)?)
}

fn p_from_a_epsilon(p: &Params) -> Derived {
    let epsilon = p.value("epsilon")?;
    some(mul(p.value("a")?, sub(Decimal::ONE, mul(epsilon, epsilon)?)?)?)
}

fn a_from_radii(p: &Params) -> Derived {
    some(div(add(p.value("ra")?, p.value("rp")?)?, Decimal::TWO)?)
}

fn a_from_p_epsilon(p: &Params) -> Derived {
    let epsilon = p.value("epsilon")?;
    some(div(p.value("p")?, sub(Decimal::ONE, mul(epsilon, epsilon)?)?)?)
}

// mu (T/2π)² leaves the decimal range for outer-planet periods.
fn a_from_period(p: &Params) -> Derived {
    let mu = float(p, "mu")?;
    let period = float(p, "period")?;
    from_float((mu * (period / TAU).powi(2)).cbrt())
}

fn b_from_a_e(p: &Params) -> Derived {
    let a = p.value("a")?;
    let e = p.value("e")?;
    some(sqrt(sub(mul(a, a)?, mul(e, e)?)?)?)
}

fn b_from_a_p(p: &Params) -> Derived {
    some(sqrt(mul(p.value("a")?, p.value("p")?)?)?)
}

fn e_from_a_rp(p: &Params) -> Derived {
    some(sub(p.value("a")?, p.value("rp")?)?)
}

fn e_from_a_epsilon(p: &Params) -> Derived {
    some(mul(p.value("a")?, p.value("epsilon")?)?)
}

fn e_from_a_b(p: &Params) -> Derived {
    let a = p.value("a")?;
    let b = p.value("b")?;
    some(sqrt(sub(mul(a, a)?, mul(b, b)?)?)?)
}

fn vp_from_p(p: &Params) -> Derived {
    some(apsis_speed(
        p.value("mu")?,
        p.value("rp")?,
        p.value("epsilon")?,
        p.value("p")?,
    )?)
}

fn va_from_p(p: &Params) -> Derived {
    some(apsis_speed(
        p.value("mu")?,
        p.value("ra")?,
        p.value("epsilon")?,
        p.value("p")?,
    )?)
}

fn vp_from_radii(p: &Params) -> Derived {
    some(speed_from_radii(p.value("mu")?, p.value("rp")?, p.value("ra")?)?)
}

fn va_from_radii(p: &Params) -> Derived {
    some(speed_from_radii(p.value("mu")?, p.value("ra")?, p.value("rp")?)?)
}

/// `√(2 mu (1/r − 1/(r + r_other)))` at apsis `r`.
fn speed_from_radii(mu: Decimal, r: Decimal, other: Decimal) -> Result<Decimal, orbital_core::NumericError> {
    let inverse = sub(div(Decimal::ONE, r)?, div(Decimal::ONE, add(r, other)?)?)?;
    sqrt(mul(mul(Decimal::TWO, mu)?, inverse)?)
}

fn period_from_a(p: &Params) -> Derived {
    let a = float(p, "a")?;
    let mu = float(p, "mu")?;
    from_float(TAU * (a.powi(3) / mu).sqrt())
}

/// A closed orbit around `central`.
#[derive(Debug, Clone, Serialize)]
pub struct Ellipse<'a> {
    #[serde(serialize_with = "body_name")]
    pub central: &'a Body,
    pub mu: Quantity,
    pub ra: Quantity,
    pub rp: Quantity,
    pub epsilon: Quantity,
    pub p: Quantity,
    pub a: Quantity,
    pub b: Quantity,
    pub e: Quantity,
    pub vp: Quantity,
    pub va: Quantity,
    pub period: Quantity,
    #[serde(skip)]
    trace: Vec<Step>,
}

impl<'a> Ellipse<'a> {
    /// Solve an ellipse around `central` from the given parameters; `mu`
    /// defaults to the body's gravitational parameter.
    pub fn new(central: &'a Body, mut knowns: Knowns) -> Result<Self, OrbitError> {
        seed(&mut knowns, "mu", central.mu())?;
        let given = knowns.resolve(table())?;
        let solution = solve(table(), given)?;
        let ellipse = Self {
            central,
            mu: solution.take("mu")?,
            ra: solution.take("ra")?,
            rp: solution.take("rp")?,
            epsilon: solution.take("epsilon")?,
            p: solution.take("p")?,
            a: solution.take("a")?,
            b: solution.take("b")?,
            e: solution.take("e")?,
            vp: solution.take("vp")?,
            va: solution.take("va")?,
            period: solution.take("period")?,
            trace: solution.trace,
        };
        ellipse.check()?;
        info!(
            "ellipse around {}: rp = {}, ra = {}, ε = {:.6}",
            central.name, ellipse.rp, ellipse.ra, ellipse.epsilon
        );
        Ok(ellipse)
    }

    /// Circular orbit `altitude` above the surface of `central`.
    pub fn circular(central: &'a Body, altitude: Decimal) -> Result<Self, OrbitError> {
        let radius = orbital_core::numeric::from_f64(central.radius_km)
            .and_then(|radius| add(radius, altitude))
            .map_err(|err| OrbitError::InvalidGeometry(format!("radius of {}: {err}", central.name)))?;
        Self::new(
            central,
            Knowns::new().with("ra", radius).with("rp", radius),
        )
    }

    pub fn trace(&self) -> &[Step] {
        &self.trace
    }

    fn check(&self) -> Result<(), OrbitError> {
        check_closed(&self.epsilon, &self.rp, &self.ra)
    }
}

/// `0 ≤ ε < 1` and `0 < rp ≤ ra`.
pub(crate) fn check_closed(epsilon: &Quantity, rp: &Quantity, ra: &Quantity) -> Result<(), OrbitError> {
    if epsilon.value < Decimal::ZERO || epsilon.value >= Decimal::ONE {
        return Err(OrbitError::InvalidGeometry(format!(
            "eccentricity {epsilon} is not elliptical"
        )));
    }
    if rp.value <= Decimal::ZERO || rp.value > ra.value {
        return Err(OrbitError::InvalidGeometry(format!(
            "periapsis {rp} must be positive and not exceed apoapsis {ra}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use orbital_bodies::lookup;
    use orbital_core::numeric::to_f64;
    use rust_decimal_macros::dec;

    #[test]
    fn table_is_consistent() {
        table().validate().unwrap();
    }

    #[test]
    fn geostationary_transfer_orbit() {
        let earth = lookup("erde").unwrap();
        let gto = Ellipse::new(
            earth,
            Knowns::new().with("ra", dec!(42164)).with("rp", dec!(6578)),
        )
        .unwrap();
        assert_eq!(gto.a.value, dec!(24371));
        assert_relative_eq!(to_f64(gto.epsilon.value), 0.730089, epsilon = 1e-6);
        assert_relative_eq!(to_f64(gto.vp.value), 10.239, epsilon = 1e-3);
        assert_relative_eq!(to_f64(gto.va.value), 1.597, epsilon = 1e-3);
        assert_relative_eq!(to_f64(gto.period.value) / 3600.0, 10.52, epsilon = 0.02);
    }

    #[test]
    fn circular_orbit_has_zero_eccentricity() {
        let earth = lookup("earth").unwrap();
        let leo = Ellipse::circular(earth, dec!(200)).unwrap();
        assert_eq!(leo.epsilon.value, Decimal::ZERO);
        assert_eq!(leo.p.value, dec!(6578));
        assert_relative_eq!(to_f64(leo.vp.value), 7.784, epsilon = 1e-3);
        assert_eq!(leo.vp, leo.va);
    }

    #[test]
    fn rejects_periapsis_above_apoapsis() {
        let earth = lookup("earth").unwrap();
        let err = Ellipse::new(
            earth,
            Knowns::new().with("ra", dec!(6578)).with("rp", dec!(42164)),
        )
        .unwrap_err();
        assert!(matches!(err, OrbitError::InvalidGeometry(_)));
    }

    #[test]
    fn trace_starts_with_given_values() {
        let earth = lookup("earth").unwrap();
        let leo = Ellipse::circular(earth, dec!(200)).unwrap();
        assert!(matches!(leo.trace()[0], Step::Given { .. }));
        assert_eq!(leo.trace().len(), table().len());
    }

    #[test]
    fn eccentricity_from_semi_latus_rectum_and_one_apsis() {
        let earth = lookup("earth").unwrap();
        let from_rp = Ellipse::new(
            earth,
            Knowns::new().with("rp", dec!(6578)).with("p", dec!(11380)),
        )
        .unwrap();
        assert_relative_eq!(to_f64(from_rp.epsilon.value), 0.730009, epsilon = 1e-6);
        assert_relative_eq!(to_f64(from_rp.ra.value), 42149.6, epsilon = 0.1);

        let from_ra = Ellipse::new(
            earth,
            Knowns::new().with("ra", dec!(42164)).with("p", dec!(11380)),
        )
        .unwrap();
        assert_relative_eq!(to_f64(from_ra.epsilon.value), 0.730101, epsilon = 1e-6);
        assert_relative_eq!(to_f64(from_ra.rp.value), 6577.6, epsilon = 0.1);
    }

    #[test]
    fn semi_minor_axis_fixes_linear_eccentricity() {
        let earth = lookup("earth").unwrap();
        let gto = Ellipse::new(
            earth,
            Knowns::new().with("a", dec!(24371)).with("b", dec!(16653.9722)),
        )
        .unwrap();
        assert_relative_eq!(to_f64(gto.e.value), 17793.0, epsilon = 0.01);
        assert_relative_eq!(to_f64(gto.rp.value), 6578.0, epsilon = 0.01);
        assert_relative_eq!(to_f64(gto.ra.value), 42164.0, epsilon = 0.01);
    }

    #[test]
    fn oversized_radii_are_an_error() {
        let earth = lookup("earth").unwrap();
        let err = Ellipse::new(
            earth,
            Knowns::new()
                .with("ra", dec!(50000000000000000000000000000))
                .with("rp", dec!(40000000000000000000000000000)),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OrbitError::Solve(orbital_solver::SolveError::Formula { .. }) | OrbitError::Numeric(_)
        ));
    }
}
