//! Open hyperbolic trajectories (`ε > 1`) used for escape and capture.
//!
//! The semi-major axis is positive by convention; distances measured from the
//! centre of the hyperbola therefore read `e = a + rp`.

use std::sync::LazyLock;

use log::info;
use orbital_bodies::Body;
use orbital_core::numeric::{acos_deg, add, asin_deg, div, mul, sqrt, sub};
use orbital_core::units::{DEGREES, DIMENSIONLESS, KM, KM3_S2, KM_S};
use orbital_core::{Decimal, Quantity};
use orbital_solver::{Derivation, Derived, FormulaTable, Knowns, Params, Step, solve};
use serde::Serialize;

use crate::OrbitError;
use crate::formula::{body_name, eccentricity, is_positive, seed, some};

static TABLE: LazyLock<FormulaTable> = LazyLock::new(|| {
    FormulaTable::new()
        .param("mu", KM3_S2, "gravitational parameter of the central body", [])
        .param("body_radius", KM, "mean radius of the central body", [])
        .param(
            "hp",
            KM,
            "periapsis altitude above the surface",
            [Derivation::new("hp = rp − R", &["rp", "body_radius"], hp_from_rp)],
        )
        .param(
            "rp",
            KM,
            "periapsis radius",
            [
                Derivation::new("rp = R + hp", &["body_radius", "hp"], rp_from_hp),
                Derivation::new("rp = a(ε − 1)", &["a", "epsilon"], rp_from_a_epsilon),
                Derivation::new("rp = p / (1 + ε)", &["p", "epsilon"], rp_from_p_epsilon),
                Derivation::new("rp = e − a", &["e", "a"], rp_from_e_a),
            ],
        )
        .param(
            "v_inf",
            KM_S,
            "hyperbolic excess speed",
            [Derivation::new("v∞ = √(mu / a)", &["mu", "a"], v_inf_from_a)],
        )
        .param(
            "a",
            KM,
            "semi-major axis",
            [
                Derivation::new("a = mu / v∞²", &["mu", "v_inf"], a_from_v_inf),
                Derivation::new("a = p / (ε² − 1)", &["p", "epsilon"], a_from_p_epsilon),
                Derivation::new("a = rp / (ε − 1)", &["rp", "epsilon"], a_from_rp_epsilon),
            ],
        )
        .param(
            "epsilon",
            DIMENSIONLESS,
            "numerical eccentricity",
            [
                Derivation::new("ε = 1 + rp / a", &["rp", "a"], epsilon_from_rp_a),
                Derivation::new("ε = e / a", &["e", "a"], epsilon_from_e_a),
            ],
        )
        .param(
            "p",
            KM,
            "semi-latus rectum",
            [
                Derivation::new("p = a(ε² − 1)", &["a", "epsilon"], p_from_a_epsilon),
                Derivation::new("p = rp(1 + ε)", &["rp", "epsilon"], p_from_rp_epsilon),
            ],
        )
        .param(
            "e",
            KM,
            "linear eccentricity",
            [
                Derivation::new("e = a + rp", &["a", "rp"], e_from_a_rp),
                Derivation::new("e = a ε", &["a", "epsilon"], e_from_a_epsilon),
            ],
        )
        .param(
            "b",
            KM,
            "semi-minor axis",
            [Derivation::new("b = √(e² − a²)", &["e", "a"], b_from_e_a)],
        )
        .param(
            "vk",
            KM_S,
            "circular speed at the periapsis radius",
            [Derivation::new("vk = √(mu / rp)", &["mu", "rp"], vk_from_rp)],
        )
        .param(
            "vp",
            KM_S,
            "speed at periapsis",
            [
                Derivation::new("vp = √(2 vk² + v∞²)", &["vk", "v_inf"], vp_from_vk),
                Derivation::new("vp = √(mu (2/rp + 1/a))", &["mu", "rp", "a"], vp_from_rp_a),
            ],
        )
        .param(
            "delta_v",
            KM_S,
            "burn between the circular parking orbit and the hyperbola",
            [Derivation::new("Δv = vp − vk", &["vp", "vk"], delta_v_from_speeds)],
        )
        .param(
            "anomaly_inf",
            DEGREES,
            "true anomaly of the asymptote",
            [Derivation::new("φ∞ = acos(−1/ε)", &["epsilon"], anomaly_inf)],
        )
        .param(
            "turning_angle",
            DEGREES,
            "deflection between the asymptotes",
            [Derivation::new("δ = 2 asin(1/ε)", &["epsilon"], turning_angle)],
        )
});

pub fn table() -> &'static FormulaTable {
    &TABLE
}

fn hp_from_rp(p: &Params) -> Derived {
    some(sub(p.value("rp")?, p.value("body_radius")?)?)
}

fn rp_from_hp(p: &Params) -> Derived {
    some(add(p.value("body_radius")?, p.value("hp")?)?)
}

fn rp_from_a_epsilon(p: &Params) -> Derived {
    some(mul(p.value("a")?, sub(p.value("epsilon")?, Decimal::ONE)?)?)
}

fn rp_from_p_epsilon(p: &Params) -> Derived {
    some(div(p.value("p")?, add(Decimal::ONE, p.value("epsilon")?)?)?)
}

fn rp_from_e_a(p: &Params) -> Derived {
    some(sub(p.value("e")?, p.value("a")?)?)
}

fn v_inf_from_a(p: &Params) -> Derived {
    some(sqrt(div(p.value("mu")?, p.value("a")?)?)?)
}

fn a_from_v_inf(p: &Params) -> Derived {
    let v_inf = p.value("v_inf")?;
    some(div(p.value("mu")?, mul(v_inf, v_inf)?)?)
}

fn a_from_p_epsilon(p: &Params) -> Derived {
    let epsilon = p.value("epsilon")?;
    some(div(p.value("p")?, sub(mul(epsilon, epsilon)?, Decimal::ONE)?)?)
}

fn a_from_rp_epsilon(p: &Params) -> Derived {
    some(div(p.value("rp")?, sub(p.value("epsilon")?, Decimal::ONE)?)?)
}

fn epsilon_from_rp_a(p: &Params) -> Derived {
    eccentricity(add(Decimal::ONE, div(p.value("rp")?, p.value("a")?)?)?)
}

fn epsilon_from_e_a(p: &Params) -> Derived {
    eccentricity(div(p.value("e")?, p.value("a")?)?)
}

fn p_from_a_epsilon(p: &Params) -> Derived {
    let epsilon = p.value("epsilon")?;
    some(mul(p.value("a")?, sub(mul(epsilon, epsilon)?, Decimal::ONE)?)?)
}

fn p_from_rp_epsilon(p: &Params) -> Derived {
    some(mul(p.value("rp")?, add(Decimal::ONE, p.value("epsilon")?)?)?)
}

fn e_from_a_rp(p: &Params) -> Derived {
    some(add(p.value("a")?, p.value("rp")?)?)
}

fn e_from_a_epsilon(p: &Params) -> Derived {
    some(mul(p.value("a")?, p.value("epsilon")?)?)
}

fn b_from_e_a(p: &Params) -> Derived {
    let e = p.value("e")?;
    let a = p.value("a")?;
    some(sqrt(sub(mul(e, e)?, mul(a, a)?)?)?)
}

fn vk_from_rp(p: &Params) -> Derived {
    some(sqrt(div(p.value("mu")?, p.value("rp")?)?)?)
}

fn vp_from_vk(p: &Params) -> Derived {
    let vk = p.value("vk")?;
    let v_inf = p.value("v_inf")?;
    some(sqrt(add(mul(Decimal::TWO, mul(vk, vk)?)?, mul(v_inf, v_inf)?)?)?)
}

fn vp_from_rp_a(p: &Params) -> Derived {
    let inverse = add(div(Decimal::TWO, p.value("rp")?)?, div(Decimal::ONE, p.value("a")?)?)?;
    some(sqrt(mul(p.value("mu")?, inverse)?)?)
}

fn delta_v_from_speeds(p: &Params) -> Derived {
    some(sub(p.value("vp")?, p.value("vk")?)?)
}

fn anomaly_inf(p: &Params) -> Derived {
    some(acos_deg(div(-Decimal::ONE, p.value("epsilon")?)?)?)
}

fn turning_angle(p: &Params) -> Derived {
    some(mul(Decimal::TWO, asin_deg(div(Decimal::ONE, p.value("epsilon")?)?)?)?)
}

/// Escape or capture hyperbola around `central`.
#[derive(Debug, Clone, Serialize)]
pub struct Hyperbola<'a> {
    #[serde(serialize_with = "body_name")]
    pub central: &'a Body,
    pub mu: Quantity,
    pub body_radius: Quantity,
    pub hp: Quantity,
    pub rp: Quantity,
    pub v_inf: Quantity,
    pub a: Quantity,
    pub epsilon: Quantity,
    pub p: Quantity,
    pub e: Quantity,
    pub b: Quantity,
    pub vk: Quantity,
    pub vp: Quantity,
    pub delta_v: Quantity,
    pub anomaly_inf: Quantity,
    pub turning_angle: Quantity,
    #[serde(skip)]
    trace: Vec<Step>,
}

impl<'a> Hyperbola<'a> {
    /// Solve a hyperbola around `central`; `mu` and `body_radius` default to
    /// the body's values.
    pub fn new(central: &'a Body, mut knowns: Knowns) -> Result<Self, OrbitError> {
        seed(&mut knowns, "mu", central.mu())?;
        seed(&mut knowns, "body_radius", central.radius())?;
        let given = knowns.resolve(table())?;
        let solution = solve(table(), given)?;
        let hyperbola = Self {
            central,
            mu: solution.take("mu")?,
            body_radius: solution.take("body_radius")?,
            hp: solution.take("hp")?,
            rp: solution.take("rp")?,
            v_inf: solution.take("v_inf")?,
            a: solution.take("a")?,
            epsilon: solution.take("epsilon")?,
            p: solution.take("p")?,
            e: solution.take("e")?,
            b: solution.take("b")?,
            vk: solution.take("vk")?,
            vp: solution.take("vp")?,
            delta_v: solution.take("delta_v")?,
            anomaly_inf: solution.take("anomaly_inf")?,
            turning_angle: solution.take("turning_angle")?,
            trace: solution.trace,
        };
        hyperbola.check()?;
        info!(
            "hyperbola around {}: v∞ = {}, Δv = {}",
            central.name, hyperbola.v_inf, hyperbola.delta_v
        );
        Ok(hyperbola)
    }

    /// Departure (or arrival) hyperbola from a circular parking orbit at
    /// `altitude` with the given excess speed.
    pub fn from_parking_orbit(
        central: &'a Body,
        altitude: Decimal,
        v_inf: Decimal,
    ) -> Result<Self, OrbitError> {
        Self::new(
            central,
            Knowns::new().with("hp", altitude).with("v_inf", v_inf),
        )
    }

    pub fn trace(&self) -> &[Step] {
        &self.trace
    }

    fn check(&self) -> Result<(), OrbitError> {
        if self.epsilon.value <= Decimal::ONE {
            return Err(OrbitError::InvalidGeometry(format!(
                "eccentricity {} is not hyperbolic",
                self.epsilon
            )));
        }
        if !is_positive(&self.a) {
            return Err(OrbitError::InvalidGeometry(format!(
                "semi-major axis {} must be positive",
                self.a
            )));
        }
        if !is_positive(&self.rp) {
            return Err(OrbitError::InvalidGeometry(format!(
                "periapsis {} must be positive",
                self.rp
            )));
        }
        Ok(())
    }
}
