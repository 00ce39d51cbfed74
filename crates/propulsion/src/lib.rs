//! Vehicle mass budgets: mass fractions and the ideal rocket equation.

use std::sync::LazyLock;

use log::info;
use orbital_core::numeric::{add, div, exp, ln, mul, sub};
use orbital_core::units::{DIMENSIONLESS, KG, KM_S};
use orbital_core::{Decimal, Quantity};
use orbital_solver::{Derivation, Derived, FormulaTable, Knowns, Params, SolveError, Step, solve};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BudgetError {
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("invalid budget: {0}")]
    InvalidBudget(String),
}

static MASSES: LazyLock<FormulaTable> = LazyLock::new(|| {
    FormulaTable::new()
        .param(
            "m0",
            KG,
            "launch mass (structure, propellant and payload)",
            [
                Derivation::new("m0 = mK + mT + mN", &["mK", "mT", "mN"], m0_from_parts),
                Derivation::new("m0 = mb r", &["mb", "r"], m0_from_burnout),
                Derivation::new("m0 = mN / λ", &["mN", "lambda"], m0_from_payload_ratio),
            ],
        )
        .param(
            "mN",
            KG,
            "payload mass",
            [
                Derivation::new("mN = m0 − mK − mT", &["m0", "mK", "mT"], payload_from_parts),
                Derivation::new("mN = mb − mK", &["mb", "mK"], payload_from_burnout),
                Derivation::new("mN = λ m0", &["lambda", "m0"], payload_from_ratio),
            ],
        )
        .param(
            "mK",
            KG,
            "structural mass",
            [
                Derivation::new("mK = m0 − mT − mN", &["m0", "mT", "mN"], structure_from_parts),
                Derivation::new("mK = mb − mN", &["mb", "mN"], structure_from_burnout),
                Derivation::new("mK = σ mT / (1 − σ)", &["sigma", "mT"], structure_from_ratio),
            ],
        )
        .param(
            "mb",
            KG,
            "burnout mass (structure and payload)",
            [
                Derivation::new("mb = mK + mN", &["mK", "mN"], burnout_from_parts),
                Derivation::new("mb = m0 − mT", &["m0", "mT"], burnout_from_propellant),
                Derivation::new("mb = m0 / r", &["m0", "r"], burnout_from_mass_ratio),
            ],
        )
        .param(
            "mT",
            KG,
            "propellant mass",
            [
                Derivation::new("mT = m0 − mb", &["m0", "mb"], propellant_from_burnout),
                Derivation::new("mT = mK (1 − σ) / σ", &["mK", "sigma"], propellant_from_ratio),
            ],
        )
        .param(
            "r",
            DIMENSIONLESS,
            "mass ratio m0 / mb",
            [Derivation::new("r = m0 / mb", &["m0", "mb"], mass_ratio)],
        )
        .param(
            "sigma",
            DIMENSIONLESS,
            "structural ratio mK / (mK + mT)",
            [Derivation::new("σ = mK / (mK + mT)", &["mK", "mT"], structural_ratio)],
        )
        .param(
            "lambda",
            DIMENSIONLESS,
            "payload ratio mN / m0",
            [Derivation::new("λ = mN / m0", &["mN", "m0"], payload_ratio)],
        )
});

static ROCKET: LazyLock<FormulaTable> = LazyLock::new(|| {
    let rocket = FormulaTable::new()
        .param(
            "r",
            DIMENSIONLESS,
            "mass ratio m0 / mb",
            [Derivation::new("r = exp(Δv / w)", &["delta_v", "w"], mass_ratio_from_rocket_equation)],
        )
        .param(
            "delta_v",
            KM_S,
            "ideal velocity change",
            [Derivation::new("Δv = w ln r", &["w", "r"], delta_v)],
        )
        .param(
            "w",
            KM_S,
            "effective exhaust velocity",
            [Derivation::new("w = Δv / ln r", &["delta_v", "r"], exhaust_velocity)],
        );
    FormulaTable::merge(&MASSES, &rocket)
});

/// Mass-fraction table; the rocket-equation table adds `delta_v` and `w`.
pub fn table(rocket: bool) -> &'static FormulaTable {
    if rocket { &ROCKET } else { &MASSES }
}

fn m0_from_parts(p: &Params) -> Derived {
    Ok(Some(add(add(p.value("mK")?, p.value("mT")?)?, p.value("mN")?)?))
}

fn m0_from_burnout(p: &Params) -> Derived {
    Ok(Some(mul(p.value("mb")?, p.value("r")?)?))
}

fn m0_from_payload_ratio(p: &Params) -> Derived {
    Ok(Some(div(p.value("mN")?, p.value("lambda")?)?))
}

fn payload_from_parts(p: &Params) -> Derived {
    Ok(Some(sub(sub(p.value("m0")?, p.value("mK")?)?, p.value("mT")?)?))
}

fn payload_from_burnout(p: &Params) -> Derived {
    Ok(Some(sub(p.value("mb")?, p.value("mK")?)?))
}

fn payload_from_ratio(p: &Params) -> Derived {
    Ok(Some(mul(p.value("lambda")?, p.value("m0")?)?))
}

fn structure_from_parts(p: &Params) -> Derived {
    Ok(Some(sub(sub(p.value("m0")?, p.value("mT")?)?, p.value("mN")?)?))
}

fn structure_from_burnout(p: &Params) -> Derived {
    Ok(Some(sub(p.value("mb")?, p.value("mN")?)?))
}

fn structure_from_ratio(p: &Params) -> Derived {
    let sigma = p.value("sigma")?;
    Ok(Some(div(mul(sigma, p.value("mT")?)?, sub(Decimal::ONE, sigma)?)?))
}

fn burnout_from_parts(p: &Params) -> Derived {
    Ok(Some(add(p.value("mK")?, p.value("mN")?)?))
}

fn burnout_from_propellant(p: &Params) -> Derived {
    Ok(Some(sub(p.value("m0")?, p.value("mT")?)?))
}

fn burnout_from_mass_ratio(p: &Params) -> Derived {
    Ok(Some(div(p.value("m0")?, p.value("r")?)?))
}

fn propellant_from_burnout(p: &Params) -> Derived {
    Ok(Some(sub(p.value("m0")?, p.value("mb")?)?))
}

fn propellant_from_ratio(p: &Params) -> Derived {
    let sigma = p.value("sigma")?;
    Ok(Some(div(mul(p.value("mK")?, sub(Decimal::ONE, sigma)?)?, sigma)?))
}

fn mass_ratio(p: &Params) -> Derived {
    Ok(Some(div(p.value("m0")?, p.value("mb")?)?))
}

fn structural_ratio(p: &Params) -> Derived {
    let structure = p.value("mK")?;
    Ok(Some(div(structure, add(structure, p.value("mT")?)?)?))
}

fn payload_ratio(p: &Params) -> Derived {
    Ok(Some(div(p.value("mN")?, p.value("m0")?)?))
}

fn mass_ratio_from_rocket_equation(p: &Params) -> Derived {
    Ok(Some(exp(div(p.value("delta_v")?, p.value("w")?)?)?))
}

fn delta_v(p: &Params) -> Derived {
    Ok(Some(mul(p.value("w")?, ln(p.value("r")?)?)?))
}

fn exhaust_velocity(p: &Params) -> Derived {
    Ok(Some(div(p.value("delta_v")?, ln(p.value("r")?)?)?))
}

/// Masses and ratios of a single-stage vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct PayloadBudget {
    pub m0: Quantity,
    #[serde(rename = "mN")]
    pub m_n: Quantity,
    #[serde(rename = "mK")]
    pub m_k: Quantity,
    pub mb: Quantity,
    #[serde(rename = "mT")]
    pub m_t: Quantity,
    pub r: Quantity,
    pub sigma: Quantity,
    pub lambda: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_v: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<Quantity>,
    #[serde(skip)]
    trace: Vec<Step>,
}

impl PayloadBudget {
    /// Solve the budget. The rocket equation joins in when `delta_v` or `w`
    /// is among the knowns.
    pub fn new(knowns: Knowns) -> Result<Self, BudgetError> {
        let rocket = knowns.contains("delta_v") || knowns.contains("w");
        let table = table(rocket);
        let solution = solve(table, knowns.resolve(table)?)?;
        let budget = Self {
            m0: solution.take("m0")?,
            m_n: solution.take("mN")?,
            m_k: solution.take("mK")?,
            mb: solution.take("mb")?,
            m_t: solution.take("mT")?,
            r: solution.take("r")?,
            sigma: solution.take("sigma")?,
            lambda: solution.take("lambda")?,
            delta_v: solution.optional("delta_v"),
            w: solution.optional("w"),
            trace: solution.trace,
        };
        budget.check()?;
        info!("payload budget: m0 = {}, mN = {}", budget.m0, budget.m_n);
        Ok(budget)
    }

    pub fn trace(&self) -> &[Step] {
        &self.trace
    }

    fn check(&self) -> Result<(), BudgetError> {
        let masses = [
            ("m0", &self.m0),
            ("mN", &self.m_n),
            ("mK", &self.m_k),
            ("mb", &self.mb),
            ("mT", &self.m_t),
        ];
        for (name, mass) in masses {
            if mass.value.is_sign_negative() && !mass.value.is_zero() {
                return Err(BudgetError::InvalidBudget(format!(
                    "{name} is negative ({mass})"
                )));
            }
        }
        Ok(())
    }
}

/// A vehicle described by its launch mass, structure and engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleBudget {
    #[serde(default)]
    pub name: Option<String>,
    pub launch_mass_kg: Decimal,
    /// Structural mass over structural plus propellant mass.
    pub structural_ratio: Decimal,
    pub exhaust_velocity_km_s: Decimal,
}

impl VehicleBudget {
    /// Payload this vehicle can carry through a total velocity change.
    pub fn budget(&self, delta_v: Decimal) -> Result<PayloadBudget, BudgetError> {
        PayloadBudget::new(
            Knowns::new()
                .with("m0", self.launch_mass_kg)
                .with("sigma", self.structural_ratio)
                .with("w", self.exhaust_velocity_km_s)
                .with("delta_v", delta_v),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use orbital_core::numeric::to_f64;
    use rust_decimal_macros::dec;

    #[test]
    fn tables_are_consistent() {
        table(false).validate().unwrap();
        table(true).validate().unwrap();
    }

    #[test]
    fn ratios_from_masses() {
        let budget = PayloadBudget::new(
            Knowns::new()
                .with("mN", dec!(1000))
                .with("m0", dec!(100000))
                .with("mK", dec!(9900)),
        )
        .unwrap();
        assert_eq!(budget.mb.value, dec!(10900));
        assert_eq!(budget.m_t.value, dec!(89100));
        assert_relative_eq!(to_f64(budget.r.value), 100_000.0 / 10_900.0, max_relative = 1e-12);
        assert_eq!(budget.sigma.value, dec!(0.1));
        assert_eq!(budget.lambda.value, dec!(0.01));
        assert!(budget.delta_v.is_none());
    }

    #[test]
    fn rocket_equation_round_trip() {
        let budget = PayloadBudget::new(
            Knowns::new()
                .with("m0", dec!(100000))
                .with("mb", dec!(10000))
                .with("mK", dec!(5000))
                .with("w", dec!(4.4)),
        )
        .unwrap();
        let expected = 4.4 * 10f64.ln();
        assert_relative_eq!(to_f64(budget.delta_v.unwrap().value), expected, epsilon = 1e-9);
        assert_eq!(budget.m_n.value, dec!(5000));
    }

    #[test]
    fn vehicle_budget_for_mission_delta_v() {
        let vehicle = VehicleBudget {
            name: None,
            launch_mass_kg: dec!(500000),
            structural_ratio: dec!(0.1),
            exhaust_velocity_km_s: dec!(4.4),
        };
        let budget = vehicle.budget(dec!(6)).unwrap();
        let r = (6.0_f64 / 4.4).exp();
        assert_relative_eq!(to_f64(budget.r.value), r, max_relative = 1e-9);
        let mb = 500_000.0 / r;
        let mt = 500_000.0 - mb;
        let mk = 0.1 * mt / 0.9;
        assert_relative_eq!(to_f64(budget.m_k.value), mk, max_relative = 1e-9);
        assert_relative_eq!(to_f64(budget.m_n.value), mb - mk, max_relative = 1e-9);
    }

    #[test]
    fn excessive_delta_v_leaves_no_payload() {
        let vehicle = VehicleBudget {
            name: None,
            launch_mass_kg: dec!(500000),
            structural_ratio: dec!(0.1),
            exhaust_velocity_km_s: dec!(3),
        };
        let err = vehicle.budget(dec!(15)).unwrap_err();
        assert!(matches!(err, BudgetError::InvalidBudget(_)));
    }
}
