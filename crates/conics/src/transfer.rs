//! Transfer ellipses between two circular, coplanar orbits.
//!
//! Departure is always tangential: an outward transfer leaves from the
//! periapsis, an inward transfer from the apoapsis. The arrival may cut the
//! target orbit at any true anomaly; a Hohmann transfer arrives at the
//! opposite apsis.

use std::f64::consts::PI;
use std::sync::LazyLock;

use log::{debug, info};
use orbital_bodies::Body;
use orbital_core::time::{days_to_seconds, seconds_to_days};
use orbital_core::numeric::{
    self, acos_deg, add, cos_deg, div, from_f64, mul, normalize_degrees, sin_deg, sqrt, sub,
};
use orbital_core::units::{DEGREES, DIMENSIONLESS, KM, KM_S, SECONDS};
use orbital_core::{Decimal, Quantity};
use orbital_solver::{Derivation, Derived, FormulaTable, Knowns, Params, Solution, Step, solve};
use serde::Serialize;

use crate::OrbitError;
use crate::common::{circular_speed, vis_viva};
use crate::ellipse::{self, check_closed};
use crate::formula::{
    body_name, eccentricity, float, from_float, optional_body_name, seed, some, when_inward,
};
use crate::launch_window::{self, LaunchWindowError, LaunchWindows};

const HALF_TURN: Decimal = Decimal::from_parts(180, 0, 0, false, 0);
const FULL_TURN: Decimal = Decimal::from_parts(360, 0, 0, false, 0);

/// Parameters fixed by the departure orbit, declared ahead of the ellipse so
/// that the tangential departure outranks the generic radius formulas.
fn departure() -> FormulaTable {
    FormulaTable::new()
        .param(
            "inward",
            DIMENSIONLESS,
            "1 when the target orbit lies inside the departure orbit",
            [Derivation::new("inward = r_target < r_start", &["r_start", "r_target"], inward_from_radii)],
        )
        .param("r_start", KM, "radius of the departure orbit", [])
        .param("r_target", KM, "radius of the target orbit", [])
        .param(
            "ra",
            KM,
            "apoapsis radius",
            [Derivation::new("ra = r_start (inward)", &["inward", "r_start"], ra_from_start)],
        )
        .param(
            "rp",
            KM,
            "periapsis radius",
            [Derivation::new("rp = r_start (outward)", &["inward", "r_start"], rp_from_start)],
        )
}

fn arrival() -> FormulaTable {
    FormulaTable::new()
        .param(
            "epsilon",
            DIMENSIONLESS,
            "numerical eccentricity",
            [
                Derivation::new(
                    "ε = (r_target − r_start) / (r_start − r_target cos φ) (outward)",
                    &["inward", "r_start", "r_target", "phi_arrival"],
                    epsilon_from_arrival_outward,
                ),
                Derivation::new(
                    "ε = (r_start − r_target) / (r_start + r_target cos φ) (inward)",
                    &["inward", "r_start", "r_target", "phi_arrival"],
                    epsilon_from_arrival_inward,
                ),
            ],
        )
        .param(
            "phi_arrival",
            DEGREES,
            "true anomaly at which the target orbit is reached",
            [Derivation::new(
                "cos φ = (p / r_target − 1) / ε",
                &["p", "epsilon", "r_target", "inward"],
                phi_from_orbit_equation,
            )],
        )
        .param(
            "transfer_angle",
            DEGREES,
            "angle swept between departure and arrival",
            [Derivation::new("Δφ = φ − φ_start", &["phi_arrival", "inward"], transfer_angle)],
        )
        .param(
            "transfer_time",
            SECONDS,
            "time of flight",
            [Derivation::new(
                "t = √(a³/mu)(E − ε sin E)",
                &["mu", "a", "epsilon", "phi_arrival", "inward"],
                transfer_time,
            )],
        )
        .param(
            "vk_start",
            KM_S,
            "circular speed on the departure orbit",
            [Derivation::new("vk = √(mu / r_start)", &["mu", "r_start"], vk_start)],
        )
        .param(
            "vk_target",
            KM_S,
            "circular speed on the target orbit",
            [Derivation::new("vk = √(mu / r_target)", &["mu", "r_target"], vk_target)],
        )
        .param(
            "v_arrival",
            KM_S,
            "speed on the transfer ellipse at the target radius",
            [Derivation::new("v = √(mu (2/r − 1/a))", &["mu", "r_target", "a"], v_arrival)],
        )
        .param(
            "flight_path_angle",
            DEGREES,
            "angle between the arrival velocity and the local horizontal",
            [Derivation::new(
                "tan γ = ε sin φ / (1 + ε cos φ)",
                &["epsilon", "phi_arrival"],
                flight_path_angle,
            )],
        )
        .param(
            "delta_v1",
            KM_S,
            "departure burn",
            [
                Derivation::new("Δv1 = vp − vk_start", &["inward", "vp", "vk_start"], delta_v1_outward),
                Derivation::new("Δv1 = va − vk_start", &["inward", "va", "vk_start"], delta_v1_inward),
            ],
        )
        .param(
            "delta_v2",
            KM_S,
            "arrival burn, negative when braking",
            [Derivation::new(
                "Δv2² = v² + vk² − 2 v vk cos γ",
                &["inward", "v_arrival", "vk_target", "flight_path_angle"],
                delta_v2_law_of_cosines,
            )],
        )
        .param(
            "v_total",
            KM_S,
            "sum of both burn magnitudes",
            [Derivation::new("Σ = |Δv1| + |Δv2|", &["delta_v1", "delta_v2"], v_total)],
        )
}

fn hohmann() -> FormulaTable {
    FormulaTable::new()
        .param(
            "r_start",
            KM,
            "radius of the departure orbit",
            [
                Derivation::new("r_start = rp (outward)", &["inward", "rp"], start_from_rp),
                Derivation::new("r_start = ra (inward)", &["inward", "ra"], start_from_ra),
            ],
        )
        .param(
            "r_target",
            KM,
            "radius of the target orbit",
            [
                Derivation::new("r_target = ra (outward)", &["inward", "ra"], target_from_ra),
                Derivation::new("r_target = rp (inward)", &["inward", "rp"], target_from_rp),
            ],
        )
        .param(
            "ra",
            KM,
            "apoapsis radius",
            [Derivation::new("ra = r_target (outward)", &["inward", "r_target"], ra_from_target)],
        )
        .param(
            "rp",
            KM,
            "periapsis radius",
            [Derivation::new("rp = r_target (inward)", &["inward", "r_target"], rp_from_target)],
        )
        .param(
            "phi_arrival",
            DEGREES,
            "true anomaly at which the target orbit is reached",
            [Derivation::new("φ = opposite apsis", &["inward"], phi_opposite_apsis)],
        )
        .param(
            "delta_v2",
            KM_S,
            "arrival burn, negative when braking",
            [
                Derivation::new("Δv2 = vk_target − va", &["inward", "vk_target", "va"], delta_v2_at_apoapsis),
                Derivation::new("Δv2 = vk_target − vp", &["inward", "vk_target", "vp"], delta_v2_at_periapsis),
            ],
        )
}

/// Phasing between two planets moving on circular orbits with known mean
/// longitudes at the reference epoch.
fn phasing() -> FormulaTable {
    FormulaTable::new()
        .param("period_start", SECONDS, "orbital period of the departure body", [])
        .param("period_target", SECONDS, "orbital period of the target body", [])
        .param("longitude_start", DEGREES, "mean longitude of the departure body at the epoch", [])
        .param("longitude_target", DEGREES, "mean longitude of the target body at the epoch", [])
        .param(
            "phase_angle",
            DEGREES,
            "required lead of the target over the departure body at launch",
            [Derivation::new(
                "ψ = Δφ − 360° t / T_target",
                &["transfer_angle", "transfer_time", "period_target"],
                phase_angle,
            )],
        )
        .param(
            "synodic_period",
            SECONDS,
            "time between identical constellations",
            [Derivation::new(
                "S = 1 / |1/T1 − 1/T2|",
                &["period_start", "period_target"],
                synodic_period,
            )],
        )
        .param(
            "delta_t",
            SECONDS,
            "time from the epoch to the first launch constellation",
            [Derivation::new(
                "Δt = first t with L_target(t) − L_start(t) = ψ",
                &[
                    "phase_angle",
                    "longitude_start",
                    "longitude_target",
                    "period_start",
                    "period_target",
                    "synodic_period",
                ],
                delta_t,
            )],
        )
}

static TRANSFER: LazyLock<FormulaTable> = LazyLock::new(|| {
    FormulaTable::merge(
        &FormulaTable::merge(&departure(), ellipse::table()),
        &arrival(),
    )
});
static TRANSFER_PHASED: LazyLock<FormulaTable> =
    LazyLock::new(|| FormulaTable::merge(&TRANSFER, &phasing()));
static HOHMANN: LazyLock<FormulaTable> =
    LazyLock::new(|| FormulaTable::merge(&TRANSFER, &hohmann()));
static HOHMANN_PHASED: LazyLock<FormulaTable> =
    LazyLock::new(|| FormulaTable::merge(&HOHMANN, &phasing()));

/// Formula table for a transfer of the given kind, with or without phasing.
pub fn table(kind: TransferKind, phased: bool) -> &'static FormulaTable {
    match (kind, phased) {
        (TransferKind::General, false) => &TRANSFER,
        (TransferKind::General, true) => &TRANSFER_PHASED,
        (TransferKind::Hohmann, false) => &HOHMANN,
        (TransferKind::Hohmann, true) => &HOHMANN_PHASED,
    }
}

fn inward_from_radii(p: &Params) -> Derived {
    let inward = p.value("r_target")? < p.value("r_start")?;
    some(Direction::from_flag(inward).flag())
}

fn ra_from_start(p: &Params) -> Derived {
    when_inward(p, true, || p.value("r_start"))
}

fn rp_from_start(p: &Params) -> Derived {
    when_inward(p, false, || p.value("r_start"))
}

fn phi_from_orbit_equation(p: &Params) -> Derived {
    let epsilon = p.value("epsilon")?;
    if epsilon.is_zero() {
        return Ok(None);
    }
    let cos = div(sub(div(p.value("p")?, p.value("r_target")?)?, Decimal::ONE)?, epsilon)?;
    let phi = acos_deg(cos)?;
    if p.flag("inward")? {
        some(sub(FULL_TURN, phi)?)
    } else {
        some(phi)
    }
}

/// Tangential departure from the periapsis `r_start` meeting `r_target` at `φ`.
fn epsilon_from_arrival_outward(p: &Params) -> Derived {
    if p.flag("inward")? {
        return Ok(None);
    }
    let start = p.value("r_start")?;
    let target = p.value("r_target")?;
    let cos = from_f64(cos_deg(p.value("phi_arrival")?))?;
    eccentricity(div(sub(target, start)?, sub(start, mul(target, cos)?)?)?)
}

/// Tangential departure from the apoapsis `r_start` meeting `r_target` at `φ`.
fn epsilon_from_arrival_inward(p: &Params) -> Derived {
    if !p.flag("inward")? {
        return Ok(None);
    }
    let start = p.value("r_start")?;
    let target = p.value("r_target")?;
    let cos = from_f64(cos_deg(p.value("phi_arrival")?))?;
    eccentricity(div(sub(start, target)?, add(start, mul(target, cos)?)?)?)
}

fn transfer_angle(p: &Params) -> Derived {
    let phi = p.value("phi_arrival")?;
    if p.flag("inward")? {
        some(sub(phi, HALF_TURN)?)
    } else {
        some(phi)
    }
}

/// Kepler's equation from periapsis, with the eccentric anomaly in closed form.
fn transfer_time(p: &Params) -> Derived {
    let mu = float(p, "mu")?;
    let a = float(p, "a")?;
    let epsilon = float(p, "epsilon")?;
    let half_phi = numeric::deg_to_rad(float(p, "phi_arrival")? / 2.0);
    let eccentric = 2.0
        * ((1.0 - epsilon).sqrt() * half_phi.sin()).atan2((1.0 + epsilon).sqrt() * half_phi.cos());
    let scale = (a.powi(3) / mu).sqrt();
    let mut time = scale * (eccentric - epsilon * eccentric.sin());
    if p.flag("inward")? {
        // inward legs start at the apoapsis, half a period after periapsis
        time -= PI * scale;
    }
    from_float(time)
}

fn vk_start(p: &Params) -> Derived {
    some(circular_speed(p.value("mu")?, p.value("r_start")?)?)
}

fn vk_target(p: &Params) -> Derived {
    some(circular_speed(p.value("mu")?, p.value("r_target")?)?)
}

fn v_arrival(p: &Params) -> Derived {
    some(vis_viva(p.value("mu")?, p.value("r_target")?, p.value("a")?)?)
}

fn flight_path_angle(p: &Params) -> Derived {
    let epsilon = float(p, "epsilon")?;
    let phi = p.value("phi_arrival")?;
    let gamma = (epsilon * sin_deg(phi)).atan2(1.0 + epsilon * cos_deg(phi));
    from_float(numeric::rad_to_deg(gamma))
}

fn delta_v1_outward(p: &Params) -> Derived {
    when_inward(p, false, || Ok(sub(p.value("vp")?, p.value("vk_start")?)?))
}

fn delta_v1_inward(p: &Params) -> Derived {
    when_inward(p, true, || Ok(sub(p.value("va")?, p.value("vk_start")?)?))
}

fn delta_v2_law_of_cosines(p: &Params) -> Derived {
    let v = p.value("v_arrival")?;
    let vk = p.value("vk_target")?;
    let cos_gamma = from_f64(cos_deg(p.value("flight_path_angle")?))?;
    let squared = sub(
        add(mul(v, v)?, mul(vk, vk)?)?,
        mul(Decimal::TWO, mul(mul(v, vk)?, cos_gamma)?)?,
    )?;
    let magnitude = sqrt(squared.max(Decimal::ZERO))?;
    if p.flag("inward")? {
        some(-magnitude)
    } else {
        some(magnitude)
    }
}

fn v_total(p: &Params) -> Derived {
    some(add(p.value("delta_v1")?.abs(), p.value("delta_v2")?.abs())?)
}

fn start_from_rp(p: &Params) -> Derived {
    when_inward(p, false, || p.value("rp"))
}

fn start_from_ra(p: &Params) -> Derived {
    when_inward(p, true, || p.value("ra"))
}

fn target_from_ra(p: &Params) -> Derived {
    when_inward(p, false, || p.value("ra"))
}

fn target_from_rp(p: &Params) -> Derived {
    when_inward(p, true, || p.value("rp"))
}

fn ra_from_target(p: &Params) -> Derived {
    when_inward(p, false, || p.value("r_target"))
}

fn rp_from_target(p: &Params) -> Derived {
    when_inward(p, true, || p.value("r_target"))
}

fn phi_opposite_apsis(p: &Params) -> Derived {
    some(Direction::from_flag(p.flag("inward")?).hohmann_arrival())
}

fn delta_v2_at_apoapsis(p: &Params) -> Derived {
    when_inward(p, false, || Ok(sub(p.value("vk_target")?, p.value("va")?)?))
}

fn delta_v2_at_periapsis(p: &Params) -> Derived {
    when_inward(p, true, || Ok(sub(p.value("vk_target")?, p.value("vp")?)?))
}

fn phase_angle(p: &Params) -> Derived {
    let travelled = div(
        mul(FULL_TURN, p.value("transfer_time")?)?,
        p.value("period_target")?,
    )?;
    some(normalize_degrees(sub(p.value("transfer_angle")?, travelled)?))
}

fn synodic_period(p: &Params) -> Derived {
    let start = float(p, "period_start")?;
    let target = float(p, "period_target")?;
    from_float(1.0 / (1.0 / start - 1.0 / target).abs())
}

/// The target leads the start by `L_target − L_start` at the epoch; the lead
/// then changes by one full turn per synodic period, growing when the target
/// is the faster body.
fn delta_t(p: &Params) -> Derived {
    let lead = sub(p.value("longitude_target")?, p.value("longitude_start")?)?;
    let phase = p.value("phase_angle")?;
    let target_faster = p.value("period_target")? < p.value("period_start")?;
    let remaining = if target_faster {
        normalize_degrees(sub(phase, lead)?)
    } else {
        normalize_degrees(sub(lead, phase)?)
    };
    some(div(mul(remaining, p.value("synodic_period")?)?, FULL_TURN)?)
}

/// Whether the transfer heads away from or towards the central body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Outward,
    Inward,
}

impl Direction {
    pub fn from_radii(start: Decimal, target: Decimal) -> Self {
        Self::from_flag(target < start)
    }

    fn from_flag(inward: bool) -> Self {
        if inward {
            Direction::Inward
        } else {
            Direction::Outward
        }
    }

    pub fn flag(self) -> Decimal {
        match self {
            Direction::Outward => Decimal::ZERO,
            Direction::Inward => Decimal::ONE,
        }
    }

    /// True anomaly of the apsis opposite the departure point.
    pub fn hohmann_arrival(self) -> Decimal {
        match self {
            Direction::Outward => HALF_TURN,
            Direction::Inward => FULL_TURN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    General,
    Hohmann,
}

/// Phasing of a transfer between two catalogued planets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Phasing {
    pub period_start: Quantity,
    pub period_target: Quantity,
    pub longitude_start: Quantity,
    pub longitude_target: Quantity,
    pub phase_angle: Quantity,
    pub synodic_period: Quantity,
    pub delta_t: Quantity,
}

impl Phasing {
    fn take(solution: &Solution) -> Result<Self, OrbitError> {
        Ok(Self {
            period_start: solution.take("period_start")?,
            period_target: solution.take("period_target")?,
            longitude_start: solution.take("longitude_start")?,
            longitude_target: solution.take("longitude_target")?,
            phase_angle: solution.take("phase_angle")?,
            synodic_period: solution.take("synodic_period")?,
            delta_t: solution.take("delta_t")?,
        })
    }
}

/// A transfer ellipse around `central`, optionally anchored to a departure
/// and a target body.
#[derive(Debug, Clone, Serialize)]
pub struct TransferEllipse<'a> {
    pub kind: TransferKind,
    #[serde(serialize_with = "body_name")]
    pub central: &'a Body,
    #[serde(serialize_with = "optional_body_name")]
    pub start: Option<&'a Body>,
    #[serde(serialize_with = "optional_body_name")]
    pub target: Option<&'a Body>,
    pub direction: Direction,
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
    pub r_start: Quantity,
    pub r_target: Quantity,
    pub phi_arrival: Quantity,
    pub transfer_angle: Quantity,
    pub transfer_time: Quantity,
    pub vk_start: Quantity,
    pub vk_target: Quantity,
    pub v_arrival: Quantity,
    pub flight_path_angle: Quantity,
    pub delta_v1: Quantity,
    pub delta_v2: Quantity,
    pub v_total: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phasing: Option<Phasing>,
    #[serde(skip)]
    trace: Vec<Step>,
}

impl<'a> TransferEllipse<'a> {
    /// General transfer. The shape comes from the knowns (typically `epsilon`
    /// or `p` next to the two radii); radii default to the semi-major axes of
    /// `start` and `target`.
    pub fn new(
        central: &'a Body,
        start: Option<&'a Body>,
        target: Option<&'a Body>,
        knowns: Knowns,
    ) -> Result<Self, OrbitError> {
        Self::build(TransferKind::General, central, start, target, knowns)
    }

    /// Hohmann transfer: arrival at the apsis opposite the departure point.
    pub fn hohmann(
        central: &'a Body,
        start: Option<&'a Body>,
        target: Option<&'a Body>,
        knowns: Knowns,
    ) -> Result<Self, OrbitError> {
        Self::build(TransferKind::Hohmann, central, start, target, knowns)
    }

    fn build(
        kind: TransferKind,
        central: &'a Body,
        start: Option<&'a Body>,
        target: Option<&'a Body>,
        mut knowns: Knowns,
    ) -> Result<Self, OrbitError> {
        seed(&mut knowns, "mu", central.mu())?;
        if let Some(start) = start {
            seed(&mut knowns, "r_start", start.semi_major_axis())?;
        }
        if let Some(target) = target {
            seed(&mut knowns, "r_target", target.semi_major_axis())?;
        }

        let phased = match (start, target) {
            (Some(start), Some(target)) if start.is_orbiting() && target.is_orbiting() => {
                seed(&mut knowns, "period_start", start.orbital_period().map(days_to_seconds))?;
                seed(&mut knowns, "period_target", target.orbital_period().map(days_to_seconds))?;
                seed(&mut knowns, "longitude_start", start.mean_longitude())?;
                seed(&mut knowns, "longitude_target", target.mean_longitude())?;
                true
            }
            _ => false,
        };

        if kind == TransferKind::Hohmann {
            if let Some(direction) = known_direction(&knowns) {
                knowns.seed("inward", direction.flag());
                knowns.seed("phi_arrival", direction.hohmann_arrival());
            }
        }

        let table = table(kind, phased);
        debug!("solving {kind:?} transfer over {} parameters", table.len());
        let given = knowns.resolve(table)?;
        let solution = solve(table, given)?;
        let direction = Direction::from_flag(!solution.take("inward")?.value.is_zero());
        let transfer = Self {
            kind,
            central,
            start,
            target,
            direction,
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
            r_start: solution.take("r_start")?,
            r_target: solution.take("r_target")?,
            phi_arrival: solution.take("phi_arrival")?,
            transfer_angle: solution.take("transfer_angle")?,
            transfer_time: solution.take("transfer_time")?,
            vk_start: solution.take("vk_start")?,
            vk_target: solution.take("vk_target")?,
            v_arrival: solution.take("v_arrival")?,
            flight_path_angle: solution.take("flight_path_angle")?,
            delta_v1: solution.take("delta_v1")?,
            delta_v2: solution.take("delta_v2")?,
            v_total: solution.take("v_total")?,
            phasing: if phased {
                Some(Phasing::take(&solution)?)
            } else {
                None
            },
            trace: solution.trace,
        };
        transfer.check()?;
        info!(
            "{:?} transfer: Δv1 = {}, Δv2 = {}, t = {:.1} d",
            kind,
            transfer.delta_v1,
            transfer.delta_v2,
            transfer.transfer_days()
        );
        Ok(transfer)
    }

    pub fn trace(&self) -> &[Step] {
        &self.trace
    }

    /// Time of flight in days.
    pub fn transfer_days(&self) -> f64 {
        seconds_to_days(numeric::to_f64(self.transfer_time.value))
    }

    /// Launch opportunities, counted from the departure body's reference epoch.
    pub fn launch_windows(&self) -> Result<LaunchWindows, LaunchWindowError> {
        let (Some(phasing), Some(start)) = (&self.phasing, self.start) else {
            return Err(LaunchWindowError::NoPhasing);
        };
        LaunchWindows::new(
            start.reference_epoch,
            launch_window::seconds(phasing.delta_t.value)?,
            launch_window::seconds(phasing.synodic_period.value)?,
        )
    }

    fn check(&self) -> Result<(), OrbitError> {
        check_closed(&self.epsilon, &self.rp, &self.ra)?;
        let tolerance = mul(self.ra.value, Decimal::new(1, 9))?;
        if self.r_target.value < sub(self.rp.value, tolerance)?
            || self.r_target.value > add(self.ra.value, tolerance)?
        {
            return Err(OrbitError::InvalidGeometry(format!(
                "target radius {} is not reached between {} and {}",
                self.r_target, self.rp, self.ra
            )));
        }
        if self.transfer_time.value <= Decimal::ZERO {
            return Err(OrbitError::InvalidGeometry(format!(
                "time of flight {} must be positive",
                self.transfer_time
            )));
        }
        Ok(())
    }
}

fn known_direction(knowns: &Knowns) -> Option<Direction> {
    if let Some(flag) = knowns.get("inward") {
        return Some(Direction::from_flag(!flag.is_zero()));
    }
    Some(Direction::from_radii(
        knowns.get("r_start")?,
        knowns.get("r_target")?,
    ))
}
