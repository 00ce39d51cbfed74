//! Ascent from the surface into a circular parking orbit.

use orbital_bodies::Body;
use orbital_conics::{Ellipse, OrbitError};
use orbital_core::Quantity;
use orbital_core::numeric::add;
use orbital_core::units::KM_S;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AscentPlan<'a> {
    pub parking_orbit: Ellipse<'a>,
    pub orbital_speed: Quantity,
    pub losses: Quantity,
    pub delta_v: Quantity,
}

/// Orbital speed of the parking orbit plus gravity and drag losses.
pub fn plan_ascent(
    origin: &Body,
    altitude_km: Decimal,
    losses_km_s: Decimal,
) -> Result<AscentPlan<'_>, OrbitError> {
    let parking_orbit = Ellipse::circular(origin, altitude_km)?;
    let orbital_speed = parking_orbit.vp;
    Ok(AscentPlan {
        parking_orbit,
        orbital_speed,
        losses: Quantity::new(losses_km_s, KM_S),
        delta_v: Quantity::new(add(orbital_speed.value, losses_km_s)?, KM_S),
    })
}
