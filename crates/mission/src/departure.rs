//! Departure phase: leave the parking orbit around the origin body on the
//! escape hyperbola matching the first transfer burn.

use orbital_bodies::Body;
use orbital_conics::{Hyperbola, OrbitError, TransferEllipse};
use rust_decimal::Decimal;

pub fn plan_departure<'a>(
    origin: &'a Body,
    parking_altitude_km: Decimal,
    cruise: &TransferEllipse<'_>,
) -> Result<Hyperbola<'a>, OrbitError> {
    Hyperbola::from_parking_orbit(origin, parking_altitude_km, cruise.delta_v1.value.abs())
}
