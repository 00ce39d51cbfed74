//! Arrival phase: brake from the approach hyperbola into the destination's
//! parking orbit. The excess speed is the mismatch left by the second
//! transfer burn.

use orbital_bodies::Body;
use orbital_conics::{Hyperbola, OrbitError, TransferEllipse};
use rust_decimal::Decimal;

pub fn plan_arrival<'a>(
    destination: &'a Body,
    parking_altitude_km: Decimal,
    cruise: &TransferEllipse<'_>,
) -> Result<Hyperbola<'a>, OrbitError> {
    Hyperbola::from_parking_orbit(
        destination,
        parking_altitude_km,
        cruise.delta_v2.value.abs(),
    )
}
