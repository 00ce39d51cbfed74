//! Physical data for the Sun and the planets.
//!
//! The built-in catalog is immutable and shared process-wide. A [`Catalog`]
//! layers bodies loaded from configuration on top of it.

mod catalog;

use chrono::{DateTime, TimeDelta, Utc};
use orbital_core::constants::J2000_UNIX_SECONDS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{Catalog, builtin, lookup};

/// A central or orbiting body. Fields that do not apply (the Sun has no
/// heliocentric orbit) are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    #[serde(default = "unknown")]
    pub mass_kg: f64,
    pub mu_km3_s2: f64,
    #[serde(default = "unknown")]
    pub semi_major_axis_km: f64,
    pub radius_km: f64,
    #[serde(default = "unknown")]
    pub mean_speed_km_s: f64,
    /// Mean longitude at the reference epoch.
    #[serde(default = "unknown")]
    pub mean_longitude_deg: f64,
    #[serde(default = "j2000")]
    pub reference_epoch: DateTime<Utc>,
    #[serde(default = "unknown")]
    pub orbital_period_days: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown body `{0}`")]
pub struct UnknownBodyError(pub String);

impl Body {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: &str,
        mass_kg: f64,
        mu_km3_s2: f64,
        semi_major_axis_km: f64,
        radius_km: f64,
        mean_speed_km_s: f64,
        mean_longitude_deg: f64,
        orbital_period_days: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            mass_kg,
            mu_km3_s2,
            semi_major_axis_km,
            radius_km,
            mean_speed_km_s,
            mean_longitude_deg,
            reference_epoch: j2000(),
            orbital_period_days,
        }
    }

    pub fn mu(&self) -> Option<f64> {
        known(self.mu_km3_s2)
    }

    pub fn radius(&self) -> Option<f64> {
        known(self.radius_km)
    }

    pub fn semi_major_axis(&self) -> Option<f64> {
        known(self.semi_major_axis_km)
    }

    pub fn mean_longitude(&self) -> Option<f64> {
        known(self.mean_longitude_deg)
    }

    pub fn orbital_period(&self) -> Option<f64> {
        known(self.orbital_period_days)
    }

    /// Whether the body has the heliocentric elements a transfer endpoint needs.
    pub fn is_orbiting(&self) -> bool {
        self.semi_major_axis().is_some()
            && self.orbital_period().is_some()
            && self.mean_longitude().is_some()
    }
}

/// The J2000 epoch, 2000-01-01 12:00 UTC.
pub fn j2000() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::seconds(J2000_UNIX_SECONDS)
}

fn unknown() -> f64 {
    f64::NAN
}

fn known(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
