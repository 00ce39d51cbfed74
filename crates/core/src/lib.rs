//! Core units, constants, and shared primitives for the Orbital Calculator workspace.

pub mod numeric;
pub mod quantity;

pub use numeric::NumericError;
pub use quantity::Quantity;
pub use rust_decimal::Decimal;

/// Physical and numerical constants (km, s, degrees unless stated otherwise).
pub mod constants {
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Decimal places every derived eccentricity is rounded to before reuse.
    ///
    /// Chained derivations otherwise carry the noise of the `f64` round trip
    /// through every later formula that consumes the eccentricity.
    pub const EPSILON_PRECISION: u32 = 12;
    /// Decimal places used when a quantity is displayed.
    pub const OUTPUT_DECIMAL_POINTS: usize = 3;
    /// J2000 reference epoch (2000-01-01T12:00:00Z) as Unix seconds.
    pub const J2000_UNIX_SECONDS: i64 = 946_728_000;
}

/// Unit strings attached to quantities. Units are documentation only.
pub mod units {
    pub const KM: &str = "km";
    pub const KM_S: &str = "km/s";
    pub const KM3_S2: &str = "km³/s²";
    pub const SECONDS: &str = "s";
    pub const DEGREES: &str = "°";
    pub const KG: &str = "kg";
    pub const DIMENSIONLESS: &str = "";
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use rust_decimal::Decimal;

    use super::constants::SECONDS_PER_DAY;
    use crate::NumericError;

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Exact decimal variant of [`days_to_seconds`].
    #[inline]
    pub fn days_to_seconds_decimal(days: Decimal) -> Result<Decimal, NumericError> {
        crate::numeric::mul(days, Decimal::from(86_400))
    }
}
