use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::constants::OUTPUT_DECIMAL_POINTS;

/// A decimal value tagged with the unit its producing formula declares.
///
/// Units are not checked; arithmetic happens on [`Quantity::value`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    pub value: Decimal,
    pub unit: &'static str,
}

impl Quantity {
    pub const fn new(value: Decimal, unit: &'static str) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(OUTPUT_DECIMAL_POINTS);
        if self.unit.is_empty() {
            write!(f, "{:.*}", precision, self.value)
        } else {
            write!(f, "{:.*} {}", precision, self.value, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_uses_three_decimals_and_unit() {
        assert_eq!(Quantity::new(dec!(6578), "km").to_string(), "6578.000 km");
        assert_eq!(Quantity::new(dec!(0.73043), "").to_string(), "0.730");
        assert_eq!(format!("{:.1}", Quantity::new(dec!(7.7843), "km/s")), "7.8 km/s");
    }
}
