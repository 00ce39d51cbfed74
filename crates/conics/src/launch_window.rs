//! Launch opportunities recurring once per synodic period.

use chrono::{DateTime, TimeDelta, Utc};
use orbital_core::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchWindowError {
    #[error("synodic period must be positive, got {0}")]
    NonPositiveSynodicPeriod(TimeDelta),
    #[error("launch window {0} lies outside the supported date range")]
    OutOfRange(i64),
    #[error("duration of {0} s cannot be represented")]
    Duration(Decimal),
    #[error("launch windows need both a departure and a target body")]
    NoPhasing,
}

/// The `n`-th window opens at `reference_epoch + delta_t + n · synodic_period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchWindows {
    reference_epoch: DateTime<Utc>,
    delta_t: TimeDelta,
    synodic_period: TimeDelta,
}

impl LaunchWindows {
    pub fn new(
        reference_epoch: DateTime<Utc>,
        delta_t: TimeDelta,
        synodic_period: TimeDelta,
    ) -> Result<Self, LaunchWindowError> {
        if synodic_period <= TimeDelta::zero() {
            return Err(LaunchWindowError::NonPositiveSynodicPeriod(synodic_period));
        }
        Ok(Self {
            reference_epoch,
            delta_t,
            synodic_period,
        })
    }

    pub fn reference_epoch(&self) -> DateTime<Utc> {
        self.reference_epoch
    }

    pub fn delta_t(&self) -> TimeDelta {
        self.delta_t
    }

    pub fn synodic_period(&self) -> TimeDelta {
        self.synodic_period
    }

    /// Opening of window `n`; negative indices lie before the first window.
    pub fn nth(&self, n: i64) -> Result<DateTime<Utc>, LaunchWindowError> {
        let steps = i32::try_from(n).map_err(|_| LaunchWindowError::OutOfRange(n))?;
        self.synodic_period
            .checked_mul(steps)
            .and_then(|offset| offset.checked_add(&self.delta_t))
            .and_then(|offset| self.reference_epoch.checked_add_signed(offset))
            .ok_or(LaunchWindowError::OutOfRange(n))
    }

    /// The windows bracketing `date`: the last one opening at or before it and
    /// the first one opening after it.
    pub fn around(
        &self,
        date: DateTime<Utc>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), LaunchWindowError> {
        let mut n = 0;
        if self.nth(0)? > date {
            while self.nth(n - 1)? > date {
                n -= 1;
            }
        } else {
            while self.nth(n)? <= date {
                n += 1;
            }
        }
        Ok((self.nth(n - 1)?, self.nth(n)?))
    }

    /// The next `count` windows opening after `date`.
    pub fn upcoming(
        &self,
        date: DateTime<Utc>,
        count: usize,
    ) -> Result<Vec<DateTime<Utc>>, LaunchWindowError> {
        let (_, next) = self.around(date)?;
        (0..count as i64)
            .map(|k| {
                self.synodic_period
                    .checked_mul(k as i32)
                    .and_then(|offset| next.checked_add_signed(offset))
                    .ok_or(LaunchWindowError::OutOfRange(k))
            })
            .collect()
    }
}

/// Whole seconds of a decimal duration.
pub fn seconds(value: Decimal) -> Result<TimeDelta, LaunchWindowError> {
    value
        .round()
        .to_i64()
        .and_then(TimeDelta::try_seconds)
        .ok_or(LaunchWindowError::Duration(value))
}
