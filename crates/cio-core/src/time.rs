//! Date helpers.
//!
//! Stored dates are plain seconds since the Unix epoch (`f64`), the same
//! representation preference stores use. The fraction is kept to the
//! microsecond when it fits in an `f64`, but callers should only rely on
//! whole seconds.

use chrono::{DateTime, TimeDelta, Utc};

/// Unit for [`DateTimeExt::add`] and [`DateTimeExt::subtract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// One second.
    Second,
    /// Sixty seconds.
    Minute,
    /// Sixty minutes.
    Hour,
    /// Twenty-four hours.
    Day,
}

impl TimeUnit {
    const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
        }
    }

    fn delta(self, amount: i64) -> Option<TimeDelta> {
        amount
            .checked_mul(self.seconds())
            .and_then(TimeDelta::try_seconds)
    }
}

/// Convenience operations on UTC timestamps.
pub trait DateTimeExt: Sized {
    /// Whole seconds since the Unix epoch; the fractional part is dropped.
    fn unix_time(&self) -> i64;

    /// Seconds since the Unix epoch with microsecond fraction.
    ///
    /// The whole second is always preserved: `floor` of the result equals
    /// [`unix_time`](Self::unix_time).
    fn seconds_since_epoch(&self) -> f64;

    /// Move forward by `amount` units, saturating at the representable range.
    #[must_use]
    fn add(&self, amount: i64, unit: TimeUnit) -> Self;

    /// Move backward by `amount` units, saturating at the representable range.
    #[must_use]
    fn subtract(&self, amount: i64, unit: TimeUnit) -> Self;

    /// `true` if this instant is before now.
    fn has_passed(&self) -> bool;

    /// `true` if this instant is before `other`.
    fn is_older_than(&self, other: &Self) -> bool;
}

impl DateTimeExt for DateTime<Utc> {
    fn unix_time(&self) -> i64 {
        self.timestamp()
    }

    #[allow(clippy::cast_precision_loss)]
    fn seconds_since_epoch(&self) -> f64 {
        let whole = self.timestamp() as f64;
        let seconds = whole + f64::from(self.timestamp_subsec_micros()) / 1e6;
        // Far from the epoch the fraction can round up into the next second.
        if seconds.floor() > whole { whole } else { seconds }
    }

    fn add(&self, amount: i64, unit: TimeUnit) -> Self {
        unit.delta(amount)
            .and_then(|delta| self.checked_add_signed(delta))
            .unwrap_or(if amount >= 0 {
                DateTime::<Utc>::MAX_UTC
            } else {
                DateTime::<Utc>::MIN_UTC
            })
    }

    fn subtract(&self, amount: i64, unit: TimeUnit) -> Self {
        unit.delta(amount)
            .and_then(|delta| self.checked_sub_signed(delta))
            .unwrap_or(if amount >= 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    fn has_passed(&self) -> bool {
        *self < Utc::now()
    }

    fn is_older_than(&self, other: &Self) -> bool {
        self < other
    }
}

/// Rebuild a timestamp from seconds since the Unix epoch.
///
/// Returns `None` for non-finite values and values outside chrono's range.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn from_seconds_since_epoch(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    // i64 holds every second chrono can represent; anything larger is rejected below.
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    let nanos = ((seconds - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}
