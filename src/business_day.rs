//! Business-day resolution.
//!
//! Venues that stay open past midnight attribute late-night hours to the
//! previous day: with a 04:00 cutoff, 01:30 on Tuesday belongs to Monday's
//! business day and is evaluated against Monday's opening hours.
//!
//! # Rule
//! An instant whose local hour is strictly less than the cutoff belongs to
//! the previous calendar date. Resolution is total: it never fails for any
//! representable instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{BookingError, Result};

/// Cutoff hour used when a studio has none configured.
pub const DEFAULT_CUTOFF_HOUR: u8 = 4;

/// Hour (0-23) before which instants belong to the previous business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct CutoffHour(u8);

impl CutoffHour {
    /// Midnight cutoff: business days equal calendar days.
    pub const MIDNIGHT: CutoffHour = CutoffHour(0);

    /// Creates a cutoff, rejecting values outside 0-23.
    pub fn new(hour: i64) -> Result<Self> {
        u8::try_from(hour)
            .ok()
            .filter(|h| *h < 24)
            .map(Self)
            .ok_or(BookingError::InvalidCutoffHour(hour))
    }

    /// Creates a cutoff from a stored setting, using the default when out of range.
    pub fn from_setting(hour: i64) -> Self {
        Self::new(hour).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to cutoff hour {DEFAULT_CUTOFF_HOUR}");
            Self::default()
        })
    }

    /// The hour value.
    #[inline]
    pub fn hour(&self) -> u32 {
        u32::from(self.0)
    }
}

impl Default for CutoffHour {
    fn default() -> Self {
        Self(DEFAULT_CUTOFF_HOUR)
    }
}

impl TryFrom<i64> for CutoffHour {
    type Error = BookingError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CutoffHour> for u8 {
    fn from(value: CutoffHour) -> Self {
        value.0
    }
}

/// Business day of a local wall-clock instant.
pub fn business_day_start(instant: NaiveDateTime, cutoff: CutoffHour) -> NaiveDate {
    let date = instant.date();
    if instant.hour() < cutoff.hour() {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Midnight of a business day; the anchor for minute offsets.
#[inline]
pub fn day_anchor(business_day: NaiveDate) -> NaiveDateTime {
    business_day.and_time(NaiveTime::MIN)
}

/// Studio-local clock: timezone plus business-day cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessClock {
    /// Studio timezone.
    pub timezone: Tz,
    /// Business-day cutoff.
    pub cutoff: CutoffHour,
}

impl BusinessClock {
    /// Creates a clock.
    pub fn new(timezone: Tz, cutoff: CutoffHour) -> Self {
        Self { timezone, cutoff }
    }

    /// A UTC clock with the given cutoff.
    pub fn utc(cutoff: CutoffHour) -> Self {
        Self::new(chrono_tz::UTC, cutoff)
    }

    /// Creates a clock from an IANA timezone name.
    pub fn from_name(timezone: &str, cutoff: CutoffHour) -> Result<Self> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| BookingError::UnknownTimezone(timezone.to_string()))?;
        Ok(Self::new(tz, cutoff))
    }

    /// Studio-local wall clock of a stored instant.
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.timezone).naive_local()
    }

    /// Stored instant of a local wall-clock value.
    ///
    /// Ambiguous values take the earliest offset. Values inside a DST gap
    /// are read as UTC.
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        local
            .and_local_timezone(self.timezone)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| {
                warn!(%local, tz = %self.timezone, "local time falls in a DST gap, reading as UTC");
                local.and_utc()
            })
    }

    /// Business day of a stored instant.
    pub fn business_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        business_day_start(self.to_local(instant), self.cutoff)
    }

    /// Business day of a local wall-clock value.
    pub fn business_day_of_local(&self, local: NaiveDateTime) -> NaiveDate {
        business_day_start(local, self.cutoff)
    }
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self::utc(CutoffHour::default())
    }
}
