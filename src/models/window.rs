//! Time window and date range primitives.
//!
//! All values are studio-local wall-clock times. Conversion from stored
//! UTC instants happens in [`BusinessClock`](crate::business_day::BusinessClock).
//!
//! # Interval Semantics
//! Both [`TimeWindow`] and [`DateRange`] are half-open: the start is
//! included, the end is excluded. Two windows that only touch do not
//! overlap, so back-to-back bookings never conflict.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// A local time interval [start, end).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// No ordering is enforced; an inverted window is simply empty.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Creates a window from an anchor and minute offsets.
    ///
    /// Offsets may exceed 1440 to reach into the next calendar day.
    pub fn from_offsets(anchor: NaiveDateTime, start_minutes: i64, end_minutes: i64) -> Self {
        Self {
            start: anchor + TimeDelta::minutes(start_minutes),
            end: anchor + TimeDelta::minutes(end_minutes),
        }
    }

    /// Whether the window has no positive width.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Width in whole minutes, floored at 0.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }

    /// Whether an instant falls within this window.
    #[inline]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at < self.end
    }

    /// Whether `other` lies completely inside this window.
    pub fn covers(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The common part of two windows, if it has positive width.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Minutes shared by two windows (0 when disjoint).
    pub fn overlap_minutes(&self, other: &Self) -> i64 {
        self.intersect(other)
            .map(|w| w.duration_minutes())
            .unwrap_or(0)
    }
}

/// A range of calendar dates [start, end).
///
/// Used for every aggregation period: a week, a month, or any
/// caller-selected span.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateRange {
    /// First date (inclusive).
    pub start: NaiveDate,
    /// Date after the last one (exclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates a range of `days` dates starting at `start`.
    pub fn days_from(start: NaiveDate, days: u64) -> Self {
        Self {
            start,
            end: start.checked_add_days(Days::new(days)).unwrap_or(start),
        }
    }

    /// Number of dates in the range (0 when inverted).
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }

    /// Whether the range contains no dates.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether a date falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Iterates over every date in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }

    /// The range as a wall-clock window from first midnight to last midnight.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(
            self.start.and_time(NaiveTime::MIN),
            self.end.and_time(NaiveTime::MIN),
        )
    }
}
