//! Availability checking.
//!
//! A requested range is bookable iff:
//! - it has positive width, AND
//! - its business day (resolved from the start) is open, AND
//! - it lies inside that business day's open window, AND
//! - it overlaps no blocking interval of the room.
//!
//! Overlap is the half-open test `block.start < end && block.end > start`,
//! so a booking may start exactly when another ends.
//!
//! The check is O(blocks). Callers pre-filter blocks to a bounded date
//! window and to the room in question.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::business_day::{business_day_start, CutoffHour};
use crate::models::{OpeningHours, TimeWindow};

/// Outcome of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// The range can be booked.
    Available,
    /// The range is empty or inverted.
    InvalidRange,
    /// The business day of the range is closed.
    Closed,
    /// The range extends outside the business day's open window.
    OutsideOpeningHours {
        /// The open window of that business day.
        open: TimeWindow,
    },
    /// A blocking interval overlaps the range.
    Conflict {
        /// The first overlapping interval.
        block: TimeWindow,
    },
}

impl Availability {
    /// Whether the range can be booked.
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// Checks a local wall-clock range against hours and blocking intervals.
///
/// `blocking` must contain only intervals that remove availability (see
/// [`classifier`](crate::classifier)); empty intervals among them are ignored.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_booking::availability::{check_availability, Availability};
/// use u_booking::business_day::CutoffHour;
/// use u_booking::models::{OpeningHours, TimeWindow};
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
/// let hours = OpeningHours::uniform("10:00", "22:00");
/// let booked = [TimeWindow::new(at(14), at(16))];
///
/// let result = check_availability(at(12), at(14), &hours, CutoffHour::default(), &booked);
/// assert_eq!(result, Availability::Available);
/// assert!(!check_availability(at(15), at(17), &hours, CutoffHour::default(), &booked).is_available());
/// ```
pub fn check_availability(
    start: NaiveDateTime,
    end: NaiveDateTime,
    hours: &OpeningHours,
    cutoff: CutoffHour,
    blocking: &[TimeWindow],
) -> Availability {
    let query = TimeWindow::new(start, end);
    if query.is_empty() {
        debug!(%start, %end, "rejecting empty availability query");
        return Availability::InvalidRange;
    }

    let business_day = business_day_start(start, cutoff);
    let Some(open) = hours.open_window(business_day) else {
        return Availability::Closed;
    };
    if !open.covers(&query) {
        return Availability::OutsideOpeningHours { open };
    }

    match blocking
        .iter()
        .find(|b| !b.is_empty() && b.overlaps(&query))
    {
        Some(block) => Availability::Conflict { block: *block },
        None => Availability::Available,
    }
}

/// Whether a local wall-clock range is bookable.
pub fn is_available(
    start: NaiveDateTime,
    end: NaiveDateTime,
    hours: &OpeningHours,
    cutoff: CutoffHour,
    blocking: &[TimeWindow],
) -> bool {
    check_availability(start, end, hours, cutoff, blocking).is_available()
}
