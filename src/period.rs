//! Reporting periods relative to an explicit "now".
//!
//! Nothing in this crate reads the system clock. Callers pass the current
//! instant and the studio timezone as a [`ReferenceClock`], so "this week"
//! and "this month" are reproducible in tests.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::business_day::{business_day_start, CutoffHour};
use crate::models::{weekday_index, DateRange};

/// Calendar month `[1st, 1st of next month)`, `None` for an invalid month.
pub fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = start.checked_add_months(Months::new(1))?;
    Some(DateRange::new(start, end))
}

/// Monday-start week containing `date`.
pub fn week_containing(date: NaiveDate) -> DateRange {
    let monday = date
        .checked_sub_days(Days::new(weekday_index(date) as u64))
        .unwrap_or(date);
    DateRange::days_from(monday, 7)
}

/// The current instant seen from a studio's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceClock {
    /// Current instant.
    pub now: DateTime<Utc>,
    /// Studio timezone.
    pub timezone: Tz,
}

impl ReferenceClock {
    /// Creates a reference clock.
    pub fn new(now: DateTime<Utc>, timezone: Tz) -> Self {
        Self { now, timezone }
    }

    /// Local wall-clock time of `now`.
    pub fn local_now(&self) -> NaiveDateTime {
        self.now.with_timezone(&self.timezone).naive_local()
    }

    /// Local calendar date of `now`.
    pub fn today(&self) -> NaiveDate {
        self.local_now().date()
    }

    /// Business day `now` belongs to.
    pub fn business_today(&self, cutoff: CutoffHour) -> NaiveDate {
        business_day_start(self.local_now(), cutoff)
    }

    /// Monday-start week containing today.
    pub fn this_week(&self) -> DateRange {
        week_containing(self.today())
    }

    /// Calendar month containing today.
    pub fn this_month(&self) -> DateRange {
        let today = self.today();
        month_range(today.year(), today.month())
            .unwrap_or_else(|| DateRange::days_from(today, 1))
    }

    /// Calendar month before the current one.
    pub fn previous_month(&self) -> DateRange {
        let start = self.this_month().start;
        let prev = start.checked_sub_months(Months::new(1)).unwrap_or(start);
        DateRange::new(prev, start)
    }
}
