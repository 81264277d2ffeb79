//! Happy-hour models.
//!
//! Owners draw discount slots on a sample week; each drawn slot is stored
//! as one concrete occurrence ([`HappyHourSlot`]). The
//! [`happy_hour`](crate::happy_hour) builder generalizes those occurrences
//! into weekly [`HappyHourTemplate`]s.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// One stored happy-hour occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HappyHourSlot {
    /// Room the discount applies to.
    pub room_id: String,
    /// Occurrence start.
    pub start_at: DateTime<Utc>,
    /// Occurrence end.
    pub end_at: DateTime<Utc>,
}

impl HappyHourSlot {
    /// Creates a new slot.
    pub fn new(room_id: impl Into<String>, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            room_id: room_id.into(),
            start_at,
            end_at,
        }
    }
}

/// A weekly recurring discount window.
///
/// Minutes are counted from the midnight of the business day; `end_minutes`
/// exceeds 1440 when the window runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HappyHourTemplate {
    /// Business-day weekday (Monday = 0 … Sunday = 6).
    pub weekday: usize,
    /// Window start, minutes from business-day midnight.
    pub start_minutes: i64,
    /// Window end, minutes from business-day midnight.
    pub end_minutes: i64,
}

impl HappyHourTemplate {
    /// Creates a new template.
    pub fn new(weekday: usize, start_minutes: i64, end_minutes: i64) -> Self {
        Self {
            weekday,
            start_minutes,
            end_minutes,
        }
    }

    /// Window length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_minutes - self.start_minutes).max(0)
    }

    /// Concrete window on the given business day.
    pub fn window_on(&self, business_day: NaiveDate) -> TimeWindow {
        TimeWindow::from_offsets(
            business_day.and_time(NaiveTime::MIN),
            self.start_minutes,
            self.end_minutes,
        )
    }
}
