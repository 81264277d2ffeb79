//! Weekly opening hours.
//!
//! A venue publishes one entry per weekday (Monday = 0 … Sunday = 6).
//! Times are `"HH:MM"` strings as entered by the operator. A close time
//! at or before the open time means the venue closes on the next
//! calendar day (e.g. 22:00–04:00).
//!
//! # Normalization
//! Stored hours are operator-entered JSON and may be missing, truncated,
//! or malformed. [`OpeningHours::normalize`] always yields seven entries,
//! substituting [`OpeningHours::default`] (every day 09:00–21:00) when the
//! input is not an array of exactly seven well-formed entries. A single
//! day with an unparseable time is kept, and treated as closed when its
//! open range is requested.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::TimeWindow;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Open time used by the default profile.
pub const DEFAULT_OPEN_TIME: &str = "09:00";
/// Close time used by the default profile.
pub const DEFAULT_CLOSE_TIME: &str = "21:00";

/// Weekday index of a date: Monday = 0 … Sunday = 6.
///
/// Depends on the date only, never on a time of day.
#[inline]
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Parses `"HH:MM"` (or `"HH:MM:SS"`) into minutes since midnight.
///
/// `"24:00"` is accepted as 1440 so a day can close exactly at midnight.
pub fn parse_minutes_of_day(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw == "24:00" || raw == "24:00:00" {
        return Some(MINUTES_PER_DAY);
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
        .map(|t| i64::from(t.hour()) * 60 + i64::from(t.minute()))
}

/// Opening hours of a single weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    /// Whether the venue operates on this weekday.
    pub open: bool,
    /// Opening time, `"HH:MM"`.
    pub open_time: String,
    /// Closing time, `"HH:MM"`. At or before `open_time` means next day.
    pub close_time: String,
}

impl DayHours {
    /// Creates an open day.
    pub fn open(open_time: impl Into<String>, close_time: impl Into<String>) -> Self {
        Self {
            open: true,
            open_time: open_time.into(),
            close_time: close_time.into(),
        }
    }

    /// Creates a closed day (times kept at the defaults for display).
    pub fn closed() -> Self {
        Self {
            open: false,
            open_time: DEFAULT_OPEN_TIME.to_string(),
            close_time: DEFAULT_CLOSE_TIME.to_string(),
        }
    }

    /// Open range in minutes of day, `None` when closed or unparseable.
    pub fn open_range(&self) -> Option<OpenRange> {
        if !self.open {
            return None;
        }
        let start = parse_minutes_of_day(&self.open_time)?;
        let mut end = parse_minutes_of_day(&self.close_time)?;
        if end <= start {
            end += MINUTES_PER_DAY;
        }
        Some(OpenRange {
            start_minutes: start,
            end_minutes: end,
        })
    }
}

impl Default for DayHours {
    fn default() -> Self {
        Self::open(DEFAULT_OPEN_TIME, DEFAULT_CLOSE_TIME)
    }
}

/// Operating range of one business day, in minutes from its midnight.
///
/// `end_minutes` exceeds 1440 when the venue closes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRange {
    /// Opening minute.
    pub start_minutes: i64,
    /// Closing minute (exclusive).
    pub end_minutes: i64,
}

impl OpenRange {
    /// Open width in minutes.
    #[inline]
    pub fn width(&self) -> i64 {
        (self.end_minutes - self.start_minutes).max(0)
    }

    /// Anchors the range at the midnight of `date`.
    pub fn window_on(&self, date: NaiveDate) -> TimeWindow {
        TimeWindow::from_offsets(
            date.and_time(NaiveTime::MIN),
            self.start_minutes,
            self.end_minutes,
        )
    }
}

/// A week of opening hours, always exactly seven entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OpeningHours {
    days: [DayHours; 7],
}

impl OpeningHours {
    /// Creates opening hours from seven explicit entries.
    pub fn new(days: [DayHours; 7]) -> Self {
        Self { days }
    }

    /// Same hours on every day of the week.
    pub fn uniform(open_time: &str, close_time: &str) -> Self {
        Self {
            days: std::array::from_fn(|_| DayHours::open(open_time, close_time)),
        }
    }

    /// Normalizes raw stored hours into a valid week.
    ///
    /// Never fails: anything other than an array of seven well-formed
    /// entries becomes the default profile.
    pub fn normalize(raw: Option<&Value>) -> Self {
        let Some(Value::Array(items)) = raw else {
            if raw.is_some_and(|v| !v.is_null()) {
                warn!("opening hours are not an array, using default profile");
            }
            return Self::default();
        };
        if items.len() != 7 {
            warn!(
                entries = items.len(),
                "opening hours do not have 7 entries, using default profile"
            );
            return Self::default();
        }
        let parsed: Result<Vec<DayHours>, _> = items
            .iter()
            .map(|item| DayHours::deserialize(item))
            .collect();
        match parsed {
            Ok(days) => Self::from_days(days),
            Err(e) => {
                warn!(error = %e, "malformed opening hours entry, using default profile");
                Self::default()
            }
        }
    }

    /// Normalizes a JSON document (lenient, see [`normalize`](Self::normalize)).
    pub fn from_json_str(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::normalize(Some(&value)),
            Err(e) => {
                warn!(error = %e, "opening hours are not valid JSON, using default profile");
                Self::default()
            }
        }
    }

    /// Builds from a list, falling back to the default unless it has seven entries.
    pub fn from_days(days: Vec<DayHours>) -> Self {
        match <[DayHours; 7]>::try_from(days) {
            Ok(days) => Self { days },
            Err(days) => {
                warn!(
                    entries = days.len(),
                    "opening hours do not have 7 entries, using default profile"
                );
                Self::default()
            }
        }
    }

    /// Replaces one weekday (Monday = 0). Out-of-range indices are ignored.
    pub fn with_day(mut self, weekday: usize, hours: DayHours) -> Self {
        if let Some(slot) = self.days.get_mut(weekday) {
            *slot = hours;
        }
        self
    }

    /// Marks one weekday closed.
    pub fn with_closed(self, weekday: usize) -> Self {
        self.with_day(weekday, DayHours::closed())
    }

    /// All seven entries, Monday first.
    pub fn days(&self) -> &[DayHours; 7] {
        &self.days
    }

    /// Entry for a weekday index (taken modulo 7).
    pub fn day(&self, weekday: usize) -> &DayHours {
        &self.days[weekday % 7]
    }

    /// Open range for a calendar date, `None` when the day is closed.
    pub fn open_range_for_day(&self, date: NaiveDate) -> Option<OpenRange> {
        self.day(weekday_index(date)).open_range()
    }

    /// Open range of `date` anchored at its midnight.
    pub fn open_window(&self, date: NaiveDate) -> Option<TimeWindow> {
        self.open_range_for_day(date).map(|r| r.window_on(date))
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self::uniform(DEFAULT_OPEN_TIME, DEFAULT_CLOSE_TIME)
    }
}

impl<'de> Deserialize<'de> for OpeningHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(Self::normalize(raw.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_index_monday_first() {
        // 2024-03-04 is a Monday
        for offset in 0..7u64 {
            let d = date(2024, 3, 4) + chrono::Days::new(offset);
            assert_eq!(weekday_index(d), offset as usize);
        }
        assert_eq!(weekday_index(date(2024, 3, 10)), 6); // Sunday
    }

    #[test]
    fn test_parse_minutes_of_day() {
        assert_eq!(parse_minutes_of_day("09:30"), Some(570));
        assert_eq!(parse_minutes_of_day(" 22:00 "), Some(1320));
        assert_eq!(parse_minutes_of_day("07:15:00"), Some(435));
        assert_eq!(parse_minutes_of_day("24:00"), Some(1440));
        assert_eq!(parse_minutes_of_day("25:00"), None);
        assert_eq!(parse_minutes_of_day("noon"), None);
    }

    #[test]
    fn test_overnight_open_range() {
        let day = DayHours::open("22:00", "04:00");
        assert_eq!(
            day.open_range(),
            Some(OpenRange {
                start_minutes: 1320,
                end_minutes: 1680
            })
        );
    }

    #[test]
    fn test_equal_times_means_24_hours() {
        let day = DayHours::open("06:00", "06:00");
        assert_eq!(day.open_range().unwrap().width(), 1440);
    }

    #[test]
    fn test_closed_or_unparseable_day() {
        assert_eq!(DayHours::closed().open_range(), None);
        assert_eq!(DayHours::open("9am", "21:00").open_range(), None);
    }

    #[test]
    fn test_normalize_valid() {
        let mut raw = vec![json!({"open": true, "openTime": "10:00", "closeTime": "22:00"}); 6];
        raw.push(json!({"open": false, "openTime": "10:00", "closeTime": "22:00"}));
        let hours = OpeningHours::normalize(Some(&Value::Array(raw)));
        assert_eq!(hours.day(0).open_time, "10:00");
        assert!(!hours.day(6).open);
    }

    #[test]
    fn test_normalize_wrong_length_uses_default() {
        let raw = json!([{"open": true, "openTime": "10:00", "closeTime": "22:00"}]);
        assert_eq!(OpeningHours::normalize(Some(&raw)), OpeningHours::default());
    }

    #[test]
    fn test_normalize_missing_or_malformed_uses_default() {
        assert_eq!(OpeningHours::normalize(None), OpeningHours::default());
        assert_eq!(
            OpeningHours::normalize(Some(&Value::Null)),
            OpeningHours::default()
        );
        assert_eq!(
            OpeningHours::normalize(Some(&json!({"monday": "10-22"}))),
            OpeningHours::default()
        );
        let bad_entry = Value::Array(vec![json!({"open": "yes"}); 7]);
        assert_eq!(
            OpeningHours::normalize(Some(&bad_entry)),
            OpeningHours::default()
        );
        assert_eq!(OpeningHours::from_json_str("not json"), OpeningHours::default());
    }

    #[test]
    fn test_default_profile() {
        let hours = OpeningHours::default();
        assert_eq!(hours.days().len(), 7);
        let range = hours.open_range_for_day(date(2024, 3, 6)).unwrap();
        assert_eq!(range.start_minutes, 540);
        assert_eq!(range.end_minutes, 1260);
    }

    #[test]
    fn test_open_range_for_day_uses_weekday() {
        let hours = OpeningHours::uniform("10:00", "22:00").with_closed(6);
        assert!(hours.open_range_for_day(date(2024, 3, 9)).is_some()); // Saturday
        assert!(hours.open_range_for_day(date(2024, 3, 10)).is_none()); // Sunday
    }

    #[test]
    fn test_open_window_anchored_at_midnight() {
        let hours = OpeningHours::uniform("22:00", "04:00");
        let w = hours.open_window(date(2024, 3, 4)).unwrap();
        assert_eq!(w.start, date(2024, 3, 4).and_hms_opt(22, 0, 0).unwrap());
        assert_eq!(w.end, date(2024, 3, 5).and_hms_opt(4, 0, 0).unwrap());
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let hours = OpeningHours::uniform("10:00", "22:00");
        let json = serde_json::to_value(&hours).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 7);
        assert_eq!(json[0]["openTime"], "10:00");

        let back: OpeningHours = serde_json::from_value(json).unwrap();
        assert_eq!(back, hours);

        let fallback: OpeningHours = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(fallback, OpeningHours::default());
    }
}
