//! Occupancy aggregation.
//!
//! Occupancy compares the minutes a room was blocked against the minutes it
//! was open over a [`DateRange`]. The same primitives serve every period
//! (this week, this month, any two months being compared); there is no
//! per-granularity code path.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Open minutes | Sum of open-range widths of each date in the range |
//! | Occupied minutes | Sum over blocking intervals of the part inside both the range and its business day's open window |
//! | Occupancy % | `round(occupied / open × 1000) / 10`, or 0 when nothing was open |
//! | Revenue | See [`revenue`](crate::revenue) |

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::business_day::{business_day_start, CutoffHour};
use crate::happy_hour::TemplatesByRoom;
use crate::models::{CalendarBlock, DateRange, OpeningHours, TimeWindow};
use crate::revenue::{checked_total, range_revenue};
use crate::studio::Studio;

/// Open minutes of every date in `range`.
pub fn total_open_minutes(hours: &OpeningHours, range: DateRange) -> i64 {
    range
        .days()
        .filter_map(|day| hours.open_range_for_day(day))
        .map(|r| r.width())
        .sum()
}

/// In-hours minutes of one blocking interval inside `range`.
///
/// The interval is clipped to the range, then split at business-day
/// boundaries; each piece only counts inside its business day's open window.
pub fn block_occupied_minutes(
    block: &TimeWindow,
    hours: &OpeningHours,
    cutoff: CutoffHour,
    range: DateRange,
) -> i64 {
    let Some(clipped) = block.intersect(&range.window()) else {
        return 0;
    };

    let first_day = business_day_start(clipped.start, cutoff);
    let last_day = business_day_start(clipped.end, cutoff);
    first_day
        .iter_days()
        .take_while(|day| *day <= last_day)
        .filter_map(|day| hours.open_window(day))
        .map(|open| open.overlap_minutes(&clipped))
        .sum()
}

/// In-hours minutes of all blocking intervals inside `range`.
///
/// `blocking` must already be classified as blocking. Each interval counts
/// only its own range; overlapping intervals are not merged.
pub fn occupied_minutes(
    blocking: &[TimeWindow],
    hours: &OpeningHours,
    cutoff: CutoffHour,
    range: DateRange,
) -> i64 {
    blocking
        .iter()
        .map(|b| block_occupied_minutes(b, hours, cutoff, range))
        .sum()
}

/// Occupancy as a percentage with one decimal, 0 when `open` is not positive.
///
/// Rounds half up at the tenths digit, computed on integer tenths.
pub fn occupancy_percent(occupied: i64, open: i64) -> f64 {
    if open <= 0 {
        return 0.0;
    }
    let occupied = i128::from(occupied);
    let open = i128::from(open);
    let tenths = (occupied * 2000 + open).div_euclid(2 * open);
    tenths as f64 / 10.0
}

/// Occupancy and revenue of one room over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomOccupancy {
    /// Open minutes in the period.
    pub open_minutes: i64,
    /// Occupied in-hours minutes in the period.
    pub occupied_minutes: i64,
    /// Occupancy percentage (one decimal).
    pub occupancy_percent: f64,
    /// Estimated revenue.
    pub revenue: Decimal,
}

/// Studio-wide occupancy and revenue over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    /// The period.
    pub range: DateRange,
    /// Open minutes summed over all rooms.
    pub open_minutes: i64,
    /// Occupied minutes summed over all rooms.
    pub occupied_minutes: i64,
    /// Studio-wide occupancy percentage (one decimal).
    pub occupancy_percent: f64,
    /// Estimated revenue over all rooms.
    pub revenue: Decimal,
    /// Per-room breakdown.
    pub by_room: HashMap<String, RoomOccupancy>,
}

impl OccupancyReport {
    /// Computes occupancy and revenue for every room of `studio`.
    ///
    /// # Arguments
    /// * `studio` - Rooms, hours, clock and blocking policy.
    /// * `blocks` - Studio-wide calendar entries; entries of unknown rooms are ignored.
    /// * `templates` - Happy-hour templates per room.
    /// * `range` - The period.
    pub fn calculate(
        studio: &Studio,
        blocks: &[CalendarBlock],
        templates: &TemplatesByRoom,
        range: DateRange,
    ) -> Self {
        let cutoff = studio.clock.cutoff;
        let mut by_room = HashMap::new();

        for room in &studio.rooms {
            let hours = room.hours(&studio.opening_hours);
            let open = total_open_minutes(hours, range);
            let occupied = occupied_minutes(&studio.blocking_windows(blocks, &room.id), hours, cutoff, range);

            let room_templates = templates.get(&room.id).map(Vec::as_slice).unwrap_or(&[]);
            let revenue = range_revenue(
                &studio.revenue_windows(blocks, &room.id),
                room_templates,
                studio.rate_card(room),
                cutoff,
                range,
            );

            by_room.insert(
                room.id.clone(),
                RoomOccupancy {
                    open_minutes: open,
                    occupied_minutes: occupied,
                    occupancy_percent: occupancy_percent(occupied, open),
                    revenue,
                },
            );
        }

        let open_minutes: i64 = by_room.values().map(|r| r.open_minutes).sum();
        let occupied_minutes: i64 = by_room.values().map(|r| r.occupied_minutes).sum();
        let revenue = checked_total(by_room.values().map(|r| r.revenue));

        Self {
            range,
            open_minutes,
            occupied_minutes,
            occupancy_percent: occupancy_percent(occupied_minutes, open_minutes),
            revenue,
            by_room,
        }
    }

    /// Whether the studio reached the given occupancy percentage.
    pub fn meets_target(&self, min_percent: f64) -> bool {
        self.occupancy_percent >= min_percent
    }
}

/// Difference between two periods, `second` minus `first`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    /// Earlier (or reference) period.
    pub first: DateRange,
    /// Later (or compared) period.
    pub second: DateRange,
    /// Occupancy change in percentage points (one decimal).
    pub occupancy_delta: f64,
    /// Revenue change.
    pub revenue_delta: Decimal,
    /// Occupied-minute change.
    pub occupied_minutes_delta: i64,
}

impl PeriodComparison {
    /// Compares two reports.
    pub fn between(first: &OccupancyReport, second: &OccupancyReport) -> Self {
        Self {
            first: first.range,
            second: second.range,
            occupancy_delta: ((second.occupancy_percent * 10.0).round()
                - (first.occupancy_percent * 10.0).round())
                / 10.0,
            revenue_delta: second
                .revenue
                .checked_sub(first.revenue)
                .unwrap_or(Decimal::ZERO),
            occupied_minutes_delta: second.occupied_minutes - first.occupied_minutes,
        }
    }
}
