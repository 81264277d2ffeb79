//! Happy-hour template building and expansion.
//!
//! Owners draw discount slots on a sample week, so the stored slots are
//! concrete occurrences. The builder turns each occurrence into a weekly
//! template keyed by its business-day weekday, and the expander turns
//! templates back into concrete windows for any date span.
//!
//! # Building
//! For each slot:
//! 1. Resolve the business day of its local start.
//! 2. Express start and end as minutes from that business day's midnight;
//!    an end at or before the start gains 1440 (overnight window).
//!    Minutes are taken from the slot as drawn; opening hours play no part,
//!    so a discount drawn before opening still applies to bookings then.
//! 3. Merge: a template with the same `(weekday, start)` as an existing
//!    one only extends it, so the longest window wins.

use std::collections::HashMap;

use chrono::{Days, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::business_day::{business_day_start, day_anchor, BusinessClock, CutoffHour};
use crate::models::{weekday_index, HappyHourSlot, HappyHourTemplate, TimeWindow, MINUTES_PER_DAY};

/// Templates per room id.
pub type TemplatesByRoom = HashMap<String, Vec<HappyHourTemplate>>;

/// Concrete windows per room id.
pub type WindowsByRoom = HashMap<String, Vec<TimeWindow>>;

/// Derives a template from one local occurrence.
///
/// Returns `None` only when the occurrence still has no width after the
/// overnight adjustment (an end more than a day before the start).
pub fn template_for_occurrence(
    start: NaiveDateTime,
    end: NaiveDateTime,
    cutoff: CutoffHour,
) -> Option<HappyHourTemplate> {
    let business_day = business_day_start(start, cutoff);
    let anchor = day_anchor(business_day);

    let start_minutes = (start - anchor).num_minutes();
    let mut end_minutes = (end - anchor).num_minutes();
    if end_minutes <= start_minutes {
        end_minutes += MINUTES_PER_DAY;
    }
    if end_minutes <= start_minutes {
        return None;
    }

    Some(HappyHourTemplate::new(
        weekday_index(business_day),
        start_minutes,
        end_minutes,
    ))
}

/// Adds a template, extending an existing one with the same weekday and start.
pub fn merge_template(templates: &mut Vec<HappyHourTemplate>, template: HappyHourTemplate) {
    match templates
        .iter_mut()
        .find(|t| t.weekday == template.weekday && t.start_minutes == template.start_minutes)
    {
        Some(existing) => {
            existing.end_minutes = existing.end_minutes.max(template.end_minutes);
        }
        None => templates.push(template),
    }
}

/// Builds weekly templates for every room appearing in `slots`.
///
/// Each room's list is sorted by weekday, then start.
pub fn build_templates(slots: &[HappyHourSlot], clock: &BusinessClock) -> TemplatesByRoom {
    let mut by_room = TemplatesByRoom::new();

    for slot in slots {
        let start = clock.to_local(slot.start_at);
        let end = clock.to_local(slot.end_at);
        match template_for_occurrence(start, end, clock.cutoff) {
            Some(template) => merge_template(by_room.entry(slot.room_id.clone()).or_default(), template),
            None => debug!(
                room_id = %slot.room_id,
                %start,
                %end,
                "happy-hour slot has no width, dropping"
            ),
        }
    }

    for templates in by_room.values_mut() {
        templates.sort_by_key(|t| (t.weekday, t.start_minutes));
    }
    by_room
}

/// Concrete windows of `templates` on one business day.
pub fn windows_on_day(templates: &[HappyHourTemplate], day: NaiveDate) -> Vec<TimeWindow> {
    let weekday = weekday_index(day);
    templates
        .iter()
        .filter(|t| t.weekday == weekday)
        .map(|t| t.window_on(day))
        .collect()
}

/// Expands templates into windows for every date in `[first_day, last_day]`.
pub fn expand_templates(
    templates: &TemplatesByRoom,
    first_day: NaiveDate,
    last_day: NaiveDate,
) -> WindowsByRoom {
    templates
        .iter()
        .map(|(room_id, room_templates)| {
            let windows = first_day
                .iter_days()
                .take_while(|d| *d <= last_day)
                .flat_map(|day| windows_on_day(room_templates, day))
                .collect();
            (room_id.clone(), windows)
        })
        .collect()
}

/// The seven-day preview starting at `week_start`, as shown on a room calendar.
pub fn weekly_preview(templates: &TemplatesByRoom, week_start: NaiveDate) -> WindowsByRoom {
    let last_day = week_start
        .checked_add_days(Days::new(6))
        .unwrap_or(week_start);
    expand_templates(templates, week_start, last_day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn local(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn slot(room: &str, d: u32, h1: u32, m1: u32, d2: u32, h2: u32, m2: u32) -> HappyHourSlot {
        HappyHourSlot::new(
            room,
            Utc.with_ymd_and_hms(2024, 3, d, h1, m1, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, d2, h2, m2, 0).unwrap(),
        )
    }

    #[test]
    fn test_template_from_occurrence() {
        // Wednesday 2024-03-06 10:00-11:00
        let t = template_for_occurrence(local(6, 10, 0), local(6, 11, 0), CutoffHour::default());
        assert_eq!(t, Some(HappyHourTemplate::new(2, 600, 660)));
    }

    #[test]
    fn test_after_midnight_slot_belongs_to_previous_day() {
        // Thursday 01:00-02:00 with 04:00 cutoff is Wednesday's business day
        let t = template_for_occurrence(local(7, 1, 0), local(7, 2, 0), CutoffHour::default());
        assert_eq!(t, Some(HappyHourTemplate::new(2, 1500, 1560)));
    }

    #[test]
    fn test_inverted_occurrence_is_overnight() {
        let t = template_for_occurrence(local(6, 23, 0), local(6, 1, 0), CutoffHour::default());
        assert_eq!(t, Some(HappyHourTemplate::new(2, 1380, 1500)));
    }

    #[test]
    fn test_minutes_taken_as_drawn() {
        // Wednesday 09:00-11:00 and 10:00-10:30 keep their own start keys
        let slots = vec![
            slot("R1", 6, 9, 0, 6, 11, 0),
            slot("R1", 6, 10, 0, 6, 10, 30),
        ];
        let built = build_templates(&slots, &BusinessClock::default());
        assert_eq!(
            built["R1"],
            vec![
                HappyHourTemplate::new(2, 540, 660),
                HappyHourTemplate::new(2, 600, 630),
            ]
        );
    }

    #[test]
    fn test_end_more_than_a_day_early_is_dropped() {
        assert_eq!(
            template_for_occurrence(local(6, 12, 0), local(4, 13, 0), CutoffHour::default()),
            None
        );
        let built = build_templates(&[slot("R1", 6, 12, 0, 4, 13, 0)], &BusinessClock::default());
        assert!(built.is_empty());
    }

    #[test]
    fn test_longest_window_wins() {
        let slots = vec![
            slot("R1", 6, 10, 0, 6, 11, 0),
            slot("R1", 13, 10, 0, 13, 12, 0), // next Wednesday, longer
            slot("R1", 20, 10, 0, 20, 10, 30), // shorter again
        ];
        let built = build_templates(&slots, &BusinessClock::default());
        assert_eq!(built["R1"], vec![HappyHourTemplate::new(2, 600, 720)]);
    }

    #[test]
    fn test_rooms_are_kept_apart_and_sorted() {
        let slots = vec![
            slot("R1", 8, 18, 0, 8, 19, 0), // Friday
            slot("R1", 4, 12, 0, 4, 13, 0), // Monday
            slot("R2", 4, 12, 0, 4, 14, 0),
        ];
        let built = build_templates(&slots, &BusinessClock::default());
        assert_eq!(
            built["R1"],
            vec![
                HappyHourTemplate::new(0, 720, 780),
                HappyHourTemplate::new(4, 1080, 1140),
            ]
        );
        assert_eq!(built["R2"], vec![HappyHourTemplate::new(0, 720, 840)]);
    }

    #[test]
    fn test_expand_over_range() {
        let mut templates = TemplatesByRoom::new();
        templates.insert(
            "R1".to_string(),
            vec![
                HappyHourTemplate::new(0, 600, 660),   // Monday
                HappyHourTemplate::new(6, 1380, 1500), // Sunday, overnight
            ],
        );
        let first = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(); // inclusive: two Mondays
        let expanded = expand_templates(&templates, first, last);
        let windows = &expanded["R1"];
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0], TimeWindow::new(local(4, 10, 0), local(4, 11, 0)));
        assert_eq!(windows[1], TimeWindow::new(local(10, 23, 0), local(11, 1, 0)));
        assert_eq!(windows[2], TimeWindow::new(local(11, 10, 0), local(11, 11, 0)));
    }

    #[test]
    fn test_weekly_preview() {
        let mut templates = TemplatesByRoom::new();
        templates.insert("R1".to_string(), vec![HappyHourTemplate::new(3, 900, 960)]);
        let preview = weekly_preview(&templates, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(
            preview["R1"],
            vec![TimeWindow::new(local(7, 15, 0), local(7, 16, 0))]
        );
    }

    #[test]
    fn test_empty_range_expands_to_nothing() {
        let mut templates = TemplatesByRoom::new();
        templates.insert("R1".to_string(), vec![HappyHourTemplate::new(0, 600, 660)]);
        let first = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert!(expand_templates(&templates, first, last)["R1"].is_empty());
    }
}
