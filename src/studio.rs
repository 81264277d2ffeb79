//! Studio-level entry points.
//!
//! A [`Studio`] bundles what every computation needs (opening hours,
//! business clock, blocking policy, rooms) and accepts stored UTC data
//! directly. Each method converts to studio-local time, classifies blocks,
//! and delegates to the pure functions in [`availability`](crate::availability),
//! [`happy_hour`](crate::happy_hour), [`occupancy`](crate::occupancy) and
//! [`revenue`](crate::revenue).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::availability::{check_availability, Availability};
use crate::business_day::BusinessClock;
use crate::classifier::{is_revenue_generating, BlockingPolicy};
use crate::happy_hour::{build_templates, TemplatesByRoom};
use crate::models::{CalendarBlock, HappyHourSlot, OpeningHours, RateCard, Room, TimeWindow};

/// A venue with its rooms and operating rules.
#[derive(Debug, Clone)]
pub struct Studio {
    /// Studio identifier.
    pub id: String,
    /// Opening hours shared by rooms without their own.
    pub opening_hours: OpeningHours,
    /// Timezone and business-day cutoff.
    pub clock: BusinessClock,
    /// Treatment of unrecognized block types.
    pub policy: BlockingPolicy,
    /// Bookable rooms.
    pub rooms: Vec<Room>,
}

impl Studio {
    /// Creates a studio with no rooms and the default blocking policy.
    pub fn new(id: impl Into<String>, opening_hours: OpeningHours, clock: BusinessClock) -> Self {
        Self {
            id: id.into(),
            opening_hours,
            clock,
            policy: BlockingPolicy::default(),
            rooms: Vec::new(),
        }
    }

    /// Sets the blocking policy.
    pub fn with_policy(mut self, policy: BlockingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds several rooms.
    pub fn with_rooms(mut self, rooms: impl IntoIterator<Item = Room>) -> Self {
        self.rooms.extend(rooms);
        self
    }

    /// Looks up a room by id.
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// Opening hours in effect for a room (studio hours for unknown rooms).
    pub fn hours_for(&self, room_id: &str) -> &OpeningHours {
        self.room(room_id)
            .map(|r| r.hours(&self.opening_hours))
            .unwrap_or(&self.opening_hours)
    }

    /// Local windows of a room's blocks that remove availability.
    pub fn blocking_windows(&self, blocks: &[CalendarBlock], room_id: &str) -> Vec<TimeWindow> {
        self.local_windows(blocks, room_id, |b| self.policy.is_blocking(b))
    }

    /// Local windows of a room's blocks that earn revenue.
    pub fn revenue_windows(&self, blocks: &[CalendarBlock], room_id: &str) -> Vec<TimeWindow> {
        self.local_windows(blocks, room_id, is_revenue_generating)
    }

    fn local_windows(
        &self,
        blocks: &[CalendarBlock],
        room_id: &str,
        keep: impl Fn(&CalendarBlock) -> bool,
    ) -> Vec<TimeWindow> {
        blocks
            .iter()
            .filter(|b| b.room_id == room_id)
            .filter(|b| {
                if b.is_inverted() {
                    debug!(room_id, start = %b.start_at, end = %b.end_at, "ignoring inverted block");
                    return false;
                }
                true
            })
            .filter(|b| keep(*b))
            .map(|b| self.local_window(b.start_at, b.end_at))
            .collect()
    }

    fn local_window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
        TimeWindow::new(self.clock.to_local(start), self.clock.to_local(end))
    }

    /// Resolved rates of a room; a room without a parseable rate earns nothing.
    pub fn rate_card(&self, room: &Room) -> RateCard {
        room.pricing.rate_card().unwrap_or_else(|| {
            debug!(room_id = %room.id, "room has no parseable rate");
            RateCard::ZERO
        })
    }

    /// Checks whether a room can be booked for `[start, end)`.
    ///
    /// `blocks` may hold the whole studio's entries; only the room's are used.
    pub fn check_room(
        &self,
        room_id: &str,
        blocks: &[CalendarBlock],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Availability {
        let query = self.local_window(start, end);
        let blocking = self.blocking_windows(blocks, room_id);
        let result = check_availability(
            query.start,
            query.end,
            self.hours_for(room_id),
            self.clock.cutoff,
            &blocking,
        );
        if !result.is_available() {
            debug!(studio_id = %self.id, room_id, ?result, "room not available");
        }
        result
    }

    /// Whether a room can be booked for `[start, end)`.
    pub fn is_room_available(
        &self,
        room_id: &str,
        blocks: &[CalendarBlock],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> bool {
        self.check_room(room_id, blocks, start, end).is_available()
    }

    /// Rooms bookable for `[start, end)`, given one studio-wide block fetch.
    pub fn available_rooms(
        &self,
        blocks: &[CalendarBlock],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<&Room> {
        let query = self.local_window(start, end);
        let mut by_room: HashMap<&str, Vec<&CalendarBlock>> = HashMap::new();
        for block in blocks {
            by_room.entry(block.room_id.as_str()).or_default().push(block);
        }

        self.rooms
            .iter()
            .filter(|room| {
                let blocking: Vec<TimeWindow> = by_room
                    .get(room.id.as_str())
                    .into_iter()
                    .flatten()
                    .filter(|b| !b.is_inverted() && self.policy.is_blocking(b))
                    .map(|b| self.local_window(b.start_at, b.end_at))
                    .collect();
                check_availability(
                    query.start,
                    query.end,
                    room.hours(&self.opening_hours),
                    self.clock.cutoff,
                    &blocking,
                )
                .is_available()
            })
            .collect()
    }

    /// Weekly happy-hour templates of every room appearing in `slots`.
    pub fn happy_hour_templates(&self, slots: &[HappyHourSlot]) -> TemplatesByRoom {
        build_templates(slots, &self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business_day::CutoffHour;
    use crate::models::{HappyHourTemplate, RoomPricing};
    use chrono::TimeZone;

    fn utc(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, m, 0).unwrap()
    }

    fn studio() -> Studio {
        Studio::new(
            "S1",
            OpeningHours::uniform("10:00", "22:00"),
            BusinessClock::utc(CutoffHour::default()),
        )
        .with_rooms([Room::new("R1"), Room::new("R2")])
    }

    #[test]
    fn test_check_room_only_uses_its_blocks() {
        let blocks = vec![CalendarBlock::manual("R2", utc(4, 14, 0), utc(4, 16, 0))];
        let s = studio();
        assert!(s.is_room_available("R1", &blocks, utc(4, 14, 0), utc(4, 15, 0)));
        assert!(matches!(
            s.check_room("R2", &blocks, utc(4, 14, 0), utc(4, 15, 0)),
            Availability::Conflict { .. }
        ));
    }

    #[test]
    fn test_pending_reservation_does_not_block() {
        let blocks = vec![CalendarBlock::reservation("R1", "pending", utc(4, 14, 0), utc(4, 16, 0))];
        assert!(studio().is_room_available("R1", &blocks, utc(4, 14, 0), utc(4, 15, 0)));
    }

    #[test]
    fn test_policy_decides_unknown_types() {
        let blocks = vec![CalendarBlock::new("R1", "maintenance", utc(4, 14, 0), utc(4, 16, 0))];
        assert!(studio().is_room_available("R1", &blocks, utc(4, 14, 0), utc(4, 15, 0)));
        let strict = studio().with_policy(BlockingPolicy::FailClosed);
        assert!(!strict.is_room_available("R1", &blocks, utc(4, 14, 0), utc(4, 15, 0)));
    }

    #[test]
    fn test_inverted_blocks_ignored() {
        let blocks = vec![CalendarBlock::manual("R1", utc(4, 16, 0), utc(4, 14, 0))];
        assert!(studio().blocking_windows(&blocks, "R1").is_empty());
        assert!(studio().is_room_available("R1", &blocks, utc(4, 13, 0), utc(4, 17, 0)));
    }

    #[test]
    fn test_available_rooms() {
        let blocks = vec![
            CalendarBlock::reservation("R1", "approved", utc(4, 14, 0), utc(4, 16, 0)),
            CalendarBlock::reservation("R2", "rejected", utc(4, 14, 0), utc(4, 16, 0)),
        ];
        let s = studio();
        let free: Vec<&str> = s
            .available_rooms(&blocks, utc(4, 15, 0), utc(4, 16, 0))
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(free, vec!["R2"]);
        assert!(s.available_rooms(&blocks, utc(4, 8, 0), utc(4, 9, 0)).is_empty());
    }

    #[test]
    fn test_room_hours_override() {
        let s = studio().with_room(
            Room::new("Late").with_opening_hours(OpeningHours::uniform("18:00", "03:00")),
        );
        assert!(s.is_room_available("Late", &[], utc(5, 1, 0), utc(5, 2, 0)));
        assert!(!s.is_room_available("R1", &[], utc(5, 1, 0), utc(5, 2, 0)));
    }

    #[test]
    fn test_timezone_applied() {
        let clock = BusinessClock::from_name("Europe/Istanbul", CutoffHour::default()).unwrap();
        let s = Studio::new("S1", OpeningHours::uniform("10:00", "22:00"), clock)
            .with_room(Room::new("R1"));
        // 07:00Z is 10:00 in Istanbul
        assert!(s.is_room_available("R1", &[], utc(4, 7, 0), utc(4, 8, 0)));
        assert!(!s.is_room_available("R1", &[], utc(4, 6, 0), utc(4, 7, 0)));
    }

    #[test]
    fn test_happy_hour_templates_follow_cutoff() {
        let s = studio().with_room(
            Room::new("Late").with_opening_hours(OpeningHours::uniform("18:00", "03:00")),
        );
        let slots = vec![
            HappyHourSlot::new("R1", utc(6, 10, 0), utc(6, 11, 0)),
            HappyHourSlot::new("Late", utc(7, 1, 0), utc(7, 2, 0)),
        ];
        let templates = s.happy_hour_templates(&slots);
        assert_eq!(templates["R1"], vec![HappyHourTemplate::new(2, 600, 660)]);
        assert_eq!(templates["Late"], vec![HappyHourTemplate::new(2, 1500, 1560)]);
    }

    #[test]
    fn test_rate_card_defaults_to_zero() {
        let s = studio();
        assert_eq!(s.rate_card(&s.rooms[0]), RateCard::ZERO);
        let priced = Room::new("R3").with_pricing(RoomPricing::hourly("300"));
        assert_eq!(s.rate_card(&priced).normal, rust_decimal::Decimal::from(300));
    }
}
