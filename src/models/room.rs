//! Room model.
//!
//! Rooms share their studio's opening hours unless they carry their own.

use serde::{Deserialize, Serialize};

use super::{OpeningHours, RoomPricing};

/// A bookable room of a studio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Stored pricing.
    #[serde(default)]
    pub pricing: RoomPricing,
    /// Room-specific hours overriding the studio's.
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

impl Room {
    /// Creates a room with no pricing.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the pricing.
    pub fn with_pricing(mut self, pricing: RoomPricing) -> Self {
        self.pricing = pricing;
        self
    }

    /// Overrides the studio's opening hours for this room.
    pub fn with_opening_hours(mut self, hours: OpeningHours) -> Self {
        self.opening_hours = Some(hours);
        self
    }

    /// Hours in effect for this room.
    pub fn hours<'a>(&'a self, studio_hours: &'a OpeningHours) -> &'a OpeningHours {
        self.opening_hours.as_ref().unwrap_or(studio_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_override() {
        let studio = OpeningHours::default();
        let plain = Room::new("R1");
        assert_eq!(plain.hours(&studio), &studio);

        let late = OpeningHours::uniform("18:00", "02:00");
        let night = Room::new("R2").with_opening_hours(late.clone());
        assert_eq!(night.hours(&studio), &late);
    }

    #[test]
    fn test_room_serde_defaults() {
        let room: Room = serde_json::from_str(r#"{"id":"R1"}"#).unwrap();
        assert_eq!(room.id, "R1");
        assert!(room.opening_hours.is_none());
        assert_eq!(room.pricing.rate_card(), None);
    }
}
