//! Per-studio settings.
//!
//! Settings arrive as a JSON document from the studio's stored
//! configuration. Every field has a default, so an empty object is valid.
//!
//! ```json
//! {
//!   "cutoffHour": 4,
//!   "timezone": "Europe/Istanbul",
//!   "unknownBlockPolicy": "nonBlocking",
//!   "openingHours": [{ "open": true, "openTime": "10:00", "closeTime": "22:00" }, ...]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::business_day::{BusinessClock, CutoffHour, DEFAULT_CUTOFF_HOUR};
use crate::classifier::BlockingPolicy;
use crate::error::Result;
use crate::models::{OpeningHours, Room};
use crate::studio::Studio;

/// Timezone used when a studio has none configured.
pub const DEFAULT_TIMEZONE: &str = "Europe/Istanbul";

/// Stored settings of one studio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioSettings {
    /// Business-day cutoff hour; out-of-range values fall back to the default.
    pub cutoff_hour: i64,
    /// IANA timezone name.
    pub timezone: String,
    /// Treatment of unrecognized block types.
    pub unknown_block_policy: BlockingPolicy,
    /// Raw weekly opening hours, normalized on use.
    pub opening_hours: Option<Value>,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            cutoff_hour: i64::from(DEFAULT_CUTOFF_HOUR),
            timezone: DEFAULT_TIMEZONE.to_string(),
            unknown_block_policy: BlockingPolicy::default(),
            opening_hours: None,
        }
    }
}

impl StudioSettings {
    /// Parses a settings document.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Cutoff hour, lenient.
    pub fn cutoff(&self) -> CutoffHour {
        CutoffHour::from_setting(self.cutoff_hour)
    }

    /// Business clock; fails only for an unknown timezone.
    pub fn clock(&self) -> Result<BusinessClock> {
        BusinessClock::from_name(&self.timezone, self.cutoff())
    }

    /// Normalized opening hours.
    pub fn opening_hours(&self) -> OpeningHours {
        OpeningHours::normalize(self.opening_hours.as_ref())
    }

    /// Builds a studio from these settings.
    pub fn into_studio(self, id: impl Into<String>, rooms: Vec<Room>) -> Result<Studio> {
        let clock = self.clock()?;
        Ok(Studio::new(id, self.opening_hours(), clock)
            .with_policy(self.unknown_block_policy)
            .with_rooms(rooms))
    }
}
