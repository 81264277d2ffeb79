//! Calendar block model.
//!
//! A calendar block is any entry on a room's calendar that may remove
//! availability: a customer reservation, or a manual block placed by the
//! studio owner. Blocks are created elsewhere and are read-only here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One calendar entry for a room.
///
/// `kind` and `status` are free text as stored; their meaning is decided
/// by the [`classifier`](crate::classifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarBlock {
    /// Room this block belongs to.
    pub room_id: String,
    /// Block start (inclusive).
    pub start_at: DateTime<Utc>,
    /// Block end (exclusive). Upstream data may have `end_at <= start_at`.
    pub end_at: DateTime<Utc>,
    /// Entry type, e.g. `"manual"` or `"reservation"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Reservation status, e.g. `"approved"`.
    #[serde(default)]
    pub status: Option<String>,
}

impl CalendarBlock {
    /// Creates a block of the given type with no status.
    pub fn new(
        room_id: impl Into<String>,
        kind: impl Into<String>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            start_at,
            end_at,
            kind: kind.into(),
            status: None,
        }
    }

    /// Creates a manual block.
    pub fn manual(room_id: impl Into<String>, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self::new(room_id, "manual", start_at, end_at)
    }

    /// Creates a reservation with a status.
    pub fn reservation(
        room_id: impl Into<String>,
        status: impl Into<String>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Self {
        Self::new(room_id, "reservation", start_at, end_at).with_status(status)
    }

    /// Sets the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Whether the stored range has no positive width.
    pub fn is_inverted(&self) -> bool {
        self.end_at <= self.start_at
    }
}
