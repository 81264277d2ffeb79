//! Blocking-interval classification.
//!
//! Decides whether a calendar entry removes availability, from its free-text
//! type and status. Type and status are matched case-insensitively and in
//! both English and Turkish, as entered by operators.
//!
//! | Type | Status | Blocking |
//! |------|--------|----------|
//! | contains `manual`/`manuel`/`blok`/`block` | any | yes |
//! | `reservation`/`rezervasyon` | `approved`/`onaylı`/`onayli` | yes |
//! | `reservation`/`rezervasyon` | anything else | no |
//! | anything else | any | per [`BlockingPolicy`] |

use serde::{Deserialize, Serialize};

use crate::models::CalendarBlock;

const MANUAL_MARKERS: [&str; 4] = ["manual", "manuel", "blok", "block"];
const RESERVATION_TYPES: [&str; 2] = ["reservation", "rezervasyon"];
const APPROVED_STATUSES: [&str; 3] = ["approved", "onaylı", "onayli"];

/// What a calendar entry is, as far as availability is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockClass {
    /// Owner-placed block.
    Manual,
    /// Reservation with an approved status.
    ApprovedReservation,
    /// Reservation in any other state (pending, rejected, cancelled…).
    InactiveReservation,
    /// Type not recognized.
    Unrecognized,
}

/// Treatment of entries whose type is not recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockingPolicy {
    /// Unrecognized entries leave the room available.
    #[default]
    #[serde(alias = "nonBlocking")]
    FailOpen,
    /// Unrecognized entries block the room.
    #[serde(alias = "blocking")]
    FailClosed,
}

impl BlockingPolicy {
    /// Whether an entry of this class blocks under the policy.
    pub fn blocks(&self, class: BlockClass) -> bool {
        match class {
            BlockClass::Manual | BlockClass::ApprovedReservation => true,
            BlockClass::InactiveReservation => false,
            BlockClass::Unrecognized => matches!(self, BlockingPolicy::FailClosed),
        }
    }

    /// Whether a block removes availability under the policy.
    pub fn is_blocking(&self, block: &CalendarBlock) -> bool {
        self.blocks(classify(&block.kind, block.status.as_deref()))
    }
}

/// Classifies an entry by type and status.
pub fn classify(kind: &str, status: Option<&str>) -> BlockClass {
    let kind = kind.trim().to_lowercase();
    if MANUAL_MARKERS.iter().any(|m| kind.contains(m)) {
        return BlockClass::Manual;
    }
    if RESERVATION_TYPES.contains(&kind.as_str()) {
        let approved = status
            .map(|s| s.trim().to_lowercase())
            .is_some_and(|s| APPROVED_STATUSES.contains(&s.as_str()));
        return if approved {
            BlockClass::ApprovedReservation
        } else {
            BlockClass::InactiveReservation
        };
    }
    BlockClass::Unrecognized
}

/// Whether an entry removes availability, under the default policy.
pub fn is_blocking(kind: &str, status: Option<&str>) -> bool {
    BlockingPolicy::default().blocks(classify(kind, status))
}

/// Whether an entry earns revenue: only approved reservations do.
pub fn is_revenue_generating(block: &CalendarBlock) -> bool {
    classify(&block.kind, block.status.as_deref()) == BlockClass::ApprovedReservation
}
