//! Input diagnostics for booking data.
//!
//! Computation never rejects input; malformed entries are ignored or
//! replaced by defaults. This module reports what was degraded so owners
//! can fix their data. Detects:
//! - Duplicate room IDs
//! - Blocks and happy-hour slots referencing unknown rooms
//! - Blocks and slots with `end <= start`
//! - Block types the classifier does not recognize
//! - Open days with unparseable opening or closing times
//! - Rooms without any parseable rate

use std::collections::HashSet;

use crate::classifier::{classify, BlockClass};
use crate::models::{CalendarBlock, HappyHourSlot, OpeningHours};
use crate::studio::Studio;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two rooms share the same ID.
    DuplicateRoomId,
    /// A block or slot references a room that doesn't exist.
    UnknownRoomReference,
    /// A block or slot ends at or before its start.
    InvertedRange,
    /// A block type the classifier does not recognize.
    UnrecognizedBlockType,
    /// An open day whose times cannot be parsed (treated as closed).
    UnparseableOpeningHours,
    /// A room without a parseable rate (earns no revenue).
    MissingRate,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a studio's rooms, blocks and happy-hour slots.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    studio: &Studio,
    blocks: &[CalendarBlock],
    slots: &[HappyHourSlot],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_ids = HashSet::new();
    for room in &studio.rooms {
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRoomId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
        if room.pricing.rate_card().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingRate,
                format!("Room '{}' has no parseable rate", room.id),
            ));
        }
        if let Some(hours) = &room.opening_hours {
            check_hours(hours, &format!("room '{}'", room.id), &mut errors);
        }
    }
    check_hours(&studio.opening_hours, &format!("studio '{}'", studio.id), &mut errors);

    for block in blocks {
        if !room_ids.contains(block.room_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRoomReference,
                format!("Block at {} references unknown room '{}'", block.start_at, block.room_id),
            ));
        }
        if block.is_inverted() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedRange,
                format!(
                    "Block of room '{}' ends ({}) at or before it starts ({})",
                    block.room_id, block.end_at, block.start_at
                ),
            ));
        }
        if classify(&block.kind, block.status.as_deref()) == BlockClass::Unrecognized {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnrecognizedBlockType,
                format!(
                    "Block of room '{}' has unrecognized type '{}' (treated as {:?})",
                    block.room_id, block.kind, studio.policy
                ),
            ));
        }
    }

    for slot in slots {
        if !room_ids.contains(slot.room_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRoomReference,
                format!("Happy-hour slot references unknown room '{}'", slot.room_id),
            ));
        }
        if slot.end_at <= slot.start_at {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedRange,
                format!(
                    "Happy-hour slot of room '{}' ends at or before it starts ({})",
                    slot.room_id, slot.start_at
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn check_hours(hours: &OpeningHours, owner: &str, errors: &mut Vec<ValidationError>) {
    for (weekday, day) in hours.days().iter().enumerate() {
        if day.open && day.open_range().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnparseableOpeningHours,
                format!(
                    "Opening hours of {owner} on {} are unparseable ('{}'-'{}')",
                    WEEKDAY_NAMES[weekday], day.open_time, day.close_time
                ),
            ));
        }
    }
}
