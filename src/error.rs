//! Errors for the strict input boundaries.
//!
//! The computation functions never fail: malformed operator data degrades
//! to a safe default. Errors only surface where a caller explicitly asks
//! for strict parsing (settings documents, cutoff hours, amounts).

use thiserror::Error;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Errors raised by strict parsing boundaries.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The timezone name is not a known IANA zone.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The business-day cutoff is not an hour of the day.
    #[error("cutoff hour must be 0-23, got {0}")]
    InvalidCutoffHour(i64),

    /// An amount string could not be read as a decimal.
    #[error("unparseable amount: {0:?}")]
    InvalidAmount(String),

    /// The settings document is not valid JSON for [`StudioSettings`](crate::config::StudioSettings).
    #[error("invalid studio settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BookingError::InvalidCutoffHour(25).to_string(),
            "cutoff hour must be 0-23, got 25"
        );
        assert_eq!(
            BookingError::UnknownTimezone("Mars/Olympus".into()).to_string(),
            "unknown timezone: Mars/Olympus"
        );
        assert_eq!(
            BookingError::InvalidAmount("abc".into()).to_string(),
            "unparseable amount: \"abc\""
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let booking: BookingError = err.into();
        assert!(matches!(booking, BookingError::InvalidSettings(_)));
    }
}
