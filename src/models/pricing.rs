//! Room pricing and amount parsing.
//!
//! Prices are stored as operator-entered strings. Separators vary by
//! locale (`"1.250,50"`, `"1,250.50"`, `"300"`, `"12,5"`), so every amount
//! goes through [`parse_amount`], the single parsing boundary. Internally
//! money is [`Decimal`].
//!
//! # Effective Rate
//! Revenue uses one hourly figure per room, resolved in a fixed order:
//! hourly → flat → min → daily. The first parseable value wins. The
//! happy-hour rate falls back to the effective rate when unset.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BookingError, Result};

/// Parses an amount string, returning an error when it is not a number.
///
/// Accepts `,` or `.` as the decimal separator. When both appear, the last
/// one is the decimal separator and the other is grouping. A separator that
/// repeats is grouping. A single separator followed by exactly three digits
/// (and not preceded by a lone `0`) is grouping, so `"1.500"` is 1500 while
/// `"1.50"` is 1.5. Currency symbols and spaces are ignored.
pub fn parse_amount_strict(raw: &str) -> Result<Decimal> {
    let invalid = || BookingError::InvalidAmount(raw.to_string());

    let trimmed = raw.trim();
    let negative = trimmed.starts_with('-');
    let body: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if !body.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let last_comma = body.rfind(',');
    let last_dot = body.rfind('.');
    let normalized = match (last_comma, last_dot) {
        (Some(c), Some(d)) => {
            let (decimal, grouping) = if c > d { (',', '.') } else { ('.', ',') };
            body.replace(grouping, "").replace(decimal, ".")
        }
        (Some(_), None) => resolve_single_separator(&body, ','),
        (None, Some(_)) => resolve_single_separator(&body, '.'),
        (None, None) => body,
    };
    if normalized.matches('.').count() > 1 {
        return Err(invalid());
    }

    let value = Decimal::from_str(&normalized).map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}

fn resolve_single_separator(body: &str, sep: char) -> String {
    if body.matches(sep).count() > 1 {
        return body.replace(sep, "");
    }
    let (before, after) = body.split_once(sep).unwrap_or((body, ""));
    let grouping = after.len() == 3 && !before.is_empty() && before != "0";
    if grouping {
        format!("{before}{after}")
    } else {
        format!("{before}.{after}")
    }
}

/// Lenient amount parsing: `None` for anything unparseable.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    match parse_amount_strict(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "ignoring amount");
            None
        }
    }
}

/// How a room is priced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PricingModel {
    /// One price per session.
    Flat,
    /// Price per day.
    Daily,
    /// Price per hour.
    #[default]
    Hourly,
    /// Negotiated, with an optional minimum.
    Variable,
    /// Any unrecognized stored value.
    Other(String),
}

impl From<String> for PricingModel {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "flat" => Self::Flat,
            "daily" => Self::Daily,
            "hourly" => Self::Hourly,
            "variable" => Self::Variable,
            _ => Self::Other(value),
        }
    }
}

impl From<PricingModel> for String {
    fn from(value: PricingModel) -> Self {
        match value {
            PricingModel::Flat => "flat".into(),
            PricingModel::Daily => "daily".into(),
            PricingModel::Hourly => "hourly".into(),
            PricingModel::Variable => "variable".into(),
            PricingModel::Other(s) => s,
        }
    }
}

/// Stored pricing of a room. Amounts are raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomPricing {
    /// Pricing model.
    pub model: PricingModel,
    /// Flat session price.
    pub flat_rate: Option<String>,
    /// Daily price.
    pub daily_rate: Option<String>,
    /// Hourly price.
    pub hourly_rate: Option<String>,
    /// Minimum price (variable model).
    pub min_rate: Option<String>,
    /// Discounted hourly price during happy hours.
    pub happy_hour_rate: Option<String>,
}

/// Resolved hourly rates used for revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    /// Normal hourly rate.
    pub normal: Decimal,
    /// Happy-hour hourly rate.
    pub happy: Decimal,
}

impl RateCard {
    /// A rate card that earns nothing.
    pub const ZERO: RateCard = RateCard {
        normal: Decimal::ZERO,
        happy: Decimal::ZERO,
    };

    /// Creates a rate card.
    pub fn new(normal: Decimal, happy: Decimal) -> Self {
        Self { normal, happy }
    }
}

impl RoomPricing {
    /// Creates hourly pricing.
    pub fn hourly(rate: impl Into<String>) -> Self {
        Self {
            model: PricingModel::Hourly,
            hourly_rate: Some(rate.into()),
            ..Self::default()
        }
    }

    /// Sets the happy-hour rate.
    pub fn with_happy_hour_rate(mut self, rate: impl Into<String>) -> Self {
        self.happy_hour_rate = Some(rate.into());
        self
    }

    /// Effective hourly rate: hourly → flat → min → daily.
    pub fn effective_rate(&self) -> Option<Decimal> {
        [
            &self.hourly_rate,
            &self.flat_rate,
            &self.min_rate,
            &self.daily_rate,
        ]
        .into_iter()
        .find_map(|rate| rate.as_deref().and_then(parse_amount))
    }

    /// Happy-hour rate, falling back to the effective rate.
    pub fn happy_rate(&self) -> Option<Decimal> {
        self.happy_hour_rate
            .as_deref()
            .and_then(parse_amount)
            .or_else(|| self.effective_rate())
    }

    /// Both rates, `None` when the room has no parseable rate at all.
    pub fn rate_card(&self) -> Option<RateCard> {
        let normal = self.effective_rate()?;
        let happy = self.happy_rate().unwrap_or(normal);
        Some(RateCard { normal, happy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_amount("300"), Some(dec!(300)));
        assert_eq!(parse_amount(" 300 "), Some(dec!(300)));
        assert_eq!(parse_amount("₺ 450"), Some(dec!(450)));
        assert_eq!(parse_amount("450 TL"), Some(dec!(450)));
    }

    #[test]
    fn test_parse_decimal_separators() {
        assert_eq!(parse_amount("12,5"), Some(dec!(12.5)));
        assert_eq!(parse_amount("12.50"), Some(dec!(12.50)));
        assert_eq!(parse_amount("0,500"), Some(dec!(0.5)));
    }

    #[test]
    fn test_parse_grouping() {
        assert_eq!(parse_amount("1.500"), Some(dec!(1500)));
        assert_eq!(parse_amount("1,500"), Some(dec!(1500)));
        assert_eq!(parse_amount("1.250.000"), Some(dec!(1250000)));
        assert_eq!(parse_amount("1.250,50"), Some(dec!(1250.50)));
        assert_eq!(parse_amount("1,250.50"), Some(dec!(1250.50)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("free"), None);
        assert!(matches!(
            parse_amount_strict("n/a"),
            Err(BookingError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(parse_amount("-25"), Some(dec!(-25)));
    }

    #[test]
    fn test_effective_rate_fallback_order() {
        let pricing = RoomPricing {
            model: PricingModel::Variable,
            flat_rate: Some("500".into()),
            daily_rate: Some("2000".into()),
            hourly_rate: None,
            min_rate: Some("100".into()),
            happy_hour_rate: None,
        };
        assert_eq!(pricing.effective_rate(), Some(dec!(500)));

        let only_daily = RoomPricing {
            daily_rate: Some("2.000".into()),
            ..RoomPricing::default()
        };
        assert_eq!(only_daily.effective_rate(), Some(dec!(2000)));
    }

    #[test]
    fn test_unparseable_rate_is_skipped() {
        let pricing = RoomPricing {
            hourly_rate: Some("ask".into()),
            min_rate: Some("150".into()),
            ..RoomPricing::default()
        };
        assert_eq!(pricing.effective_rate(), Some(dec!(150)));
    }

    #[test]
    fn test_happy_rate_falls_back() {
        let pricing = RoomPricing::hourly("300");
        assert_eq!(pricing.happy_rate(), Some(dec!(300)));
        let discounted = pricing.with_happy_hour_rate("200");
        assert_eq!(
            discounted.rate_card(),
            Some(RateCard::new(dec!(300), dec!(200)))
        );
        assert_eq!(RoomPricing::default().rate_card(), None);
    }

    #[test]
    fn test_pricing_serde() {
        let json = r#"{"model":"HOURLY","hourlyRate":"300","happyHourRate":"250"}"#;
        let pricing: RoomPricing = serde_json::from_str(json).unwrap();
        assert_eq!(pricing.model, PricingModel::Hourly);
        assert_eq!(pricing.happy_hour_rate.as_deref(), Some("250"));

        let unknown: RoomPricing = serde_json::from_str(r#"{"model":"package"}"#).unwrap();
        assert_eq!(unknown.model, PricingModel::Other("package".into()));
    }
}
