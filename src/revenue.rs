//! Revenue estimation.
//!
//! A booked interval earns the happy-hour rate for the minutes it shares
//! with happy-hour windows of its business day, and the normal rate for
//! the rest:
//!
//! ```text
//! revenue = happy_minutes / 60 × happy_rate + normal_minutes / 60 × normal_rate
//! ```
//!
//! Happy minutes are summed over every template of the business day's
//! weekday, then clamped to the interval length, so overlapping templates
//! can never credit more discounted minutes than the interval has. Normal
//! minutes are the remainder, floored at 0.
//!
//! Amounts too large for `Decimal` count as zero instead of failing.
//!
//! Only revenue-generating entries (approved reservations) should reach
//! these functions; see [`is_revenue_generating`](crate::classifier::is_revenue_generating).

use rust_decimal::Decimal;
use tracing::debug;

use crate::business_day::{business_day_start, CutoffHour};
use crate::happy_hour::windows_on_day;
use crate::models::{DateRange, HappyHourTemplate, RateCard, TimeWindow};

const MINUTES_PER_HOUR: i64 = 60;

/// Minutes of `window` covered by happy hours of its business day.
pub fn happy_hour_minutes(
    window: &TimeWindow,
    templates: &[HappyHourTemplate],
    cutoff: CutoffHour,
) -> i64 {
    let business_day = business_day_start(window.start, cutoff);
    let happy: i64 = windows_on_day(templates, business_day)
        .iter()
        .map(|hh| hh.overlap_minutes(window))
        .sum();
    happy.min(window.duration_minutes())
}

/// Revenue of one booked interval.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use u_booking::business_day::CutoffHour;
/// use u_booking::models::{HappyHourTemplate, RateCard, TimeWindow};
/// use u_booking::revenue::block_revenue;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let booking = TimeWindow::new(
///     monday.and_hms_opt(14, 0, 0).unwrap(),
///     monday.and_hms_opt(16, 0, 0).unwrap(),
/// );
/// let templates = [HappyHourTemplate::new(0, 840, 900)]; // Monday 14:00-15:00
/// let rates = RateCard::new(Decimal::from(200), Decimal::from(100));
///
/// let revenue = block_revenue(&booking, &templates, rates, CutoffHour::default());
/// assert_eq!(revenue, Decimal::from(300));
/// ```
pub fn block_revenue(
    window: &TimeWindow,
    templates: &[HappyHourTemplate],
    rates: RateCard,
    cutoff: CutoffHour,
) -> Decimal {
    let total = window.duration_minutes();
    if total == 0 {
        return Decimal::ZERO;
    }
    let happy = happy_hour_minutes(window, templates, cutoff);
    let normal = (total - happy).max(0);

    let revenue = minutes_at(happy, rates.happy)
        .zip(minutes_at(normal, rates.normal))
        .and_then(|(h, n)| h.checked_add(n));
    revenue.unwrap_or_else(|| {
        debug!(start = %window.start, end = %window.end, "revenue overflowed, counting zero");
        Decimal::ZERO
    })
}

/// `minutes / 60 × hourly_rate`, `None` on overflow.
fn minutes_at(minutes: i64, hourly_rate: Decimal) -> Option<Decimal> {
    Decimal::from(minutes)
        .checked_mul(hourly_rate)?
        .checked_div(Decimal::from(MINUTES_PER_HOUR))
}

/// Sums amounts, counting zero for the whole total if it overflows.
pub fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .unwrap_or_else(|| {
            debug!("revenue total overflowed, counting zero");
            Decimal::ZERO
        })
}

/// Revenue of all booked intervals of one room, clipped to `range`.
pub fn range_revenue(
    booked: &[TimeWindow],
    templates: &[HappyHourTemplate],
    rates: RateCard,
    cutoff: CutoffHour,
    range: DateRange,
) -> Decimal {
    let bounds = range.window();
    checked_total(
        booked
            .iter()
            .filter_map(|w| w.intersect(&bounds))
            .map(|w| block_revenue(&w, templates, rates, cutoff)),
    )
}
