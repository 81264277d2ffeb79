//! Booking domain models.
//!
//! Plain data types for the inputs of the engine: opening hours, calendar
//! blocks, happy-hour slots, rooms and their pricing. All are
//! serde-serializable in the camelCase layout used by storage.
//!
//! # Domain Mappings
//!
//! | u-booking | Music studio | Club | Sports venue |
//! |-----------|--------------|------|--------------|
//! | Room | Recording room | Table/Booth | Court |
//! | CalendarBlock | Session booking | Table reservation | Court booking |
//! | HappyHourTemplate | Off-peak rate | Happy hour | Off-peak slot |
//! | Business day | Studio day | Club night | Venue day |

mod block;
mod happy_hour;
mod opening_hours;
mod pricing;
mod room;
mod window;

pub use block::CalendarBlock;
pub use happy_hour::{HappyHourSlot, HappyHourTemplate};
pub use opening_hours::{
    parse_minutes_of_day, weekday_index, DayHours, OpenRange, OpeningHours, DEFAULT_CLOSE_TIME,
    DEFAULT_OPEN_TIME, MINUTES_PER_DAY,
};
pub use pricing::{parse_amount, parse_amount_strict, PricingModel, RateCard, RoomPricing};
pub use room::Room;
pub use window::{DateRange, TimeWindow};
