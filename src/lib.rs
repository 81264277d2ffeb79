//! Booking engine for rentable rooms.
//!
//! Answers three questions for studios that rent rooms by the hour:
//! is a time range bookable, how occupied were the rooms over a period, and
//! how much did that occupancy earn with happy-hour discounts applied.
//! Every function is a pure computation over already-loaded data; loading
//! and rendering belong to the caller.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `OpeningHours`, `CalendarBlock`,
//!   `HappyHourSlot`, `HappyHourTemplate`, `Room`, `RoomPricing`,
//!   `TimeWindow`, `DateRange`
//! - **`business_day`**: Cutoff-hour business days and the studio clock
//! - **`classifier`**: Which calendar entries remove availability or earn revenue
//! - **`availability`**: Whether a range is inside opening hours and free
//! - **`happy_hour`**: Weekly discount templates from drawn slots
//! - **`occupancy`**: Open/occupied minutes, percentages and reports
//! - **`revenue`**: Normal and happy-hour revenue split
//! - **`period`**: Week and month ranges relative to an explicit "now"
//! - **`studio`**: Studio-level entry points over stored UTC data
//! - **`validation`**: Diagnostics for degraded input
//! - **`config`**: Per-studio settings
//!
//! # Time Model
//!
//! Stored instants are UTC. Date math happens on the studio-local wall
//! clock. A business day starts at the studio's cutoff hour, so a booking
//! at 01:00 is judged against the previous evening's hours.

pub mod availability;
pub mod business_day;
pub mod classifier;
pub mod config;
pub mod error;
pub mod happy_hour;
pub mod models;
pub mod occupancy;
pub mod period;
pub mod revenue;
pub mod studio;
pub mod validation;

pub use error::{BookingError, Result};
