//! Aldehyde Datetime - conversions between zoned times, ISO-8601 text and
//! the structured calendar types.
//!
//! Core concepts:
//! - **ZonedTime**: an instant plus the zone it is read in
//! - **Date / DateTime / TimeOfDay**: structured calendar values exchanged
//!   with other components
//! - **Clock**: where "now" comes from, injected by the caller
//!
//! # Example
//!
//! ```
//! use aldehyde_datetime::{calendar, day, iso8601};
//!
//! let t = iso8601::parse("2006-01-02T01:04:05+04:00").unwrap();
//! assert_eq!(iso8601::format_date(&t.to_utc()), "2006-01-01");
//!
//! let dt = calendar::time_to_datetime(&t);
//! assert_eq!(dt.utc_offset().map(|d| d.seconds), Some(4 * 3600));
//!
//! let start = day::start_of_day(&t);
//! assert_eq!(iso8601::format_date_time(&start), "2006-01-02T00:00:00Z");
//! ```

pub mod calendar;
pub mod clock;
pub mod config;
pub mod day;
mod error;
pub mod iso8601;
pub mod time_of_day;
mod wire;
mod zone;
mod zoned;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DateTimeError, ParseError, ParseErrorKind, Result};
pub use wire::{Date, DateTime, Duration, TimeOfDay, TimeOffset, TimeZone};
pub use zone::{FixedZone, Zone, ZoneDatabase, ZoneResolver};
pub use zoned::ZonedTime;
