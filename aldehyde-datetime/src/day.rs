//! Day-boundary helpers.
//!
//! Every function reads year, month, day and time of day in the zone the
//! value already carries. Nothing is normalized to UTC first, so callers
//! comparing values from different zones should convert them themselves.

use chrono::NaiveTime;

use crate::zone::Zone;
use crate::zoned::ZonedTime;

/// 00:00:00 UTC on the calendar day of `t`.
pub fn start_of_day(t: &ZonedTime) -> ZonedTime {
    at_time_of_day(t, NaiveTime::default())
}

/// 23:59:59 UTC on the calendar day of `t`. The nanosecond is always 0.
pub fn end_of_day(t: &ZonedTime) -> ZonedTime {
    // 23:59:59 is always a valid time.
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default();
    at_time_of_day(t, last_second)
}

fn at_time_of_day(t: &ZonedTime, time: NaiveTime) -> ZonedTime {
    let day = t.naive_local().date();
    ZonedTime::from_naive_utc(day.and_time(time), Zone::Utc)
}

/// True when both values fall on the same year, month and day.
pub fn is_same_date(a: &ZonedTime, b: &ZonedTime) -> bool {
    a.naive_local().date() == b.naive_local().date()
}

/// True at exactly 00:00:00; the nanosecond is ignored.
pub fn is_start_of_day(t: &ZonedTime) -> bool {
    t.hour() == 0 && t.minute() == 0 && t.second() == 0
}

/// True at exactly 23:59:59; the nanosecond is ignored.
pub fn is_end_of_day(t: &ZonedTime) -> bool {
    t.hour() == 23 && t.minute() == 59 && t.second() == 59
}
