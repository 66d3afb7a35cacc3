use crate::wire::TimeOfDay;
use crate::zone::Zone;
use crate::zoned::{ZonedTime, normalize};

/// The clock reading of `t` in its own zone; the date is dropped.
pub fn time_to_time_of_day(t: &ZonedTime) -> TimeOfDay {
    TimeOfDay {
        hours: t.hour() as i32,
        minutes: t.minute() as i32,
        seconds: t.second() as i32,
        nanos: t.nanosecond() as i32,
    }
}

/// `tod` as a UTC time on 0000-01-01.
///
/// Out-of-range fields carry over, so hour 24 lands on 0000-01-02.
pub fn time_of_day_to_time(tod: &TimeOfDay) -> ZonedTime {
    // Any i32 field combination stays within chrono's range from year 0.
    let local = normalize(0, 1, 1, tod.hours, tod.minutes, tod.seconds, tod.nanos)
        .unwrap_or_default();
    ZonedTime::from_naive_utc(local, Zone::Utc)
}
