//! Conversions between [`ZonedTime`] and the structured [`Date`] and
//! [`DateTime`] types.

use crate::error::{DateTimeError, Result};
use crate::wire::{Date, DateTime, Duration, TimeOffset, TimeZone};
use crate::zone::{FixedZone, Zone, ZoneDatabase, ZoneResolver};
use crate::zoned::ZonedTime;

/// Midnight of `date` in the local zone.
///
/// The local zone is resolved on each call, which reads the environment and
/// the config file (see [`crate::config`]). Use [`date_to_time`] with a zone
/// resolved once to avoid that.
pub fn date_to_local_time(date: Option<&Date>) -> Result<ZonedTime> {
    date_to_time(date, &Zone::local())
}

/// Midnight of `date` in UTC.
pub fn date_to_utc_time(date: Option<&Date>) -> Result<ZonedTime> {
    date_to_time(date, &Zone::Utc)
}

/// Midnight of `date` in `zone`.
///
/// Fails with [`DateTimeError::InvalidValue`] when `date` is absent or any of
/// year, month and day is below 1.
pub fn date_to_time(date: Option<&Date>, zone: &Zone) -> Result<ZonedTime> {
    let date = date.ok_or(DateTimeError::InvalidValue("date parameter not set"))?;
    if !date.is_set() {
        return Err(DateTimeError::InvalidValue("year, month, day not set"));
    }
    ZonedTime::from_fields(date.year, date.month, date.day, 0, 0, 0, 0, zone.clone())
}

/// The calendar day of `t` in its own zone.
pub fn time_to_date(t: &ZonedTime) -> Date {
    Date {
        year: t.year(),
        month: t.month() as i32,
        day: t.day() as i32,
    }
}

/// Converts a structured date-time, resolving named zones with
/// [`ZoneDatabase`].
pub fn datetime_to_time(dt: Option<&DateTime>) -> Result<ZonedTime> {
    datetime_to_time_with(dt, &ZoneDatabase)
}

/// Converts a structured date-time, resolving named zones with `resolver`.
///
/// A named zone is resolved first; a fixed offset becomes a zone labelled
/// `UTC±H`; no offset means UTC.
pub fn datetime_to_time_with(
    dt: Option<&DateTime>,
    resolver: &impl ZoneResolver,
) -> Result<ZonedTime> {
    let dt = dt.ok_or(DateTimeError::InvalidValue("date parameter not set"))?;
    if !dt.is_set() {
        return Err(DateTimeError::InvalidValue("year, month, day not set"));
    }

    let zone = match &dt.time_offset {
        None => Zone::Utc,
        Some(TimeOffset::TimeZone(tz)) => resolver.resolve(&tz.id)?,
        Some(TimeOffset::UtcOffset(offset)) => FixedZone::from_offset_seconds(offset.seconds)
            .map(Zone::Fixed)
            .ok_or(DateTimeError::InvalidValue("utc offset out of range"))?,
    };

    ZonedTime::from_fields(
        dt.year,
        dt.month,
        dt.day,
        dt.hours,
        dt.minutes,
        dt.seconds,
        dt.nanos,
        zone,
    )
}

/// Converts `t` into a structured date-time.
///
/// Zones named `UTC+N`/`UTC-N` and unnamed fixed zones are written as a UTC
/// offset, but only when the offset is positive; zero and negative offsets
/// are written without any offset and read back as UTC. Every other zone is
/// written by name.
pub fn time_to_datetime(t: &ZonedTime) -> DateTime {
    let date = time_to_date(t);

    let name = t.zone_name();
    let time_offset = if name.is_empty() || is_offset_label(name) {
        let seconds = t.offset().local_minus_utc();
        (seconds > 0).then(|| TimeOffset::UtcOffset(Duration::from_seconds(seconds.into())))
    } else {
        Some(TimeOffset::TimeZone(TimeZone::new(name)))
    };

    DateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        hours: t.hour() as i32,
        minutes: t.minute() as i32,
        seconds: t.second() as i32,
        nanos: t.nanosecond() as i32,
        time_offset,
    }
}

/// Matches `UTC` followed by a sign and one or two digits.
fn is_offset_label(name: &str) -> bool {
    let Some(rest) = name.strip_prefix("UTC") else {
        return false;
    };
    let Some(digits) = rest.strip_prefix(['+', '-']) else {
        return false;
    };
    (1..=2).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::Tz;

    fn dt(time_offset: Option<TimeOffset>) -> DateTime {
        DateTime {
            year: 2012,
            month: 4,
            day: 21,
            hours: 11,
            minutes: 30,
            seconds: 0,
            nanos: 0,
            time_offset,
        }
    }

    #[test]
    fn date_roundtrips_through_time() {
        for date in [
            Date::new(2012, 4, 21),
            Date::new(1776, 7, 4),
            Date::new(2032, 4, 21),
            Date::new(2062, 4, 21),
            Date::new(1, 1, 1),
        ] {
            for zone in [Zone::Utc, Zone::Named(Tz::Pacific__Kiritimati), Zone::local()] {
                let t = date_to_time(Some(&date), &zone).unwrap();
                assert_eq!((t.hour(), t.minute(), t.second(), t.nanosecond()), (0, 0, 0, 0));
                assert_eq!(time_to_date(&t), date, "{date:?} in {zone}");
            }
        }
    }

    #[test]
    fn unset_date_is_invalid() {
        for date in [
            Date::default(),
            Date::new(2012, 0, 1),
            Date::new(2012, 1, 0),
            Date::new(0, 1, 1),
        ] {
            let err = date_to_utc_time(Some(&date)).unwrap_err();
            assert!(matches!(err, DateTimeError::InvalidValue(_)));
        }
        assert!(matches!(date_to_local_time(None), Err(DateTimeError::InvalidValue(_))));
    }

    #[test]
    fn time_to_date_ignores_time_of_day() {
        let t = ZonedTime::from_fields(2006, 1, 2, 23, 59, 59, 999, Zone::Utc).unwrap();
        assert_eq!(time_to_date(&t), Date::new(2006, 1, 2));
    }

    #[test]
    fn datetime_without_zone_is_utc() {
        let expected = ZonedTime::from_fields(2012, 4, 21, 11, 30, 0, 0, Zone::Utc).unwrap();

        let mut input = dt(None);
        assert_eq!(datetime_to_time(Some(&input)).unwrap(), expected);

        input.time_offset = Some(TimeOffset::TimeZone(TimeZone::new("")));
        assert_eq!(datetime_to_time(Some(&input)).unwrap(), expected);
    }

    #[test]
    fn datetime_with_unknown_zone_fails() {
        let input = dt(Some(TimeOffset::TimeZone(TimeZone::new("fake/ness"))));
        let err = datetime_to_time(Some(&input)).unwrap_err();
        assert!(matches!(err, DateTimeError::UnknownTimeZone(_)));
    }

    #[test]
    fn absent_or_unset_datetime_is_invalid() {
        assert!(matches!(datetime_to_time(None), Err(DateTimeError::InvalidValue(_))));
        let unset = DateTime::default();
        assert!(matches!(datetime_to_time(Some(&unset)), Err(DateTimeError::InvalidValue(_))));
    }

    #[test]
    fn named_zone_roundtrip() {
        for id in ["America/New_York", "Europe/Berlin"] {
            let input = dt(Some(TimeOffset::TimeZone(TimeZone::new(id))));
            let t = datetime_to_time(Some(&input)).unwrap();
            assert_eq!((t.year(), t.month(), t.day()), (2012, 4, 21));
            assert_eq!((t.hour(), t.minute(), t.second()), (11, 30, 0));
            assert_eq!(t.zone_name(), id);

            assert_eq!(time_to_datetime(&t), input);
        }
    }

    #[test]
    fn positive_offset_roundtrip() {
        let offset = Duration::from_seconds(5 * 3600);
        let input = dt(Some(TimeOffset::UtcOffset(offset)));
        let t = datetime_to_time(Some(&input)).unwrap();
        assert_eq!(t.zone_name(), "UTC+5");
        assert_eq!(t.hour(), 11);
        assert_eq!(t.to_utc().hour(), 6);

        assert_eq!(time_to_datetime(&t), input);
    }

    #[test]
    fn negative_offset_is_dropped_on_the_way_out() {
        let offset = Duration::from_seconds(-3 * 3600);
        let input = dt(Some(TimeOffset::UtcOffset(offset)));
        let t = datetime_to_time(Some(&input)).unwrap();
        assert_eq!(t.zone_name(), "UTC-3");

        let out = time_to_datetime(&t);
        assert_eq!(out.hours, 11);
        assert!(out.time_offset.is_none());
    }

    #[test]
    fn utc_is_written_by_name() {
        let t = ZonedTime::from_fields(2012, 4, 21, 11, 30, 0, 0, Zone::Utc).unwrap();
        let out = time_to_datetime(&t);
        assert_eq!(out.time_zone().map(|tz| tz.id.as_str()), Some("UTC"));
        assert_eq!(datetime_to_time(Some(&out)).unwrap(), t);
    }

    #[test]
    fn unnamed_positive_offset_becomes_utc_offset() {
        let zone = Zone::Fixed(FixedZone::unnamed(FixedOffset::east_opt(4 * 3600).unwrap()));
        let t = ZonedTime::from_fields(2006, 1, 2, 1, 4, 5, 0, zone).unwrap();

        let out = time_to_datetime(&t);
        assert_eq!(out.utc_offset().map(|d| d.seconds), Some(4 * 3600));

        let back = datetime_to_time(Some(&out)).unwrap();
        assert_eq!(back.to_datetime_utc(), t.to_datetime_utc());
        assert_eq!(back.zone_name(), "UTC+4");
    }

    #[test]
    fn nanos_are_carried() {
        let t = ZonedTime::from_fields(2006, 1, 2, 1, 4, 5, 123_456_789, Zone::Utc).unwrap();
        assert_eq!(time_to_datetime(&t).nanos, 123_456_789);
    }

    #[test]
    fn offset_of_a_day_or_more_is_invalid() {
        let input = dt(Some(TimeOffset::UtcOffset(Duration::from_seconds(24 * 3600))));
        let err = datetime_to_time(Some(&input)).unwrap_err();
        assert!(matches!(err, DateTimeError::InvalidValue(_)));
    }

    #[test]
    fn offset_labels() {
        assert!(is_offset_label("UTC+7"));
        assert!(is_offset_label("UTC-12"));
        assert!(!is_offset_label("UTC"));
        assert!(!is_offset_label("UTC+123"));
        assert!(!is_offset_label("UTC7"));
        assert!(!is_offset_label("UTC+a"));
        assert!(!is_offset_label("Europe/Berlin"));
    }
}
