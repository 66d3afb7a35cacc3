//! Structured calendar types exchanged with other components.
//!
//! These mirror the `google.type` calendar messages (`Date`, `DateTime`,
//! `TimeOfDay`) field for field, including the zero-means-unset convention.
//! The JSON form follows the protobuf JSON mapping: camelCase field names,
//! omitted integer fields read as zero, the offset oneof inlined into the
//! date-time object and durations written as strings such as `"18000s"`.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DateTimeError, Result};

/// A whole calendar day with no time-of-day or zone.
///
/// All-zero is the "unset" sentinel; conversion requires year, month and day
/// to be at least 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Date {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl Date {
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// True when year, month and day are all set (at least 1).
    pub fn is_set(&self) -> bool {
        self.year >= 1 && self.month >= 1 && self.day >= 1
    }
}

/// A signed span of time, as carried by a fixed UTC offset.
///
/// `seconds` and `nanos` share a sign. In JSON it is a decimal number of
/// seconds with an `s` suffix: `"18000s"`, `"-1.5s"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Duration {
    pub seconds: i64,
    pub nanos: i32,
}

impl Duration {
    pub fn from_seconds(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 || self.nanos < 0 { "-" } else { "" };
        let seconds = self.seconds.unsigned_abs();
        match self.nanos.unsigned_abs() {
            0 => write!(f, "{sign}{seconds}s"),
            n if n % 1_000_000 == 0 => write!(f, "{sign}{seconds}.{:03}s", n / 1_000_000),
            n if n % 1_000 == 0 => write!(f, "{sign}{seconds}.{:06}s", n / 1_000),
            n => write!(f, "{sign}{seconds}.{n:09}s"),
        }
    }
}

impl FromStr for Duration {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || DateTimeError::InvalidValue("malformed duration");
        let body = s.strip_suffix('s').ok_or_else(malformed)?;
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (whole, fraction) = match body.split_once('.') {
            Some((whole, fraction)) if !fraction.is_empty() => (whole, fraction),
            Some(_) => return Err(malformed()),
            None => (body, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty()
            || !all_digits(whole)
            || !all_digits(fraction)
            || fraction.len() > 9
        {
            return Err(malformed());
        }

        let seconds: i64 = whole.parse().map_err(|_| malformed())?;
        let nanos: i32 = if fraction.is_empty() {
            0
        } else {
            format!("{fraction:0<9}").parse().map_err(|_| malformed())?
        };

        Ok(if negative {
            Self {
                seconds: -seconds,
                nanos: -nanos,
            }
        } else {
            Self { seconds, nanos }
        })
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DurationVisitor;

        impl Visitor<'_> for DurationVisitor {
            type Value = Duration;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a duration string such as \"3600s\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Duration, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}

/// A zone-database identifier such as `"Europe/Berlin"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeZone {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl TimeZone {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: String::new(),
        }
    }
}

/// Where a [`DateTime`] sits relative to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeOffset {
    /// Fixed offset east of UTC.
    UtcOffset(Duration),
    /// Named zone, resolved against the zone database.
    TimeZone(TimeZone),
}

/// A civil date and time, optionally anchored to a zone or fixed offset.
///
/// `time_offset: None` means UTC. In JSON the offset is not nested: the
/// object carries either a `utcOffset` or a `timeZone` key next to the
/// civil fields, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateTimeJson", into = "DateTimeJson")]
pub struct DateTime {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    pub nanos: i32,
    pub time_offset: Option<TimeOffset>,
}

/// JSON layout of [`DateTime`], with the offset oneof spread over two keys.
#[derive(Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DateTimeJson {
    year: i32,
    month: i32,
    day: i32,
    hours: i32,
    minutes: i32,
    seconds: i32,
    nanos: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    utc_offset: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_zone: Option<TimeZone>,
}

impl TryFrom<DateTimeJson> for DateTime {
    type Error = DateTimeError;

    fn try_from(json: DateTimeJson) -> Result<Self> {
        let time_offset = match (json.utc_offset, json.time_zone) {
            (Some(_), Some(_)) => {
                return Err(DateTimeError::InvalidValue("both utcOffset and timeZone set"));
            }
            (Some(offset), None) => Some(TimeOffset::UtcOffset(offset)),
            (None, Some(tz)) => Some(TimeOffset::TimeZone(tz)),
            (None, None) => None,
        };
        Ok(Self {
            year: json.year,
            month: json.month,
            day: json.day,
            hours: json.hours,
            minutes: json.minutes,
            seconds: json.seconds,
            nanos: json.nanos,
            time_offset,
        })
    }
}

impl From<DateTime> for DateTimeJson {
    fn from(dt: DateTime) -> Self {
        let (utc_offset, time_zone) = match dt.time_offset {
            Some(TimeOffset::UtcOffset(offset)) => (Some(offset), None),
            Some(TimeOffset::TimeZone(tz)) => (None, Some(tz)),
            None => (None, None),
        };
        Self {
            year: dt.year,
            month: dt.month,
            day: dt.day,
            hours: dt.hours,
            minutes: dt.minutes,
            seconds: dt.seconds,
            nanos: dt.nanos,
            utc_offset,
            time_zone,
        }
    }
}

impl DateTime {
    /// True when year, month and day are all set (at least 1).
    pub fn is_set(&self) -> bool {
        self.year >= 1 && self.month >= 1 && self.day >= 1
    }

    pub fn time_zone(&self) -> Option<&TimeZone> {
        match &self.time_offset {
            Some(TimeOffset::TimeZone(tz)) => Some(tz),
            _ => None,
        }
    }

    pub fn utc_offset(&self) -> Option<&Duration> {
        match &self.time_offset {
            Some(TimeOffset::UtcOffset(offset)) => Some(offset),
            _ => None,
        }
    }
}

/// A time of day with no date or zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOfDay {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    pub nanos: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_is_set_requires_all_fields() {
        assert!(Date::new(1, 1, 1).is_set());
        assert!(!Date::default().is_set());
        assert!(!Date::new(2012, 0, 21).is_set());
        assert!(!Date::new(2012, 4, 0).is_set());
    }

    #[test]
    fn datetime_offset_accessors() {
        let mut dt = DateTime {
            year: 2012,
            month: 4,
            day: 21,
            ..Default::default()
        };
        assert!(dt.time_zone().is_none());
        assert!(dt.utc_offset().is_none());

        dt.time_offset = Some(TimeOffset::TimeZone(TimeZone::new("Europe/Berlin")));
        assert_eq!(dt.time_zone().map(|tz| tz.id.as_str()), Some("Europe/Berlin"));
        assert!(dt.utc_offset().is_none());

        dt.time_offset = Some(TimeOffset::UtcOffset(Duration::from_seconds(3600)));
        assert!(dt.time_zone().is_none());
        assert_eq!(dt.utc_offset().map(|d| d.seconds), Some(3600));
    }

    #[test]
    fn datetime_json_shape() {
        let dt = DateTime {
            year: 2012,
            month: 4,
            day: 21,
            hours: 11,
            minutes: 30,
            seconds: 0,
            nanos: 0,
            time_offset: Some(TimeOffset::TimeZone(TimeZone::new("America/New_York"))),
        };

        let json = serde_json::to_value(&dt).unwrap();
        assert_eq!(json["timeZone"]["id"], "America/New_York");
        assert_eq!(json["hours"], 11);
        assert!(json.get("timeOffset").is_none());

        let recovered: DateTime = serde_json::from_value(json).unwrap();
        assert_eq!(recovered, dt);
    }

    #[test]
    fn datetime_without_offset_omits_field() {
        let json = r#"{"year": 2006, "month": 1, "day": 2}"#;
        let dt: DateTime = serde_json::from_str(json).unwrap();
        assert_eq!(dt.hours, 0);
        assert!(dt.time_offset.is_none());

        let out = serde_json::to_string(&dt).unwrap();
        assert!(!out.contains("utcOffset"));
        assert!(!out.contains("timeZone"));
    }

    #[test]
    fn reads_protobuf_json_offsets() {
        let json = r#"{"year":2012,"month":4,"day":21,"hours":11,"utcOffset":"18000s"}"#;
        let dt: DateTime = serde_json::from_str(json).unwrap();
        assert_eq!(dt.hours, 11);
        assert_eq!(dt.utc_offset(), Some(&Duration::from_seconds(18000)));
        assert_eq!(serde_json::to_value(&dt).unwrap()["utcOffset"], "18000s");

        let json = r#"{"timeZone":{"id":"Europe/Berlin"}}"#;
        let dt: DateTime = serde_json::from_str(json).unwrap();
        assert_eq!(dt.year, 0);
        assert_eq!(dt.time_zone(), Some(&TimeZone::new("Europe/Berlin")));
    }

    #[test]
    fn unset_messages_read_from_empty_objects() {
        assert_eq!(serde_json::from_str::<Date>("{}").unwrap(), Date::default());
        assert_eq!(serde_json::from_str::<DateTime>("{}").unwrap(), DateTime::default());
        assert_eq!(serde_json::from_str::<TimeOfDay>("{}").unwrap(), TimeOfDay::default());
    }

    #[test]
    fn duration_strings() {
        let d = |seconds, nanos| Duration { seconds, nanos };
        let cases = [
            (d(18000, 0), "18000s"),
            (d(-10800, 0), "-10800s"),
            (d(1, 500_000_000), "1.500s"),
            (d(0, -1_000), "-0.000001s"),
            (d(2, 1), "2.000000001s"),
        ];
        for (duration, text) in cases {
            assert_eq!(duration.to_string(), text);
            assert_eq!(text.parse::<Duration>().unwrap(), duration);
        }
        assert_eq!("1.5s".parse::<Duration>().unwrap().nanos, 500_000_000);

        for bad in ["", "s", "18000", "1.s", ".5s", "1.0000000001s", "+1s", "1e3s", "--1s"] {
            assert!(bad.parse::<Duration>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn malformed_offsets_in_json_are_errors() {
        let json = r#"{"year":2012,"month":4,"day":21,"utcOffset":{"seconds":18000}}"#;
        assert!(serde_json::from_str::<DateTime>(json).is_err());

        let json = r#"{"year":2012,"utcOffset":"3600s","timeZone":{"id":"Europe/Berlin"}}"#;
        assert!(serde_json::from_str::<DateTime>(json).is_err());
    }
}
