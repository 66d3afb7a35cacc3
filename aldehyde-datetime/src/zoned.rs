use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};

use crate::error::{DateTimeError, Result};
use crate::zone::Zone;

/// An instant together with the zone it is observed in.
///
/// Two values are equal only when both the instant and the zone match, so
/// `2006-01-02T22:04:05Z` and `2006-01-03T05:04:05+07:00` differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedTime {
    utc: NaiveDateTime,
    zone: Zone,
    offset: FixedOffset,
}

impl ZonedTime {
    /// The instant `utc` observed in `zone`.
    pub fn from_utc(utc: DateTime<Utc>, zone: Zone) -> Self {
        Self::from_naive_utc(utc.naive_utc(), zone)
    }

    pub(crate) fn from_naive_utc(utc: NaiveDateTime, zone: Zone) -> Self {
        let offset = zone.offset_at(&utc);
        Self { utc, zone, offset }
    }

    /// The instant whose wall-clock reading in `zone` is `local`.
    pub fn from_local(local: NaiveDateTime, zone: Zone) -> Result<Self> {
        let utc = zone.to_utc(&local).ok_or(DateTimeError::OutOfRange)?;
        Ok(Self::from_naive_utc(utc, zone))
    }

    /// Builds a time from possibly out-of-range civil fields.
    ///
    /// Fields carry into the next larger unit: month 13 is January of the
    /// following year, day 0 is the last day of the previous month, hour 24
    /// is midnight of the next day.
    #[allow(clippy::too_many_arguments)]
    pub fn from_fields(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        nanosecond: i32,
        zone: Zone,
    ) -> Result<Self> {
        let local = normalize(year, month, day, hour, minute, second, nanosecond)
            .ok_or(DateTimeError::OutOfRange)?;
        Self::from_local(local, zone)
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Offset from UTC at this instant.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn zone_name(&self) -> &str {
        self.zone.name()
    }

    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        self.utc.and_utc()
    }

    /// Wall-clock reading in this time's zone.
    pub fn naive_local(&self) -> NaiveDateTime {
        // Offsets are under a day, so this stays in range for any value we build.
        self.utc
            .checked_add_signed(TimeDelta::seconds(self.offset.local_minus_utc().into()))
            .unwrap_or(self.utc)
    }

    /// The same instant observed in another zone.
    pub fn in_zone(&self, zone: Zone) -> Self {
        Self::from_naive_utc(self.utc, zone)
    }

    /// The same instant observed in UTC.
    pub fn to_utc(&self) -> Self {
        self.in_zone(Zone::Utc)
    }

    pub fn year(&self) -> i32 {
        self.naive_local().year()
    }

    pub fn month(&self) -> u32 {
        self.naive_local().month()
    }

    pub fn day(&self) -> u32 {
        self.naive_local().day()
    }

    pub fn hour(&self) -> u32 {
        self.naive_local().hour()
    }

    pub fn minute(&self) -> u32 {
        self.naive_local().minute()
    }

    pub fn second(&self) -> u32 {
        self.naive_local().second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.naive_local().nanosecond()
    }
}

impl From<DateTime<Utc>> for ZonedTime {
    fn from(utc: DateTime<Utc>) -> Self {
        Self::from_utc(utc, Zone::Utc)
    }
}

impl fmt::Display for ZonedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::iso8601::format_date_time(self))
    }
}

/// Carries out-of-range civil fields into a valid reading.
pub(crate) fn normalize(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
    nanosecond: i32,
) -> Option<NaiveDateTime> {
    let months = i64::from(month) - 1;
    let year = i32::try_from(i64::from(year) + months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;

    let span = TimeDelta::try_days(i64::from(day) - 1)?
        .checked_add(&TimeDelta::try_hours(hour.into())?)?
        .checked_add(&TimeDelta::try_minutes(minute.into())?)?
        .checked_add(&TimeDelta::try_seconds(second.into())?)?
        .checked_add(&TimeDelta::nanoseconds(nanosecond.into()))?;

    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(span)
}
