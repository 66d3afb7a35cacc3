use std::fmt;

use chrono::{FixedOffset, NaiveDateTime, Offset, TimeDelta, TimeZone as _};
use chrono_tz::Tz;
use log::debug;

use crate::error::{DateTimeError, Result};

/// The zone a [`ZonedTime`](crate::ZonedTime) is observed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Zone {
    Utc,
    /// A zone-database zone, e.g. `Europe/Berlin`.
    Named(Tz),
    /// A fixed offset with an optional label.
    Fixed(FixedZone),
}

/// A constant UTC offset with a display label.
///
/// Offsets read from ISO-8601 text carry an empty label; offsets built from a
/// structured date-time are labelled `UTC+H` / `UTC-H`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedZone {
    name: String,
    offset: FixedOffset,
}

impl FixedZone {
    pub fn new(name: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }

    /// A fixed zone without a label.
    pub fn unnamed(offset: FixedOffset) -> Self {
        Self::new(String::new(), offset)
    }

    /// A fixed zone labelled `UTC±H`, where `H` is the offset in whole hours
    /// rounded toward zero.
    ///
    /// Returns `None` when the offset is a day or more.
    pub fn from_offset_seconds(seconds: i64) -> Option<Self> {
        let offset = FixedOffset::east_opt(i32::try_from(seconds).ok()?)?;
        Some(Self::new(format!("UTC{:+}", seconds / 3600), offset))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Zone {
    /// The process's local zone. See [`crate::config::local_zone`].
    pub fn local() -> Self {
        crate::config::local_zone()
    }

    /// Resolves a zone-database identifier using [`ZoneDatabase`].
    pub fn named(id: &str) -> Result<Self> {
        ZoneDatabase.resolve(id)
    }

    /// `"UTC"` for UTC, the identifier for a named zone, the label for a fixed
    /// zone (possibly empty).
    pub fn name(&self) -> &str {
        match self {
            Zone::Utc => "UTC",
            Zone::Named(tz) => tz.name(),
            Zone::Fixed(fixed) => fixed.name(),
        }
    }

    /// Offset in force at the given UTC instant.
    pub(crate) fn offset_at(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            Zone::Utc => chrono::Utc.fix(),
            Zone::Named(tz) => tz.offset_from_utc_datetime(utc).fix(),
            Zone::Fixed(fixed) => fixed.offset,
        }
    }

    /// Maps a wall-clock reading in this zone to UTC.
    ///
    /// Ambiguous readings (clocks turned back) take the earlier instant.
    /// Readings inside a gap (clocks turned forward) are read with the offset
    /// in force before the transition, which moves them forward by the gap.
    pub(crate) fn to_utc(&self, local: &NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Zone::Utc => Some(*local),
            Zone::Named(tz) => match tz.from_local_datetime(local).earliest() {
                Some(dt) => Some(dt.naive_utc()),
                None => {
                    let probe = local.checked_sub_signed(TimeDelta::days(1))?;
                    let before = tz.offset_from_utc_datetime(&probe).fix();
                    sub_offset(local, before)
                }
            },
            Zone::Fixed(fixed) => sub_offset(local, fixed.offset),
        }
    }
}

fn sub_offset(local: &NaiveDateTime, offset: FixedOffset) -> Option<NaiveDateTime> {
    local.checked_sub_signed(TimeDelta::seconds(offset.local_minus_utc().into()))
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Fixed(fixed) if fixed.name.is_empty() => write!(f, "{}", fixed.offset),
            _ => f.write_str(self.name()),
        }
    }
}

/// Turns a zone identifier into a [`Zone`].
pub trait ZoneResolver {
    fn resolve(&self, id: &str) -> Result<Zone>;
}

impl<R: ZoneResolver + ?Sized> ZoneResolver for &R {
    fn resolve(&self, id: &str) -> Result<Zone> {
        (*self).resolve(id)
    }
}

/// Resolver backed by the IANA database compiled into `chrono-tz`.
///
/// The empty identifier and `"UTC"` resolve to [`Zone::Utc`], `"Local"` to
/// [`Zone::local`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneDatabase;

impl ZoneResolver for ZoneDatabase {
    fn resolve(&self, id: &str) -> Result<Zone> {
        match id {
            "" | "UTC" => return Ok(Zone::Utc),
            "Local" => return Ok(Zone::local()),
            _ => {}
        }
        id.parse::<Tz>().map(Zone::Named).map_err(|_| {
            debug!("time zone {id:?} not found in zone database");
            DateTimeError::UnknownTimeZone(id.to_string())
        })
    }
}
