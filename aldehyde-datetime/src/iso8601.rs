//! ISO-8601 text in and out.
//!
//! Output always uses the extended patterns `YYYY-MM-DD` and
//! `YYYY-MM-DDTHH:MM:SS` followed by `Z` or `±HH:MM`. Input accepts a wider
//! grammar, see [`StrictParser`].

use chrono::{Datelike, FixedOffset, NaiveDate, Timelike};
use log::debug;

use crate::error::{ParseError, ParseErrorKind as Kind, Result};
use crate::zone::{FixedZone, Zone};
use crate::zoned::ZonedTime;

/// `YYYY-MM-DD` in the time's own zone.
pub fn format_date(t: &ZonedTime) -> String {
    let local = t.naive_local();
    format!("{:04}-{:02}-{:02}", local.year(), local.month(), local.day())
}

/// `YYYY-MM-DDTHH:MM:SS` plus `Z` or `±HH:MM`, in the time's own zone.
pub fn format_date_time(t: &ZonedTime) -> String {
    let local = t.naive_local();
    let mut out = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute(),
        local.second()
    );
    push_offset(&mut out, t.offset());
    out
}

/// [`format_date_time`] after moving `t` into `zone`.
pub fn format_date_time_in(t: &ZonedTime, zone: &Zone) -> String {
    format_date_time(&t.in_zone(zone.clone()))
}

pub fn format_date_opt(t: Option<&ZonedTime>) -> Option<String> {
    t.map(format_date)
}

pub fn format_date_time_opt(t: Option<&ZonedTime>) -> Option<String> {
    t.map(format_date_time)
}

pub fn format_date_time_in_opt(t: Option<&ZonedTime>, zone: &Zone) -> Option<String> {
    t.map(|t| format_date_time_in(t, zone))
}

fn push_offset(out: &mut String, offset: FixedOffset) {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        out.push('Z');
        return;
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    out.push(sign);
    out.push_str(&format!("{:02}:{:02}", minutes / 60, minutes % 60));
}

/// Reads ISO-8601 text into a [`ZonedTime`], keeping the written offset.
pub trait Iso8601Parser {
    fn parse(&self, text: &str) -> std::result::Result<ZonedTime, ParseError>;
}

impl<P: Iso8601Parser + ?Sized> Iso8601Parser for &P {
    fn parse(&self, text: &str) -> std::result::Result<ZonedTime, ParseError> {
        (*self).parse(text)
    }
}

/// The default parser.
///
/// Accepted forms:
/// - `YYYY-MM-DD` or `YYYYMMDD`
/// - optionally followed by `T` and `HH`, `HH:MM`, `HH:MM:SS`, `HHMM` or
///   `HHMMSS`, with an optional `.` or `,` fraction (nanoseconds past the
///   ninth digit are dropped)
/// - optionally followed by `Z`, `±HH`, `±HH:MM` or `±HHMM`
///
/// Text without a zone, or with a zero offset, is UTC. Any other offset gives
/// an unnamed [`FixedZone`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictParser;

impl Iso8601Parser for StrictParser {
    fn parse(&self, text: &str) -> std::result::Result<ZonedTime, ParseError> {
        Cursor::new(text).parse()
    }
}

/// Parses `text`, keeping whatever offset it was written with.
pub fn parse(text: &str) -> Result<ZonedTime> {
    parse_with(&StrictParser, text)
}

/// Parses `text` and moves the result to UTC.
pub fn parse_utc(text: &str) -> Result<ZonedTime> {
    parse_utc_with(&StrictParser, text)
}

pub fn parse_with(parser: &impl Iso8601Parser, text: &str) -> Result<ZonedTime> {
    parser.parse(text).map_err(|e| {
        debug!("{e}");
        e.into()
    })
}

pub fn parse_utc_with(parser: &impl Iso8601Parser, text: &str) -> Result<ZonedTime> {
    Ok(parse_with(parser, text)?.to_utc())
}

type PResult<T> = std::result::Result<T, ParseError>;

struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn err(&self, kind: Kind) -> ParseError {
        ParseError::new(kind, self.pos, self.text)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_digit(&self) -> bool {
        self.peek().is_some_and(|b| b.is_ascii_digit())
    }

    fn eat(&mut self, wanted: &[u8]) -> Option<u8> {
        let b = self.peek().filter(|b| wanted.contains(b))?;
        self.pos += 1;
        Some(b)
    }

    /// Exactly `n` ASCII digits.
    fn number(&mut self, n: usize, missing: Kind) -> PResult<u32> {
        let digits = self
            .bytes
            .get(self.pos..self.pos + n)
            .filter(|d| d.iter().all(u8::is_ascii_digit))
            .ok_or_else(|| self.err(missing))?;
        let value = digits.iter().fold(0, |acc, d| acc * 10 + u32::from(d - b'0'));
        self.pos += n;
        Ok(value)
    }

    /// A two-digit field with an upper bound; the error points at the field.
    fn bounded(&mut self, max: u32, missing: Kind, out_of_range: Kind) -> PResult<u32> {
        let start = self.pos;
        let value = self.number(2, missing)?;
        if value > max {
            self.pos = start;
            return Err(self.err(out_of_range));
        }
        Ok(value)
    }

    fn parse(mut self) -> PResult<ZonedTime> {
        let date = self.date()?;

        let (mut hour, mut minute, mut second, mut nano) = (0, 0, 0, 0);
        if self.eat(b"Tt").is_some() {
            hour = self.bounded(23, Kind::MissingHours, Kind::HoursOutOfRange)?;
            let extended = self.eat(b":").is_some();
            if extended || self.peek_digit() {
                minute = self.bounded(59, Kind::MissingMinutes, Kind::MinutesOutOfRange)?;
                let more = if extended { self.eat(b":").is_some() } else { self.peek_digit() };
                if more {
                    second = self.bounded(59, Kind::MissingSeconds, Kind::SecondsOutOfRange)?;
                    if self.eat(b".,").is_some() {
                        nano = self.fraction()?;
                    }
                }
            }
        }

        let zone = self.zone()?;
        if self.pos != self.bytes.len() {
            return Err(self.err(Kind::UnexpectedInput));
        }

        let local = date
            .and_hms_nano_opt(hour, minute, second, nano)
            .ok_or_else(|| self.err(Kind::UnexpectedInput))?;
        let utc = zone
            .to_utc(&local)
            .ok_or_else(|| self.err(Kind::UnexpectedInput))?;
        Ok(ZonedTime::from_naive_utc(utc, zone))
    }

    fn date(&mut self) -> PResult<NaiveDate> {
        let year = self.number(4, Kind::MissingYear)?;
        let extended = self.eat(b"-").is_some();
        let month = self.bounded(12, Kind::MissingMonth, Kind::MonthOutOfRange)?;
        if month == 0 {
            self.pos -= 2;
            return Err(self.err(Kind::MonthOutOfRange));
        }
        if extended && self.eat(b"-").is_none() {
            return Err(self.err(Kind::MissingDay));
        }
        let day_start = self.pos;
        let day = self.number(2, Kind::MissingDay)?;
        // year is at most 9999, so the cast cannot wrap.
        NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| {
            self.pos = day_start;
            self.err(Kind::DayOutOfRange)
        })
    }

    fn fraction(&mut self) -> PResult<u32> {
        if !self.peek_digit() {
            return Err(self.err(Kind::MissingFraction));
        }
        let mut nano = 0;
        let mut scale = 100_000_000;
        while let Some(d) = self.peek().filter(u8::is_ascii_digit) {
            nano += u32::from(d - b'0') * scale;
            scale /= 10;
            self.pos += 1;
        }
        Ok(nano)
    }

    fn zone(&mut self) -> PResult<Zone> {
        let Some(sign) = self.eat(b"Zz+-") else {
            return Ok(Zone::Utc);
        };
        if matches!(sign, b'Z' | b'z') {
            return Ok(Zone::Utc);
        }

        let hours = self.bounded(23, Kind::InvalidOffset, Kind::InvalidOffset)?;
        let minutes = if self.eat(b":").is_some() || self.peek_digit() {
            self.bounded(59, Kind::InvalidOffset, Kind::InvalidOffset)?
        } else {
            0
        };

        let seconds = (hours * 3600 + minutes * 60) as i32;
        let seconds = if sign == b'-' { -seconds } else { seconds };
        if seconds == 0 {
            return Ok(Zone::Utc);
        }
        FixedOffset::east_opt(seconds)
            .map(|offset| Zone::Fixed(FixedZone::unnamed(offset)))
            .ok_or_else(|| self.err(Kind::InvalidOffset))
    }
}
