use thiserror::Error;

/// Error type for date/time conversions.
#[derive(Debug, Error)]
pub enum DateTimeError {
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("unknown time zone: {0:?}")]
    UnknownTimeZone(String),

    #[error("date/time out of representable range")]
    OutOfRange,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DateTimeError>;

/// What went wrong while reading ISO-8601 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MissingYear,
    MissingMonth,
    MonthOutOfRange,
    MissingDay,
    DayOutOfRange,
    MissingHours,
    HoursOutOfRange,
    MissingMinutes,
    MinutesOutOfRange,
    MissingSeconds,
    SecondsOutOfRange,
    MissingFraction,
    InvalidOffset,
    UnexpectedInput,
}

impl ParseErrorKind {
    fn describe(self) -> &'static str {
        match self {
            ParseErrorKind::MissingYear => "year missing or malformed",
            ParseErrorKind::MissingMonth => "month missing or malformed",
            ParseErrorKind::MonthOutOfRange => "month out of range",
            ParseErrorKind::MissingDay => "day missing or malformed",
            ParseErrorKind::DayOutOfRange => "day out of range",
            ParseErrorKind::MissingHours => "hours missing or malformed",
            ParseErrorKind::HoursOutOfRange => "hours out of range",
            ParseErrorKind::MissingMinutes => "minutes missing or malformed",
            ParseErrorKind::MinutesOutOfRange => "minutes out of range",
            ParseErrorKind::MissingSeconds => "seconds missing or malformed",
            ParseErrorKind::SecondsOutOfRange => "seconds out of range",
            ParseErrorKind::MissingFraction => "fractional seconds missing or malformed",
            ParseErrorKind::InvalidOffset => "invalid UTC offset",
            ParseErrorKind::UnexpectedInput => "unexpected input",
        }
    }
}

/// ISO-8601 text did not conform to the accepted grammar.
///
/// `position` is the byte offset into `input` where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "cannot parse {input:?} as ISO-8601: {} at byte {position} ({:?})",
    .kind.describe(),
    remainder(.input, .position)
)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
    pub input: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, position: usize, input: &str) -> Self {
        Self {
            kind,
            position,
            input: input.to_string(),
        }
    }
}

fn remainder<'a>(input: &'a str, position: &usize) -> &'a str {
    input.get(*position..).unwrap_or("")
}
