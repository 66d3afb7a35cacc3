use chrono::Utc;

use crate::calendar::time_to_date;
use crate::wire::Date;
use crate::zoned::ZonedTime;

/// Source of "now", passed to whatever needs the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> ZonedTime;

    /// Today's calendar day in the zone `now` reports.
    fn today(&self) -> Date {
        time_to_date(&self.now())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> ZonedTime {
        (*self).now()
    }
}

/// Reads the system clock on every call and reports UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> ZonedTime {
        ZonedTime::from(Utc::now())
    }
}

/// Always reports the instant it was built with.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: ZonedTime,
}

impl FixedClock {
    pub fn new(now: ZonedTime) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> ZonedTime {
        self.now.clone()
    }
}
