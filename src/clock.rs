// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time sources.
//!
//! Loggers read the wall clock through the [`Clock`] trait so that timestamps and rotation
//! buckets can be pinned in tests.  Time is local, as the rotation buckets follow the user's
//! calendar day.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt::Debug;

pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/**
A clock stuck at one instant.

```
use xtiloger::clock::{Clock, FixedClock};
let clock = FixedClock::from_ymd_hms(2024, 12, 5, 9, 30, 0).unwrap();
assert_eq!(clock.now().date_naive().to_string(), "2024-12-05");
```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// Local wall time; `None` if the date is invalid or the time does not exist locally.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        let naive: NaiveDateTime = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, min, sec)?;
        Local.from_local_datetime(&naive).earliest().map(FixedClock)
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
