//! Clock source for event timestamps
//!
//! A trait seam so the sampler can run against a scripted clock in tests.
//! A failed read surfaces to the caller, which skips the tick rather than
//! fabricating a timestamp.

use crate::domain::types::ClockReading;
use chrono::{Datelike, Local, Timelike};

/// Source of date/time readings
pub trait Clock: Send {
    fn now(&self) -> anyhow::Result<ClockReading>;
}

/// Production clock backed by system local time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> anyhow::Result<ClockReading> {
        let now = Local::now();
        Ok(ClockReading {
            year: now.year() as u16,
            month: now.month() as u8,
            day: now.day() as u8,
            weekday: now.weekday().num_days_from_monday() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        })
    }
}
