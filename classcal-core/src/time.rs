//! 12-hour clock strings ("1:00PM") to 24-hour clock times ("13:00").

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A time string that is not `H:MM` followed by AM or PM.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not parse time {input:?}: {reason}")]
pub struct TimeError {
    pub input: String,
    pub reason: String,
}

/// How the AM half of the twelve o'clock hour is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HourConvention {
    /// Only PM hours are shifted, so "12:30AM" stays at hour 12.
    /// This matches the schedules the scraper has always produced.
    #[default]
    PmOnly,
    /// Conventional clock: "12:30AM" becomes "0:30".
    Standard,
}

/// A wall-clock time of day, displayed as unpadded-hour `H:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

/// Convert `"H:MM"`/`"HH:MM"` followed by an AM/PM marker into a 24-hour time.
///
/// The marker may be attached (`"1:00PM"`) or separated by whitespace
/// (`"1:00 PM"`). The minute is the two characters after the colon.
pub fn to_24_hour(input: &str, convention: HourConvention) -> Result<ClockTime, TimeError> {
    let fail = |reason: &str| TimeError {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (hour_part, rest) = input.trim().split_once(':').ok_or_else(|| fail("missing ':'"))?;

    let hour: u32 = hour_part
        .trim()
        .parse()
        .map_err(|_| fail("hour is not a number"))?;
    if !(1..=12).contains(&hour) {
        return Err(fail("hour must be between 1 and 12"));
    }

    let minute_text = rest.get(..2).ok_or_else(|| fail("minute needs two digits"))?;
    let minute: u32 = minute_text
        .parse()
        .map_err(|_| fail("minute is not a number"))?;

    let is_pm = match rest[2..].trim().to_ascii_uppercase().as_str() {
        "PM" => true,
        "AM" => false,
        _ => return Err(fail("expected AM or PM marker")),
    };

    let hour = match (is_pm, hour, convention) {
        (true, 12, _) => 12,
        (true, h, _) => h + 12,
        (false, 12, HourConvention::Standard) => 0,
        (false, h, _) => h,
    };

    ClockTime::new(hour, minute).ok_or_else(|| fail("minute must be below 60"))
}
