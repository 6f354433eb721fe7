//! Core library for classcal.
//!
//! Turns the text a scheduler page shows for a student's classes into an
//! iCalendar document with one weekly recurring event per class meeting day:
//! - `raw` splits the scraped text blocks into section lines and rooms
//! - `time`, `section` and `weekday` normalize each meeting pattern
//! - `expand` turns sections into recurring events with reminders
//! - `ics` writes the calendar
//! - `pipeline` runs all of the above for one snapshot

pub mod calendar;
pub mod config;
pub mod error;
pub mod expand;
pub mod ics;
pub mod pipeline;
pub mod raw;
pub mod section;
pub mod time;
pub mod weekday;

pub use calendar::CalendarDocument;
pub use config::SemesterConfig;
pub use error::{ScheduleError, ScheduleResult};
pub use expand::{Alarm, CalendarEvent, EventExpander, Recurrence};
pub use pipeline::Pipeline;
pub use raw::RawSnapshot;
pub use section::SectionDescriptor;
pub use weekday::{AnchorTable, Weekday, WeekdayValidation};
