//! ICS generation for class calendars.

mod generate;

pub use generate::generate_ics;
