//! Normalized class sections built from raw section lines.

use std::fmt;

use crate::error::{ScheduleError, ScheduleResult};
use crate::raw::LocationMap;
use crate::time::{ClockTime, HourConvention, to_24_hour};

/// One meeting pattern of a class (lecture, discussion, lab...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub class_name: String,
    pub section_type: String,
    /// Weekday letters as scraped, e.g. `"MWF"`.
    pub weekday_code: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub location: String,
}

impl SectionDescriptor {
    /// `"COMP SCI 300 LEC"`
    pub fn summary(&self) -> String {
        format!("{} {}", self.class_name, self.section_type)
    }
}

impl fmt::Display for SectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}-{} @ {}",
            self.summary(),
            self.weekday_code,
            self.start_time,
            self.end_time,
            self.location
        )
    }
}

/// Build a section from a line like `"LEC MWF 1:00PM-1:50PM"`.
///
/// Spaces around the dash are tolerated (`"9:55AM - 10:45AM"`).
pub fn build_section(
    class_name: &str,
    line: &str,
    locations: &LocationMap,
    convention: HourConvention,
) -> ScheduleResult<SectionDescriptor> {
    let malformed = || ScheduleError::MalformedSectionLine {
        class_name: class_name.to_string(),
        line: line.to_string(),
    };

    let normalized = collapse_dash_spacing(line);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let [section_type, weekday_code, times] = tokens.as_slice() else {
        return Err(malformed());
    };

    let (start, end) = times.split_once('-').ok_or_else(malformed)?;
    if end.contains('-') {
        return Err(malformed());
    }

    let time_error = |source| ScheduleError::TimeParse {
        class_name: class_name.to_string(),
        section_type: section_type.to_string(),
        source,
    };
    let start_time = to_24_hour(start, convention).map_err(time_error)?;
    let end_time = to_24_hour(end, convention).map_err(time_error)?;

    let location = locations
        .get(class_name, section_type)
        .ok_or_else(|| ScheduleError::LocationNotFound {
            class_name: class_name.to_string(),
            section_type: section_type.to_string(),
        })?;

    Ok(SectionDescriptor {
        class_name: class_name.to_string(),
        section_type: section_type.to_string(),
        weekday_code: weekday_code.to_string(),
        start_time,
        end_time,
        location: location.to_string(),
    })
}

fn collapse_dash_spacing(line: &str) -> String {
    line.split('-').map(str::trim).collect::<Vec<_>>().join("-")
}
