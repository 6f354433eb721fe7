//! Error types for the schedule pipeline.

use thiserror::Error;

use crate::time::TimeError;

/// Errors that can occur while turning a scraped schedule into a calendar.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A raw block is missing the class name or schedule line.
    #[error("Malformed record ({lines} line(s), need at least 3): {record:?}")]
    MalformedRecord { record: String, lines: usize },

    #[error("Malformed section line for {class_name}: {line:?} (expected TYPE DAYS START-END)")]
    MalformedSectionLine { class_name: String, line: String },

    #[error("Invalid time for {class_name} {section_type}: {source}")]
    TimeParse {
        class_name: String,
        section_type: String,
        #[source]
        source: TimeError,
    },

    #[error("No location found for {class_name} {section_type}")]
    LocationNotFound {
        class_name: String,
        section_type: String,
    },

    /// A weekday letter outside M/T/W/R/F under strict validation.
    #[error("Unknown weekday code '{code}' for {section}")]
    UnknownWeekday { section: String, code: char },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
