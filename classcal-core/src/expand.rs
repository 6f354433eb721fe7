//! Expansion of class sections into weekly recurring calendar events.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rrule::RRuleSet;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};
use crate::section::SectionDescriptor;
use crate::weekday::{AnchorTable, Weekday, WeekdayValidation, parse_weekday_code};

/// Minutes before the start of a class that the reminder fires.
pub const DEFAULT_REMINDER_MINUTES: i64 = 15;
pub const DEFAULT_REMINDER_DESCRIPTION: &str = "REMINDER";

/// A display alarm fired before every occurrence of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub minutes_before: i64,
    pub description: String,
}

impl Alarm {
    pub fn new(minutes_before: i64, description: impl Into<String>) -> Self {
        Alarm {
            minutes_before,
            description: description.into(),
        }
    }

    pub fn offset(&self) -> Duration {
        Duration::minutes(self.minutes_before)
    }
}

impl Default for Alarm {
    fn default() -> Self {
        Alarm::new(DEFAULT_REMINDER_MINUTES, DEFAULT_REMINDER_DESCRIPTION)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Weekly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "WEEKLY"),
        }
    }
}

/// A bounded recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub frequency: Frequency,
    pub count: u32,
}

impl Recurrence {
    pub fn weekly(count: u32) -> Self {
        Recurrence {
            frequency: Frequency::Weekly,
            count,
        }
    }

    /// RRULE value, e.g. `FREQ=WEEKLY;COUNT=14`
    pub fn to_rrule(&self) -> String {
        format!("FREQ={};COUNT={}", self.frequency, self.count)
    }
}

/// One weekly meeting of a class section, starting on its weekday's anchor date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub location: String,
    pub weekday: Weekday,
    /// First occurrence, floating local time.
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub recurrence: Recurrence,
    pub alarm: Alarm,
}

impl CalendarEvent {
    /// Start of every occurrence, first to last.
    pub fn occurrences(&self) -> ScheduleResult<Vec<NaiveDateTime>> {
        // The rrule parser wants a zoned DTSTART; UTC keeps the wall-clock value.
        let rule = format!(
            "DTSTART:{}Z\nRRULE:{}",
            self.start.format("%Y%m%dT%H%M%S"),
            self.recurrence.to_rrule()
        );

        let rrule_set: RRuleSet = rule.parse().map_err(|e| {
            ScheduleError::IcsGenerate(format!(
                "Failed to parse RRULE for event '{}': {}",
                self.summary, e
            ))
        })?;

        let limit = u16::try_from(self.recurrence.count).unwrap_or(u16::MAX);
        let result = rrule_set.all(limit);

        Ok(result.dates.iter().map(|dt| dt.naive_utc()).collect())
    }
}

/// Turns sections into events using a semester's anchor table.
#[derive(Debug, Clone)]
pub struct EventExpander<'a> {
    anchors: &'a AnchorTable,
    validation: WeekdayValidation,
    alarm: Alarm,
    created_at: DateTime<Utc>,
    uid_scope: String,
}

impl<'a> EventExpander<'a> {
    pub fn new(anchors: &'a AnchorTable) -> Self {
        EventExpander {
            anchors,
            validation: WeekdayValidation::default(),
            alarm: Alarm::default(),
            created_at: Utc::now(),
            uid_scope: String::new(),
        }
    }

    pub fn with_validation(mut self, validation: WeekdayValidation) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_alarm(mut self, alarm: Alarm) -> Self {
        self.alarm = alarm;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Extra text mixed into event UIDs, typically the term name, so the
    /// same class in two semesters gets different UIDs.
    pub fn with_uid_scope(mut self, scope: impl Into<String>) -> Self {
        self.uid_scope = scope.into();
        self
    }

    /// One event per weekday in the section's code, in M, T, W, R, F order.
    pub fn expand(&self, section: &SectionDescriptor) -> ScheduleResult<Vec<CalendarEvent>> {
        let summary = section.summary();
        let weekdays = parse_weekday_code(&section.weekday_code, &summary, self.validation)?;

        let events: Vec<CalendarEvent> = weekdays
            .into_iter()
            .map(|weekday| {
                let anchor = self.anchors.get(weekday);
                let event = CalendarEvent {
                    uid: self.uid_for(&summary, weekday),
                    summary: summary.clone(),
                    location: section.location.clone(),
                    weekday,
                    start: anchor.first_date.and_time(section.start_time.as_naive()),
                    end: anchor.first_date.and_time(section.end_time.as_naive()),
                    created_at: self.created_at,
                    recurrence: Recurrence::weekly(anchor.occurrences),
                    alarm: self.alarm.clone(),
                };
                debug!(summary = event.summary.as_str(), %weekday, start = %event.start, "expanded event");
                event
            })
            .collect();

        Ok(events)
    }

    fn uid_for(&self, summary: &str, weekday: Weekday) -> String {
        let name = format!("{}/{}/{}", self.uid_scope, summary, weekday);
        format!("{}@classcal", Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()))
    }
}
