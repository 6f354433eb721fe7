//! The in-memory calendar built during one run.

use crate::error::ScheduleResult;
use crate::expand::CalendarEvent;
use crate::ics::generate_ics;

/// Ordered collection of events for one schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarDocument {
    name: Option<String>,
    events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name written as the calendar's name property.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn push(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serialize to iCalendar text.
    pub fn to_ics(&self) -> ScheduleResult<String> {
        generate_ics(self)
    }
}

impl Extend<CalendarEvent> for CalendarDocument {
    fn extend<I: IntoIterator<Item = CalendarEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}
