//! End-to-end conversion of a scraped snapshot into a calendar.
//!
//! The run fails on the first bad record, section line, time or missing
//! location; no partial calendar is ever returned.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::calendar::CalendarDocument;
use crate::config::SemesterConfig;
use crate::error::ScheduleResult;
use crate::expand::EventExpander;
use crate::raw::{ParsedSchedule, RawSnapshot};
use crate::section::{SectionDescriptor, build_section};
use crate::weekday::AnchorTable;

pub struct Pipeline {
    config: SemesterConfig,
    anchors: AnchorTable,
    created_at: Option<DateTime<Utc>>,
}

impl Pipeline {
    pub fn new(config: SemesterConfig) -> ScheduleResult<Self> {
        let anchors = config.anchor_table()?;
        Ok(Pipeline {
            config,
            anchors,
            created_at: None,
        })
    }

    /// Fix the DTSTAMP of generated events instead of using the current time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn config(&self) -> &SemesterConfig {
        &self.config
    }

    /// Normalize every section line of every class, in scrape order.
    pub fn sections(&self, parsed: &ParsedSchedule) -> ScheduleResult<Vec<SectionDescriptor>> {
        if parsed.locations.is_empty() && !parsed.classes.is_empty() {
            warn!(classes = parsed.classes.len(), "no class locations were scraped");
        }
        debug!(
            classes = parsed.classes.len(),
            locations = parsed.locations.len(),
            "normalizing sections"
        );

        let mut sections = Vec::new();

        for class in &parsed.classes {
            for line in &class.section_lines {
                sections.push(build_section(
                    &class.class_name,
                    line,
                    &parsed.locations,
                    self.config.hour_convention,
                )?);
            }
        }

        Ok(sections)
    }

    pub fn calendar(&self, sections: &[SectionDescriptor]) -> ScheduleResult<CalendarDocument> {
        let mut expander = EventExpander::new(&self.anchors)
            .with_validation(self.config.weekday_validation)
            .with_alarm(self.config.alarm())
            .with_uid_scope(&self.config.name);
        if let Some(created_at) = self.created_at {
            expander = expander.with_created_at(created_at);
        }

        let mut document = CalendarDocument::new().with_name(&self.config.name);
        for section in sections {
            document.extend(expander.expand(section)?);
        }

        info!(
            sections = sections.len(),
            events = document.len(),
            term = self.config.name.as_str(),
            "built class calendar"
        );

        Ok(document)
    }

    pub fn build(&self, snapshot: &RawSnapshot) -> ScheduleResult<CalendarDocument> {
        let parsed = snapshot.parse()?;
        let sections = self.sections(&parsed)?;
        self.calendar(&sections)
    }

    /// Run the whole pipeline and serialize the result.
    pub fn build_ics(&self, snapshot: &RawSnapshot) -> ScheduleResult<String> {
        self.build(snapshot)?.to_ics()
    }
}
