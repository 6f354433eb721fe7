//! ICS file generation.

use icalendar::{Alarm, Calendar, Component, EventLike, Trigger};

use crate::calendar::CalendarDocument;
use crate::error::{ScheduleError, ScheduleResult};
use crate::expand::CalendarEvent;

const PRODID: &str = "-//classcal//Class Schedule//EN";

/// Generate .ics content for a whole class calendar.
///
/// Every VEVENT carries its VALARM as a nested component, so the alarm is
/// always the last thing before `END:VEVENT`.
pub fn generate_ics(document: &CalendarDocument) -> ScheduleResult<String> {
    let mut cal = Calendar::new();

    if let Some(name) = document.name() {
        cal.name(name);
    }

    for event in document.events() {
        if event.end <= event.start {
            return Err(ScheduleError::IcsGenerate(format!(
                "'{}' ends at {} before it starts at {}",
                event.summary, event.end, event.start
            )));
        }
        cal.push(to_ics_event(event));
    }

    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

fn to_ics_event(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);
    ics_event.location(&event.location);

    // DTSTAMP - required by RFC 5545
    let dtstamp = event.created_at.format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    // Floating local times: classes meet at campus wall-clock time
    ics_event.add_property("DTSTART", event.start.format("%Y%m%dT%H%M%S").to_string());
    ics_event.add_property("DTEND", event.end.format("%Y%m%dT%H%M%S").to_string());

    ics_event.add_property("RRULE", event.recurrence.to_rrule());

    let trigger = Trigger::before_start(event.alarm.offset());
    ics_event.alarm(Alarm::display(&event.alarm.description, trigger));

    ics_event.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::{Alarm as ClassAlarm, EventExpander};
    use crate::section::SectionDescriptor;
    use crate::time::ClockTime;
    use crate::weekday::AnchorTable;
    use chrono::{TimeZone, Utc};

    fn document(weekday_code: &str) -> CalendarDocument {
        let section = SectionDescriptor {
            class_name: "COMP SCI 300".to_string(),
            section_type: "LEC".to_string(),
            weekday_code: weekday_code.to_string(),
            start_time: ClockTime::new(13, 0).unwrap(),
            end_time: ClockTime::new(13, 50).unwrap(),
            location: "Room 1240".to_string(),
        };
        let events = EventExpander::new(AnchorTable::fall_2019())
            .with_created_at(Utc.with_ymd_and_hms(2019, 8, 30, 12, 0, 0).unwrap())
            .expand(&section)
            .unwrap();

        let mut doc = CalendarDocument::new().with_name("Fall 2019");
        doc.extend(events);
        doc
    }

    #[test]
    fn test_generate_ics_event_fields() {
        let ics = generate_ics(&document("M")).unwrap();
        println!("Generated ICS:\n{}", ics);

        assert!(ics.starts_with("BEGIN:VCALENDAR"), "ICS:\n{}", ics);
        assert!(ics.trim_end().ends_with("END:VCALENDAR"), "ICS:\n{}", ics);
        assert!(ics.contains("PRODID:-//classcal//Class Schedule//EN"));
        assert!(ics.contains("Fall 2019"), "calendar name missing. ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:COMP SCI 300 LEC"));
        assert!(ics.contains("LOCATION:Room 1240"));
        assert!(ics.contains("DTSTART:20190909T130000"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20190909T135000"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTAMP:20190830T120000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("RRULE:FREQ=WEEKLY;COUNT=14"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_wednesday_rule_has_fifteen_occurrences() {
        let ics = generate_ics(&document("W")).unwrap();
        assert!(ics.contains("RRULE:FREQ=WEEKLY;COUNT=15"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTART:20190904T130000"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_every_event_has_one_alarm_before_its_end() {
        let ics = generate_ics(&document("MTWRF")).unwrap();
        let lines: Vec<&str> = ics.lines().collect();

        let events = lines.iter().filter(|l| **l == "BEGIN:VEVENT").count();
        let alarms = lines.iter().filter(|l| **l == "BEGIN:VALARM").count();
        assert_eq!(events, 5);
        assert_eq!(alarms, events, "ICS:\n{}", ics);

        for (i, line) in lines.iter().enumerate() {
            if *line == "END:VEVENT" {
                assert_eq!(
                    lines[i - 1], "END:VALARM",
                    "alarm must close right before END:VEVENT. ICS:\n{}",
                    ics
                );
            }
        }
    }

    #[test]
    fn test_alarm_is_minimal_display_reminder() {
        let ics = generate_ics(&document("M")).unwrap();

        let valarm_section: String = ics
            .split("BEGIN:VALARM")
            .nth(1)
            .unwrap()
            .split("END:VALARM")
            .next()
            .unwrap()
            .to_string();

        assert!(valarm_section.contains("ACTION:DISPLAY"), "Got:\n{}", valarm_section);
        assert!(valarm_section.contains("DESCRIPTION:REMINDER"), "Got:\n{}", valarm_section);
        let trigger = valarm_section
            .lines()
            .find(|l| l.starts_with("TRIGGER"))
            .expect("Should have TRIGGER line");
        assert!(trigger.contains("-P"), "trigger should fire before start: {}", trigger);
        assert!(
            trigger.contains("15M") || trigger.contains("900S"),
            "trigger should be 15 minutes: {}",
            trigger
        );
        assert!(!valarm_section.contains("UID:"), "Got:\n{}", valarm_section);
        assert!(!valarm_section.contains("DTSTAMP:"), "Got:\n{}", valarm_section);
    }

    #[test]
    fn test_custom_alarm_description() {
        let mut doc = CalendarDocument::new();
        let mut event = document("M").events()[0].clone();
        event.alarm = ClassAlarm::new(5, "Walk to class");
        doc.push(event);

        let ics = generate_ics(&doc).unwrap();
        assert!(ics.contains("DESCRIPTION:Walk to class"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_empty_document_is_still_a_calendar() {
        let ics = generate_ics(&CalendarDocument::new()).unwrap();
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("END:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn test_event_ending_before_start_is_rejected() {
        let mut doc = CalendarDocument::new();
        let mut event = document("M").events()[0].clone();
        event.end = event.start;
        doc.push(event);

        let err = generate_ics(&doc).unwrap_err();
        assert!(matches!(err, ScheduleError::IcsGenerate(_)), "got {err:?}");
    }
}
