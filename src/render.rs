//! Colored terminal rendering for classcal-core types.

use chrono::NaiveDateTime;
use classcal_core::{CalendarEvent, SectionDescriptor};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for SectionDescriptor {
    fn render(&self) -> String {
        format!(
            "{} {} {} {}",
            self.summary().bold(),
            self.weekday_code.cyan(),
            format!("{}-{}", self.start_time, self.end_time).yellow(),
            format!("@ {}", self.location).dimmed()
        )
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let start = self.start.format("%a %-H:%M").to_string();
        format!("{} {} {}", "+".green(), self.summary.green(), start.dimmed())
    }
}

/// Summarize expanded meeting dates, e.g. `14 meetings, Mon Sep 9 → Mon Dec 9`.
pub fn render_meetings(meetings: &[NaiveDateTime]) -> String {
    match (meetings.first(), meetings.last()) {
        (Some(first), Some(last)) => format!(
            "{} {}, {} → {}",
            meetings.len(),
            pluralize("meeting", meetings.len()),
            first.format("%a %b %-d"),
            last.format("%a %b %-d")
        ),
        _ => "no meetings".to_string(),
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
