//! Parsing of the raw text blocks scraped from the scheduler page.
//!
//! Two corpora come in: one block per class with its meeting days and times,
//! and one block per class section with its room. Both are newline-delimited
//! with no further schema, so every block is checked for the lines we need.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ScheduleError, ScheduleResult};

/// Blocks containing this text describe online sections with no meeting room.
pub const ONLINE_MARKER: &str = "Online";

/// Status icon text that the scheduler page renders into location blocks.
pub const STATUS_GLYPH: &str = "check_circle";

const MIN_RECORD_LINES: usize = 3;

/// The two text corpora captured by the scraper, as saved to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub class_with_days: Vec<String>,
    pub class_with_location: Vec<String>,
}

impl RawSnapshot {
    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        serde_json::from_str(json).map_err(|e| ScheduleError::Snapshot(e.to_string()))
    }

    pub fn load(path: &Path) -> ScheduleResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn parse(&self) -> ScheduleResult<ParsedSchedule> {
        parse_class_data(&self.class_with_days, &self.class_with_location)
    }
}

/// The raw section lines of one class, e.g. `["LEC MW 1:00PM-2:15PM", "DIS F 9:55AM-10:45AM"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSections {
    pub class_name: String,
    pub section_lines: Vec<String>,
}

/// Room lookup keyed by `"<class name> <section type>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationMap(HashMap<String, String>);

impl LocationMap {
    pub fn key(class_name: &str, section_type: &str) -> String {
        format!("{} {}", class_name, section_type)
    }

    pub fn insert(&mut self, key: impl Into<String>, location: impl Into<String>) {
        self.0.insert(key.into(), location.into());
    }

    pub fn get(&self, class_name: &str, section_type: &str) -> Option<&str> {
        self.0.get(&Self::key(class_name, section_type)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        LocationMap(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Output of [`parse_class_data`].
#[derive(Debug, Clone, Default)]
pub struct ParsedSchedule {
    /// Classes in the order they were scraped.
    pub classes: Vec<ClassSections>,
    pub locations: LocationMap,
}

/// Split both corpora into per-class section lines and a location lookup.
///
/// Online blocks are dropped from both corpora. A block with fewer than three
/// lines fails the whole parse with `MalformedRecord`.
pub fn parse_class_data(
    class_with_days: &[String],
    class_with_location: &[String],
) -> ScheduleResult<ParsedSchedule> {
    let mut classes: Vec<ClassSections> = Vec::new();

    for block in class_with_days {
        if block.contains(ONLINE_MARKER) {
            debug!(block = block.as_str(), "skipping online class");
            continue;
        }

        let lines = record_lines(block)?;
        let class_name = lines[0].to_string();
        let section_lines: Vec<String> = lines[2..]
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect();

        if class_name.is_empty() || section_lines.is_empty() {
            return Err(malformed(block, lines.len()));
        }

        debug!(class = class_name.as_str(), sections = section_lines.len(), "parsed class");

        // A repeated class replaces the earlier entry in place.
        match classes.iter_mut().find(|c| c.class_name == class_name) {
            Some(existing) => existing.section_lines = section_lines,
            None => classes.push(ClassSections {
                class_name,
                section_lines,
            }),
        }
    }

    let mut locations = LocationMap::default();

    for block in class_with_location {
        if block.contains(ONLINE_MARKER) {
            debug!(block = block.as_str(), "skipping online location");
            continue;
        }

        let cleaned = block.replace(STATUS_GLYPH, "");
        let lines = record_lines(&cleaned)?;
        let key = location_key(lines[1]).ok_or_else(|| malformed(block, lines.len()))?;
        if lines[2].is_empty() {
            return Err(malformed(block, lines.len()));
        }

        locations.insert(key, lines[2]);
    }

    Ok(ParsedSchedule { classes, locations })
}

/// `"COMP SCI 300 (LEC 001)"` -> `"COMP SCI 300 LEC"`: drop the section
/// number token and any parentheses.
fn location_key(line: &str) -> Option<String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (_, name) = tokens.split_last()?;
    if name.is_empty() {
        return None;
    }
    Some(name.join(" ").replace(['(', ')'], ""))
}

fn record_lines(block: &str) -> ScheduleResult<Vec<&str>> {
    let lines: Vec<&str> = block.lines().map(str::trim).collect();
    if lines.len() < MIN_RECORD_LINES {
        return Err(malformed(block, lines.len()));
    }
    Ok(lines)
}

fn malformed(block: &str, lines: usize) -> ScheduleError {
    ScheduleError::MalformedRecord {
        record: block.to_string(),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_days_and_locations() {
        let days = strings(&[
            "COMP SCI 300\n3 credits\nLEC MWF 1:00PM-1:50PM\nDIS R 9:55AM - 10:45AM",
            "MATH 234\n4 credits\nLEC TR 11:00AM-12:15PM",
        ]);
        let locs = strings(&[
            "1:00 PM\nCOMP SCI 300 (LEC 001)\nRoom 1240",
            "check_circle\nCOMP SCI 300 (DIS 312)\nCS 1221",
            "11:00 AM\nMATH 234 (LEC 002)\nVan Vleck B102",
        ]);

        let parsed = parse_class_data(&days, &locs).unwrap();

        assert_eq!(parsed.classes.len(), 2);
        assert_eq!(parsed.classes[0].class_name, "COMP SCI 300");
        assert_eq!(
            parsed.classes[0].section_lines,
            vec!["LEC MWF 1:00PM-1:50PM", "DIS R 9:55AM - 10:45AM"]
        );
        assert_eq!(parsed.classes[1].class_name, "MATH 234");

        assert_eq!(parsed.locations.len(), 3);
        assert_eq!(parsed.locations.get("COMP SCI 300", "LEC"), Some("Room 1240"));
        assert_eq!(parsed.locations.get("COMP SCI 300", "DIS"), Some("CS 1221"));
        assert_eq!(parsed.locations.get("MATH 234", "LEC"), Some("Van Vleck B102"));
    }

    #[test]
    fn test_online_blocks_are_excluded() {
        let days = strings(&[
            "HISTORY 101\nOnline section\nLEC M 1:00PM-1:50PM",
            "MATH 234\n4 credits\nLEC TR 11:00AM-12:15PM",
        ]);
        let locs = strings(&[
            "Online\nHISTORY 101 (LEC 001)\nONLINE",
            "11:00 AM\nMATH 234 (LEC 002)\nVan Vleck B102",
        ]);

        let parsed = parse_class_data(&days, &locs).unwrap();

        assert_eq!(parsed.classes.len(), 1);
        assert_eq!(parsed.classes[0].class_name, "MATH 234");
        assert_eq!(parsed.locations.get("HISTORY 101", "LEC"), None);
    }

    #[test]
    fn test_online_marker_is_case_sensitive() {
        let days = strings(&["ONLINE STUDIES 1\ninfo\nLEC M 1:00PM-1:50PM"]);
        let parsed = parse_class_data(&days, &[]).unwrap();
        assert_eq!(parsed.classes.len(), 1);
    }

    #[test]
    fn test_status_glyph_is_stripped() {
        let locs = strings(&["x\ncheck_circleCOMP SCI 300 (LEC 001)\nRoom 1240check_circle"]);
        let parsed = parse_class_data(&[], &locs).unwrap();
        assert_eq!(parsed.locations.get("COMP SCI 300", "LEC"), Some("Room 1240"));
    }

    #[test]
    fn test_short_records_are_malformed() {
        let err = parse_class_data(&strings(&["COMP SCI 300\nLEC M 1:00PM-1:50PM"]), &[]).unwrap_err();
        assert!(
            matches!(err, ScheduleError::MalformedRecord { lines: 2, .. }),
            "got {err:?}"
        );

        let err = parse_class_data(&[], &strings(&["x\nRoom 1240"])).unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedRecord { .. }), "got {err:?}");
    }

    #[test]
    fn test_blank_room_is_malformed() {
        for block in ["x\nCOMP SCI 300 (LEC 001)\n", "x\nCOMP SCI 300 (LEC 001)\n   \n", "x\nCOMP SCI 300 (LEC 001)\ncheck_circle"] {
            let err = parse_class_data(&[], &strings(&[block])).unwrap_err();
            assert!(
                matches!(err, ScheduleError::MalformedRecord { .. }),
                "expected MalformedRecord for {block:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_location_key_needs_a_name_and_section() {
        let err = parse_class_data(&[], &strings(&["x\n(001)\nRoom 1240"])).unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedRecord { .. }), "got {err:?}");
    }

    #[test]
    fn test_repeated_class_replaces_sections_in_place() {
        let days = strings(&[
            "A 1\nx\nLEC M 1:00PM-1:50PM",
            "B 2\nx\nLEC T 1:00PM-1:50PM",
            "A 1\nx\nLAB F 2:00PM-3:50PM",
        ]);
        let parsed = parse_class_data(&days, &[]).unwrap();
        let names: Vec<_> = parsed.classes.iter().map(|c| c.class_name.as_str()).collect();
        assert_eq!(names, vec!["A 1", "B 2"]);
        assert_eq!(parsed.classes[0].section_lines, vec!["LAB F 2:00PM-3:50PM"]);
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "class_with_days": ["MATH 234\n4 credits\nLEC TR 11:00AM-12:15PM"],
            "class_with_location": ["11:00 AM\nMATH 234 (LEC 002)\nVan Vleck B102"]
        }"#;
        let snapshot = RawSnapshot::from_json(json).unwrap();
        let parsed = snapshot.parse().unwrap();
        assert_eq!(parsed.classes[0].section_lines, vec!["LEC TR 11:00AM-12:15PM"]);

        let err = RawSnapshot::from_json("{\"class_with_days\": 3}").unwrap_err();
        assert!(matches!(err, ScheduleError::Snapshot(_)));
    }
}
