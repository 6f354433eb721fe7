//! Weekday codes and the per-semester anchor table.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ScheduleError, ScheduleResult};

/// Standard number of weekly meetings in a semester.
pub const DEFAULT_OCCURRENCES: u32 = 14;

/// A day of the five-day academic week, identified by its one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "M", alias = "m")]
    Monday,
    #[serde(rename = "T", alias = "t")]
    Tuesday,
    #[serde(rename = "W", alias = "w")]
    Wednesday,
    #[serde(rename = "R", alias = "r")]
    Thursday,
    #[serde(rename = "F", alias = "f")]
    Friday,
}

impl Weekday {
    /// Canonical emission order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn code(self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'R',
            Weekday::Friday => 'F',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Weekday::ALL.into_iter().find(|d| d.code() == code)
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What to do with characters in a weekday code that are not M/T/W/R/F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekdayValidation {
    /// Skip them silently (logged at warn level).
    #[default]
    Lenient,
    /// Fail with `UnknownWeekday`.
    Strict,
}

/// Split a weekday code like `"MWF"` into weekdays in canonical M, T, W, R, F order.
///
/// `section` names the section the code belongs to, for errors and logs.
pub fn parse_weekday_code(
    code: &str,
    section: &str,
    validation: WeekdayValidation,
) -> ScheduleResult<Vec<Weekday>> {
    for c in code.chars().filter(|c| Weekday::from_code(*c).is_none()) {
        match validation {
            WeekdayValidation::Strict => {
                return Err(ScheduleError::UnknownWeekday {
                    section: section.to_string(),
                    code: c,
                });
            }
            WeekdayValidation::Lenient => {
                warn!(section, code, ignored = %c, "ignoring unknown weekday letter")
            }
        }
    }

    Ok(Weekday::ALL
        .into_iter()
        .filter(|d| code.contains(d.code()))
        .collect())
}

/// First meeting date of a weekday in the semester and how many weeks it repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayAnchor {
    pub weekday: Weekday,
    pub first_date: NaiveDate,
    pub occurrences: u32,
}

/// One anchor per weekday. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorTable {
    anchors: [WeekdayAnchor; 5],
}

static FALL_2019: LazyLock<AnchorTable> = LazyLock::new(|| {
    let anchor = |weekday, (y, m, d), occurrences| WeekdayAnchor {
        weekday,
        first_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        occurrences,
    };
    AnchorTable {
        anchors: [
            anchor(Weekday::Monday, (2019, 9, 9), DEFAULT_OCCURRENCES),
            anchor(Weekday::Tuesday, (2019, 9, 10), DEFAULT_OCCURRENCES),
            // Classes start on a Wednesday, so Wednesday gets an extra week.
            anchor(Weekday::Wednesday, (2019, 9, 4), 15),
            anchor(Weekday::Thursday, (2019, 9, 5), DEFAULT_OCCURRENCES),
            anchor(Weekday::Friday, (2019, 9, 6), DEFAULT_OCCURRENCES),
        ],
    }
});

impl AnchorTable {
    /// Build a table from exactly one anchor per weekday.
    ///
    /// Each `first_date` must fall on its weekday and each count must be positive.
    pub fn new(anchors: impl IntoIterator<Item = WeekdayAnchor>) -> ScheduleResult<Self> {
        let mut slots: [Option<WeekdayAnchor>; 5] = Default::default();

        for anchor in anchors {
            if anchor.first_date.weekday() != anchor.weekday.to_chrono() {
                return Err(ScheduleError::Config(format!(
                    "first date {} for weekday {} is a {}",
                    anchor.first_date,
                    anchor.weekday,
                    anchor.first_date.weekday()
                )));
            }
            if anchor.occurrences == 0 {
                return Err(ScheduleError::Config(format!(
                    "weekday {} must repeat at least once",
                    anchor.weekday
                )));
            }
            let slot = &mut slots[anchor.weekday.index()];
            if slot.is_some() {
                return Err(ScheduleError::Config(format!(
                    "weekday {} is anchored twice",
                    anchor.weekday
                )));
            }
            *slot = Some(anchor);
        }

        let mut missing = Weekday::ALL.iter().filter(|d| slots[d.index()].is_none()).peekable();
        if missing.peek().is_some() {
            let codes: String = missing.map(|d| d.code()).collect();
            return Err(ScheduleError::Config(format!("missing anchors for weekdays {codes}")));
        }

        let anchors: Vec<WeekdayAnchor> = slots.into_iter().flatten().collect();
        let anchors = anchors
            .try_into()
            .map_err(|_| ScheduleError::Config("anchor table needs five weekdays".into()))?;

        Ok(AnchorTable { anchors })
    }

    /// The Fall 2019 semester table.
    pub fn fall_2019() -> &'static AnchorTable {
        &FALL_2019
    }

    pub fn get(&self, weekday: Weekday) -> &WeekdayAnchor {
        &self.anchors[weekday.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeekdayAnchor> {
        self.anchors.iter()
    }
}
