//! Semester configuration.
//!
//! A semester is described by the first meeting date of each weekday and how
//! many weeks classes run. The built-in defaults describe Fall 2019; a TOML
//! file at `~/.config/classcal/semester.toml` (or any path given explicitly)
//! replaces them for other terms.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::expand::{Alarm, DEFAULT_REMINDER_DESCRIPTION, DEFAULT_REMINDER_MINUTES};
use crate::time::HourConvention;
use crate::weekday::{AnchorTable, DEFAULT_OCCURRENCES, Weekday, WeekdayAnchor, WeekdayValidation};

static DEFAULT_TERM_NAME: &str = "Fall 2019";

fn default_name() -> String {
    DEFAULT_TERM_NAME.to_string()
}

fn default_occurrences() -> u32 {
    DEFAULT_OCCURRENCES
}

fn default_reminder_minutes() -> i64 {
    DEFAULT_REMINDER_MINUTES
}

fn default_reminder_description() -> String {
    DEFAULT_REMINDER_DESCRIPTION.to_string()
}

fn default_anchors() -> BTreeMap<Weekday, AnchorConfig> {
    AnchorTable::fall_2019()
        .iter()
        .map(|anchor| {
            let occurrences = (anchor.occurrences != DEFAULT_OCCURRENCES).then_some(anchor.occurrences);
            (
                anchor.weekday,
                AnchorConfig {
                    first_date: anchor.first_date,
                    occurrences,
                },
            )
        })
        .collect()
}

/// First meeting date of one weekday, with an optional count override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorConfig {
    pub first_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u32>,
}

/// Configuration for one academic term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Weekly meetings for weekdays without their own `occurrences`.
    #[serde(default = "default_occurrences")]
    pub default_occurrences: u32,

    #[serde(default = "default_anchors")]
    pub anchors: BTreeMap<Weekday, AnchorConfig>,

    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: i64,

    #[serde(default = "default_reminder_description")]
    pub reminder_description: String,

    #[serde(default)]
    pub hour_convention: HourConvention,

    #[serde(default)]
    pub weekday_validation: WeekdayValidation,
}

impl Default for SemesterConfig {
    fn default() -> Self {
        SemesterConfig {
            name: default_name(),
            default_occurrences: default_occurrences(),
            anchors: default_anchors(),
            reminder_minutes: default_reminder_minutes(),
            reminder_description: default_reminder_description(),
            hour_convention: HourConvention::default(),
            weekday_validation: WeekdayValidation::default(),
        }
    }
}

impl SemesterConfig {
    /// `~/.config/classcal/semester.toml`
    pub fn default_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("classcal");

        Ok(config_dir.join("semester.toml"))
    }

    /// Load from an explicit path (which must exist) or from the default
    /// path (which may be missing, giving the built-in defaults).
    pub fn load(path: Option<&Path>) -> ScheduleResult<Self> {
        let (path, required) = match path {
            Some(p) => (expand_tilde(p), true),
            None => (Self::default_path()?, false),
        };

        if required && !path.exists() {
            return Err(ScheduleError::Config(format!(
                "Semester config not found: {}",
                path.display()
            )));
        }

        let config: SemesterConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| ScheduleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScheduleError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> ScheduleResult<Self> {
        let config: SemesterConfig =
            toml::from_str(content).map_err(|e| ScheduleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        if self.reminder_minutes < 0 {
            return Err(ScheduleError::Config(format!(
                "reminder_minutes must not be negative, got {}",
                self.reminder_minutes
            )));
        }
        self.anchor_table().map(|_| ())
    }

    pub fn anchor_table(&self) -> ScheduleResult<AnchorTable> {
        AnchorTable::new(self.anchors.iter().map(|(weekday, anchor)| WeekdayAnchor {
            weekday: *weekday,
            first_date: anchor.first_date,
            occurrences: anchor.occurrences.unwrap_or(self.default_occurrences),
        }))
    }

    pub fn alarm(&self) -> Alarm {
        Alarm::new(self.reminder_minutes, self.reminder_description.clone())
    }

    /// Create a starter config file describing the built-in semester.
    pub fn write_default(path: &Path) -> ScheduleResult<()> {
        let mut contents = String::from(
            "\
# classcal semester configuration

# Calendar name:
# name = \"Fall 2019\"

# 12 AM conversion: \"pm-only\" keeps 12:00, \"standard\" gives 0:00
# hour_convention = \"pm-only\"

# Unknown weekday letters: \"lenient\" skips them, \"strict\" fails
# weekday_validation = \"lenient\"

# reminder_minutes = 15
# reminder_description = \"REMINDER\"

# Weekly meetings per weekday unless an anchor overrides it:
default_occurrences = 14

# First meeting date of each weekday (M, T, W, R, F):
",
        );

        for (weekday, anchor) in default_anchors() {
            contents.push_str(&format!(
                "\n[anchors.{}]\nfirst_date = \"{}\"\n",
                weekday.code(),
                anchor.first_date
            ));
            if let Some(count) = anchor.occurrences {
                contents.push_str(&format!("occurrences = {}\n", count));
            }
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
