use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::load_inputs;

pub fn run(
    snapshot: &Path,
    user: Option<&str>,
    output: Option<PathBuf>,
    semester: Option<&Path>,
) -> Result<()> {
    let (pipeline, snapshot) = load_inputs(snapshot, semester)?;

    let document = pipeline.build(&snapshot)?;
    let ics = document.to_ics()?;

    let output = output.unwrap_or_else(|| default_output_path(user));
    std::fs::write(&output, ics)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{}",
        format!(
            "  Wrote {} events for {} to {}",
            document.len(),
            pipeline.config().name,
            output.display()
        )
        .green()
    );

    Ok(())
}

/// `<user>_schedule.ics`, or `schedule.ics` without a user.
pub fn default_output_path(user: Option<&str>) -> PathBuf {
    match user {
        Some(user) => PathBuf::from(format!("{}_schedule.ics", user)),
        None => PathBuf::from("schedule.ics"),
    }
}
