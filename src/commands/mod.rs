pub mod build;
pub mod init;
pub mod preview;

use std::path::Path;

use anyhow::{Context, Result};
use classcal_core::{Pipeline, RawSnapshot, SemesterConfig};

/// Load the semester config and snapshot shared by `build` and `preview`.
pub fn load_inputs(snapshot: &Path, semester: Option<&Path>) -> Result<(Pipeline, RawSnapshot)> {
    let config = SemesterConfig::load(semester).context("Failed to load semester config")?;
    let pipeline = Pipeline::new(config)?;

    let snapshot = RawSnapshot::load(snapshot)
        .with_context(|| format!("Failed to read snapshot {}", snapshot.display()))?;

    Ok((pipeline, snapshot))
}
