use std::path::PathBuf;

use anyhow::Result;
use classcal_core::SemesterConfig;
use owo_colors::OwoColorize;

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => SemesterConfig::default_path()?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Semester config already exists at {}\n\
            Use --force to overwrite it.",
            path.display()
        );
    }

    SemesterConfig::write_default(&path)?;
    println!("{}", format!("  Created: {}", path.display()).green());

    Ok(())
}
