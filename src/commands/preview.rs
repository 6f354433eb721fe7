use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use super::load_inputs;
use crate::render::{Render, render_meetings};

pub fn run(snapshot: &Path, semester: Option<&Path>) -> Result<()> {
    let (pipeline, snapshot) = load_inputs(snapshot, semester)?;

    let parsed = snapshot.parse()?;
    let sections = pipeline.sections(&parsed)?;
    let document = pipeline.calendar(&sections)?;

    println!("📅 {}", pipeline.config().name.bold());

    if sections.is_empty() {
        println!("   {}", "No in-person sections found".dimmed());
        return Ok(());
    }

    println!();
    for section in &sections {
        println!("   {}", section.render());
    }

    println!();
    for event in document.events() {
        let meetings = event.occurrences()?;
        println!("   {} {}", event.render(), render_meetings(&meetings).dimmed());
    }

    Ok(())
}
