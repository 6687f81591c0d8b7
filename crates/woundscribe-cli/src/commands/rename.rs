//! Rename command - move a patient to a corrected name.

use std::path::PathBuf;

use colored::Colorize;
use woundscribe::PatientRegistry;

pub fn run(
    old_name: String,
    new_name: String,
    registry_path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err("New name cannot be empty".into());
    }

    let mut registry = PatientRegistry::load(&registry_path)?;
    if registry.contains(new_name) && new_name != old_name {
        println!(
            "{} {} already exists and will be replaced",
            "Note:".yellow(),
            new_name.bold()
        );
    }
    if !registry.rename(&old_name, new_name) {
        return Err(format!("Patient not found: {}", old_name).into());
    }
    registry.save(&registry_path)?;

    println!(
        "{} {} -> {}",
        "Renamed:".green().bold(),
        old_name,
        new_name.bold()
    );
    Ok(())
}
