//! Remove command - drop a patient from the registry.

use std::path::PathBuf;

use colored::Colorize;
use woundscribe::PatientRegistry;

pub fn run(name: String, registry_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = PatientRegistry::load(&registry_path)?;

    let Some(record) = registry.remove(&name) else {
        return Err(format!("Patient not found: {}", name).into());
    };
    registry.save(&registry_path)?;

    println!(
        "{} {} (was {})",
        "Removed:".green().bold(),
        name.bold(),
        record.clinic
    );
    Ok(())
}
