//! Assign command - set a patient's clinic.

use std::path::PathBuf;

use colored::Colorize;
use woundscribe::PatientRegistry;

pub fn run(name: String, clinic: String, registry_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let name = name.trim();
    let clinic = clinic.trim();
    if name.is_empty() {
        return Err("Patient name cannot be empty".into());
    }
    if clinic.is_empty() {
        return Err("Clinic cannot be empty".into());
    }

    let mut registry = PatientRegistry::load(&registry_path)?;
    let existed = registry.contains(name);
    registry.upsert(name, clinic);
    registry.save(&registry_path)?;

    let verb = if existed { "Updated" } else { "Added" };
    println!(
        "{} {} -> {}",
        format!("{}:", verb).green().bold(),
        name.bold(),
        clinic.cyan()
    );
    Ok(())
}
