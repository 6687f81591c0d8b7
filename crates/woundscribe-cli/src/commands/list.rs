//! List command - show known patients and their clinics.

use std::path::PathBuf;

use colored::Colorize;
use woundscribe::PatientRegistry;

pub fn run(json: bool, registry_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let registry = PatientRegistry::load(&registry_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("{}", "No patients in the registry.".yellow());
        return Ok(());
    }

    let name_width = registry.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0).max(7);
    let clinic_width = registry
        .iter()
        .map(|(_, r)| r.clinic.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    println!(
        "{:<name_width$}  {:<clinic_width$}  {}",
        "Patient".bold(),
        "Clinic".bold(),
        "Last updated".bold()
    );
    for (key, record) in registry.iter() {
        let clinic = if record.is_unknown() {
            record.clinic.yellow()
        } else {
            record.clinic.cyan()
        };
        println!(
            "{:<name_width$}  {:<clinic_width$}  {}",
            key,
            clinic,
            record.last_updated.format("%Y-%m-%d")
        );
    }

    let unknown = registry.unknown_keys().len();
    println!();
    println!(
        "{} patients, {} unassigned",
        registry.len().to_string().white().bold(),
        unknown
    );
    Ok(())
}
