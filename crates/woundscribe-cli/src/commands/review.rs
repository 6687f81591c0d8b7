//! Review command - assign clinics to unknown patients.

use std::path::PathBuf;

use colored::Colorize;
use woundscribe::reconcile::{DecisionSource, ReviewReport, ScriptedDecisions};
use woundscribe::{PatientRegistry, ReconciliationWorkflow, ReviewItem};

use crate::prompt::TerminalPrompt;

pub fn run(decisions: Option<PathBuf>, registry_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = PatientRegistry::load(&registry_path)?;
    let items = ReviewItem::unknown_from_registry(&registry);

    if items.is_empty() {
        println!("{}", "No unknown patients to review.".green());
        return Ok(());
    }

    println!(
        "{} {} patients need a clinic",
        "Review:".cyan().bold(),
        items.len()
    );

    let mut source: Box<dyn DecisionSource> = match decisions {
        Some(path) => {
            if !path.exists() {
                return Err(format!("Decisions file not found: {}", path.display()).into());
            }
            Box::new(ScriptedDecisions::load(&path)?)
        }
        None => Box::new(TerminalPrompt::stdio()),
    };

    let report =
        ReconciliationWorkflow::new(items).run_and_save(&mut registry, source.as_mut(), &registry_path)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &ReviewReport) {
    println!();
    println!(
        "{} {} assigned, {} skipped",
        "Review complete:".green().bold(),
        report.assigned(),
        report.skipped()
    );
    if report.skipped() > 0 {
        println!(
            "{} skipped patients stay under UnknownClinic; run review again to revisit them",
            "Note:".yellow()
        );
    }
}
