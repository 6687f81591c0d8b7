//! Process command - split a scanned batch and file notes by clinic.

use std::collections::BTreeMap;
use std::path::PathBuf;

use colored::Colorize;
use woundscribe::input::{PageTextFile, PageTextSource, PdfTextLayer, pdf_page_count};
use woundscribe::output::LopdfSlicer;
use woundscribe::{PatientRegistry, ReconciliationWorkflow, Woundscribe, WoundscribeConfig};

use crate::prompt::TerminalPrompt;

pub struct ProcessArgs {
    pub pdf: PathBuf,
    pub output: PathBuf,
    pub page_text: Option<PathBuf>,
    pub threshold: f64,
    pub marker: String,
    pub auto_review: bool,
    pub registry: PathBuf,
    pub verbose: bool,
}

pub fn run(args: ProcessArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.pdf.exists() {
        return Err(format!("PDF not found: {}", args.pdf.display()).into());
    }

    let config = WoundscribeConfig::default()
        .with_marker_label(args.marker)
        .with_fuzzy_threshold(args.threshold);
    let pipeline = Woundscribe::with_config(config)?;

    println!("{} {}", "Processing".cyan().bold(), args.pdf.display());

    // Page text
    let source: Box<dyn PageTextSource> = match &args.page_text {
        Some(path) => Box::new(PageTextFile::new(path)),
        None => Box::new(PdfTextLayer),
    };
    let page_texts = source.extract_page_texts(&args.pdf)?;
    let pdf_pages = pdf_page_count(&args.pdf)?;
    if page_texts.len() != pdf_pages {
        return Err(format!(
            "Page text has {} pages but {} has {}",
            page_texts.len(),
            args.pdf.display(),
            pdf_pages
        )
        .into());
    }
    println!("Text ready for {} pages", page_texts.len().to_string().white().bold());

    // Segment + resolve
    let mut registry = PatientRegistry::load(&args.registry)?;
    let result = pipeline.process(&page_texts, &mut registry);
    let resolution = &result.resolution;
    println!(
        "Detected {} patient sections",
        resolution.assignments.len().to_string().white().bold()
    );

    // Split
    let written = pipeline.write_outputs(&args.pdf, resolution, &LopdfSlicer, &args.output)?;
    if args.verbose {
        for file in &written {
            println!("  {} {}", "•".dimmed(), file.path.display());
        }
    }

    registry.save(&args.registry)?;

    // Summary
    println!();
    println!("{}", "Summary".cyan().bold());
    let mut by_clinic: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for assignment in &resolution.assignments {
        by_clinic
            .entry(assignment.clinic.as_str())
            .or_default()
            .push(assignment.identity_key.as_str());
    }
    let width = by_clinic.keys().map(|c| c.len()).max().unwrap_or(6).max(6);
    println!("  {:<width$}  {:>5}  {}", "Clinic", "Files", "Patients");
    for (clinic, patients) in &by_clinic {
        println!(
            "  {:<width$}  {:>5}  {}",
            clinic.cyan(),
            patients.len(),
            patients.join(", ")
        );
    }
    println!();
    println!("Total PDFs generated: {}", written.len().to_string().white().bold());

    let unknown = resolution.unknown_keys();
    if !unknown.is_empty() {
        println!();
        println!("{}", "Unknown patients:".yellow().bold());
        for key in &unknown {
            println!("  - {}", key);
        }
    }

    if !resolution.fuzzy_candidates.is_empty() {
        println!();
        println!("{}", "Possible duplicate matches (review suggested):".blue().bold());
        for candidate in &resolution.fuzzy_candidates {
            println!(
                "  - {} ≈ {} ({:.0}%)",
                candidate.source_key.bold(),
                candidate.candidate_key.cyan(),
                candidate.score
            );
        }
    }

    let items = result.review_items();
    if items.is_empty() {
        println!();
        println!("{}", "Finished.".green().bold());
        return Ok(());
    }

    if !args.auto_review {
        println!();
        println!(
            "Run {} to assign unknown patients.",
            "woundscribe review".cyan().bold()
        );
        return Ok(());
    }

    println!();
    println!("{}", "Launching review...".blue().bold());
    tracing::debug!(items = items.len(), "Starting review");
    let report = ReconciliationWorkflow::new(items).run_and_save(
        &mut registry,
        &mut TerminalPrompt::stdio(),
        &args.registry,
    )?;

    println!();
    println!(
        "{} {} assigned, {} merged, {} skipped",
        "Review complete:".green().bold(),
        report.assigned(),
        report.merged(),
        report.skipped()
    );

    Ok(())
}
