//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use woundscribe::registry::DEFAULT_REGISTRY_PATH;

/// WoundScribe: split scanned wound notes into per-patient files
#[derive(Parser)]
#[command(name = "woundscribe")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the patient registry
    #[arg(long, global = true, env = "WOUNDSCRIBE_REGISTRY", default_value = DEFAULT_REGISTRY_PATH)]
    pub registry: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a scanned batch into per-patient PDFs filed by clinic
    Process {
        /// Path to the scanned multi-patient PDF
        #[arg(value_name = "PDF")]
        pdf: PathBuf,

        /// Output folder for processed PDFs
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// OCR text for the PDF, pages separated by form feeds (default: PDF text layer)
        #[arg(long, value_name = "FILE")]
        page_text: Option<PathBuf>,

        /// Minimum similarity (0-100) for a fuzzy patient match
        #[arg(short, long, default_value_t = woundscribe::resolve::DEFAULT_FUZZY_THRESHOLD)]
        threshold: f64,

        /// Label that starts each patient's note
        #[arg(long, default_value = woundscribe::segment::DEFAULT_MARKER_LABEL)]
        marker: String,

        /// Don't launch review for unknown patients and possible duplicates
        #[arg(long)]
        no_auto_review: bool,
    },

    /// Assign or update a patient's clinic
    Assign {
        /// Full name of the patient (identity key)
        #[arg(value_name = "NAME")]
        name: String,

        /// Clinic name to assign
        #[arg(short, long)]
        clinic: String,
    },

    /// List all known patients and their assigned clinics
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a patient from the registry
    Remove {
        /// Full name of the patient to remove
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Rename a patient in the registry
    Rename {
        /// Current name in the registry
        #[arg(value_name = "OLD_NAME")]
        old_name: String,

        /// New name to assign
        #[arg(value_name = "NEW_NAME")]
        new_name: String,
    },

    /// Review patients assigned to UnknownClinic
    Review {
        /// Take decisions from a JSON file instead of prompting
        #[arg(long, value_name = "FILE")]
        decisions: Option<PathBuf>,
    },
}
