//! WoundScribe: split scanned multi-patient wound notes into per-patient files.
//!
//! A facility scans a day's notes as one long document. WoundScribe finds
//! where each patient's note begins, works out who the patient is despite
//! OCR noise, and files each note under that patient's clinic.
//!
//! # Pipeline
//!
//! - **Segment**: cut the page stream at each `Resident Name:` marker
//! - **Normalize**: turn `"Smith, John Age 74"` into the key `"John Smith"`
//! - **Resolve**: exact, then fuzzy lookup in the patient registry
//! - **Reconcile**: let an operator assign unknown patients and merge duplicates
//!
//! # Example
//!
//! ```no_run
//! use woundscribe::{PatientRegistry, Woundscribe};
//!
//! let pages = vec![
//!     "Resident Name: Smith, John\nLeft heel".to_string(),
//!     "Resident Name: Doe, Jane\nSacrum".to_string(),
//! ];
//!
//! let mut registry = PatientRegistry::load("data/patient_map.json").unwrap();
//! let result = Woundscribe::new().process(&pages, &mut registry);
//!
//! for assignment in &result.resolution.assignments {
//!     println!("{} -> {}", assignment.identity_key, assignment.clinic);
//! }
//! registry.save("data/patient_map.json").unwrap();
//! ```

pub mod error;
pub mod input;
pub mod normalize;
pub mod output;
pub mod reconcile;
pub mod registry;
pub mod resolve;
pub mod segment;

mod woundscribe;

pub use crate::woundscribe::{
    DEFAULT_OUTPUT_EXTENSION, ProcessResult, Woundscribe, WoundscribeConfig, WrittenFile,
};
pub use error::{Result, WoundscribeError};
pub use normalize::{NormalizedName, normalize};
pub use reconcile::{Decision, DecisionSource, ReconciliationWorkflow, ReviewItem};
pub use registry::{PatientRecord, PatientRegistry, UNKNOWN_CLINIC};
pub use resolve::{Assignment, FuzzyCandidate, Resolution};
pub use segment::{Document, DocumentSegmenter};
