//! Patient registry: identity key → clinic assignment.
//!
//! The registry is a single JSON file mapping each canonical identity key to
//! the clinic that patient's notes are filed under:
//!
//! ```text
//! {
//!   "John Smith": { "clinic": "Riverside", "last_updated": "2026-10-19" },
//!   "Jane Doe":   { "clinic": "UnknownClinic", "last_updated": "2026-10-19" }
//! }
//! ```
//!
//! The registry is an ordinary value: load it once, pass it by `&mut` to the
//! operations that need it, save it when done. Saves rewrite the whole file
//! atomically. Two processes saving the same file concurrently is not
//! supported; the last writer wins.
//!
//! # Usage
//!
//! ```no_run
//! use woundscribe::registry::{PatientRegistry, TokenSortScorer};
//!
//! let mut registry = PatientRegistry::load("data/patient_map.json").unwrap();
//!
//! if registry.lookup_exact("John Smith").is_none() {
//!     if let Some(hit) = registry.lookup_fuzzy("John Smith", 85.0, &TokenSortScorer) {
//!         println!("Did you mean {} ({:.0}%)?", hit.key, hit.score);
//!     }
//! }
//!
//! registry.upsert("John Smith", "Riverside");
//! registry.save("data/patient_map.json").unwrap();
//! ```

mod persistence;
mod record;
mod similarity;

pub use persistence::DEFAULT_REGISTRY_PATH;
pub use record::{FuzzyMatch, PatientRecord, PatientRegistry, UNKNOWN_CLINIC, today};
pub use similarity::{SimilarityScorer, TokenSortScorer};
