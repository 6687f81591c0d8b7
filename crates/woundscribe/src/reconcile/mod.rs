//! Operator reconciliation of unresolved and fuzzy matches.
//!
//! After a run, two kinds of item may need a human:
//!
//! - patients filed under `UnknownClinic`, which need a clinic, and
//! - fuzzy matches, which may be the same patient under a misread name.
//!
//! The merge logic is a plain state transition, [`apply`], that takes one
//! [`Decision`] for one [`ReviewItem`] and updates the registry. Decisions
//! come from a [`DecisionSource`]: a terminal prompt in the CLI, a scripted
//! list in tests or batch jobs.
//!
//! # Usage
//!
//! ```no_run
//! use woundscribe::reconcile::{Decision, ReconciliationWorkflow, ReviewItem, ScriptedDecisions};
//! use woundscribe::registry::PatientRegistry;
//!
//! let path = "data/patient_map.json";
//! let mut registry = PatientRegistry::load(path).unwrap();
//!
//! let items = ReviewItem::unknown_from_registry(&registry);
//! let mut decisions = ScriptedDecisions::new(vec![Decision::assign("Riverside")]);
//!
//! let report = ReconciliationWorkflow::new(items)
//!     .run_and_save(&mut registry, &mut decisions, path)
//!     .unwrap();
//! println!("Assigned {}", report.assigned());
//! ```

mod decision;
mod workflow;

pub use decision::{Decision, Outcome, ReviewItem, apply};
pub use workflow::{DecisionSource, ReconciliationWorkflow, ReviewReport, ScriptedDecisions};
