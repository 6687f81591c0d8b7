//! Identity resolution: documents → clinic assignments.
//!
//! Each document's raw name is normalized to an identity key and looked up in
//! the registry, exact first, then fuzzy. Fuzzy hits are applied immediately
//! but also reported as [`FuzzyCandidate`]s so an operator can confirm or
//! reject them later.

mod resolver;

pub use resolver::{
    Assignment, DEFAULT_FUZZY_THRESHOLD, FuzzyCandidate, IdentityResolver, MatchKind, Resolution,
};
