//! Exact-then-fuzzy resolution against the patient registry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, WoundscribeError};
use crate::normalize::normalize_opt;
use crate::registry::{PatientRegistry, SimilarityScorer, TokenSortScorer, UNKNOWN_CLINIC};
use crate::segment::Document;

/// Minimum similarity (0-100) for a fuzzy match to be applied.
///
/// Tolerates one misread character in a mid-length name while keeping
/// distinct short names apart.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 85.0;

/// How an assignment's clinic was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The identity key was already in the registry.
    Exact,
    /// A similar key was found and its clinic borrowed.
    Fuzzy,
    /// Nothing matched; filed under [`UNKNOWN_CLINIC`].
    Unmatched,
}

impl MatchKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Exact => "Exact",
            MatchKind::Fuzzy => "Fuzzy",
            MatchKind::Unmatched => "Unmatched",
        }
    }
}

/// Where one document should be filed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Canonical identity key.
    pub identity_key: String,
    /// Filesystem-safe label for the output file.
    pub file_label: String,
    /// Clinic the document is filed under.
    pub clinic: String,
    /// Source page indices.
    pub pages: Vec<usize>,
    /// How the clinic was determined.
    pub match_kind: MatchKind,
}

impl Assignment {
    /// Whether this document still needs a clinic.
    pub fn is_unknown(&self) -> bool {
        self.clinic == UNKNOWN_CLINIC
    }
}

/// A fuzzy match awaiting operator review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyCandidate {
    /// The newly resolved identity key.
    pub source_key: String,
    /// The existing registry key it resembled.
    pub candidate_key: String,
    /// Similarity on a 0-100 scale.
    pub score: f64,
}

/// Output of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// One assignment per document, in document order.
    pub assignments: Vec<Assignment>,
    /// Fuzzy matches, in the order they were made.
    pub fuzzy_candidates: Vec<FuzzyCandidate>,
}

impl Resolution {
    /// Distinct identity keys left at [`UNKNOWN_CLINIC`], in first-seen order.
    pub fn unknown_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for assignment in self.assignments.iter().filter(|a| a.is_unknown()) {
            if !keys.contains(&assignment.identity_key) {
                keys.push(assignment.identity_key.clone());
            }
        }
        keys
    }

    /// Whether anything needs operator attention.
    pub fn needs_review(&self) -> bool {
        !self.fuzzy_candidates.is_empty() || self.assignments.iter().any(|a| a.is_unknown())
    }
}

/// Resolves documents to clinics using a registry.
#[derive(Clone)]
pub struct IdentityResolver {
    threshold: f64,
    scorer: Arc<dyn SimilarityScorer>,
}

impl IdentityResolver {
    /// Create a resolver with the default threshold and [`TokenSortScorer`].
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_FUZZY_THRESHOLD,
            scorer: Arc::new(TokenSortScorer),
        }
    }

    /// Set the fuzzy threshold. Must be within 0-100.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(WoundscribeError::Config(format!(
                "Fuzzy threshold must be between 0 and 100, got {}",
                threshold
            )));
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Use a different similarity scorer.
    pub fn with_scorer(mut self, scorer: impl SimilarityScorer + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    /// Use a shared similarity scorer.
    pub fn with_shared_scorer(mut self, scorer: Arc<dyn SimilarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolve every document, updating the registry as it goes.
    ///
    /// - Exact hit: use the stored clinic.
    /// - Fuzzy hit: use the matched record's clinic, add a new entry under
    ///   this document's own key with that clinic (the matched entry is left
    ///   alone), and report a [`FuzzyCandidate`].
    /// - Otherwise: file under [`UNKNOWN_CLINIC`] and record it.
    pub fn resolve(&self, documents: Vec<Document>, registry: &mut PatientRegistry) -> Resolution {
        let mut resolution = Resolution::default();

        for document in documents {
            let (pages, raw_name) = document.into_parts();
            let name = normalize_opt(raw_name.as_deref());
            let key = name.identity_key;

            let (clinic, match_kind) = if let Some(record) = registry.lookup_exact(&key) {
                debug!(key = %key, clinic = %record.clinic, "Exact match");
                (record.clinic.clone(), MatchKind::Exact)
            } else if let Some(hit) = registry.lookup_fuzzy(&key, self.threshold, self.scorer.as_ref()) {
                let clinic = registry
                    .lookup_exact(&hit.key)
                    .map(|record| record.clinic.clone())
                    .unwrap_or_else(|| UNKNOWN_CLINIC.to_string());
                info!(
                    key = %key,
                    candidate = %hit.key,
                    score = hit.score,
                    clinic = %clinic,
                    "Fuzzy match"
                );
                registry.upsert(&key, &clinic);
                resolution.fuzzy_candidates.push(FuzzyCandidate {
                    source_key: key.clone(),
                    candidate_key: hit.key,
                    score: hit.score,
                });
                (clinic, MatchKind::Fuzzy)
            } else {
                debug!(key = %key, "No match; assigning unknown clinic");
                registry.upsert(&key, UNKNOWN_CLINIC);
                (UNKNOWN_CLINIC.to_string(), MatchKind::Unmatched)
            };

            resolution.assignments.push(Assignment {
                identity_key: key,
                file_label: name.file_label,
                clinic,
                pages,
                match_kind,
            });
        }

        resolution
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
