//! Batch review driven by a decision source.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Result, WoundscribeError};
use crate::registry::PatientRegistry;

use super::decision::{Decision, Outcome, ReviewItem, apply};

/// Supplies one decision per review item.
///
/// Returning [`WoundscribeError::Halted`] (or any error) stops the batch; the
/// workflow then saves nothing.
pub trait DecisionSource {
    /// Decide on `item`. `registry` is the current state, for display.
    fn decide(&mut self, item: &ReviewItem, registry: &PatientRegistry) -> Result<Decision>;
}

/// Decisions from a fixed list, answered in order.
///
/// Once the list runs out every further item is declined.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    decisions: VecDeque<Decision>,
}

impl ScriptedDecisions {
    /// Create from a list of decisions.
    pub fn new(decisions: Vec<Decision>) -> Self {
        Self {
            decisions: decisions.into(),
        }
    }

    /// Load a JSON array of decisions, e.g.
    /// `[{"action": "assign_clinic", "clinic": "Riverside"}, {"action": "decline"}]`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| WoundscribeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let decisions: Vec<Decision> = serde_json::from_str(&contents)?;
        Ok(Self::new(decisions))
    }

    /// Decisions not yet used.
    pub fn remaining(&self) -> usize {
        self.decisions.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn decide(&mut self, _item: &ReviewItem, _registry: &PatientRegistry) -> Result<Decision> {
        Ok(self.decisions.pop_front().unwrap_or(Decision::Decline))
    }
}

/// What a review batch did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewReport {
    /// One outcome per item, in review order.
    pub outcomes: Vec<Outcome>,
}

impl ReviewReport {
    /// Unknown patients given a clinic.
    pub fn assigned(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Assigned { .. }))
    }

    /// Duplicates merged or renamed.
    pub fn merged(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Merged { .. } | Outcome::Renamed { .. }))
    }

    /// Items left as they were.
    pub fn skipped(&self) -> usize {
        self.count(|o| !o.changed())
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Walks review items in order, one decision each.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationWorkflow {
    items: Vec<ReviewItem>,
}

impl ReconciliationWorkflow {
    /// Create a workflow over the given items.
    pub fn new(items: Vec<ReviewItem>) -> Self {
        Self { items }
    }

    /// Items awaiting review.
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Whether there is nothing to review.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Review every item, updating `registry` in memory only.
    pub fn run(
        self,
        registry: &mut PatientRegistry,
        source: &mut dyn DecisionSource,
    ) -> Result<ReviewReport> {
        let mut report = ReviewReport::default();

        for item in &self.items {
            let decision = source.decide(item, registry)?;
            report.outcomes.push(apply(&decision, item, registry));
        }

        info!(
            items = self.items.len(),
            assigned = report.assigned(),
            merged = report.merged(),
            skipped = report.skipped(),
            "Review complete"
        );
        Ok(report)
    }

    /// Review every item, then save the registry once.
    ///
    /// If the source stops the batch early the error is returned and the
    /// file on disk is left as it was.
    pub fn run_and_save(
        self,
        registry: &mut PatientRegistry,
        source: &mut dyn DecisionSource,
        path: impl AsRef<Path>,
    ) -> Result<ReviewReport> {
        let report = self.run(registry, source)?;
        registry.save(path)?;
        Ok(report)
    }
}
