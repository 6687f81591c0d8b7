//! Review items, operator decisions, and the transitions they cause.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::registry::{PatientRegistry, today};
use crate::resolve::{FuzzyCandidate, Resolution};

/// Something an operator needs to look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewItem {
    /// A patient filed under `UnknownClinic`.
    UnknownClinic { key: String },
    /// A fuzzy match that may be a duplicate.
    Fuzzy(FuzzyCandidate),
}

impl ReviewItem {
    /// Items raised by a resolution pass: unknown patients first, then fuzzy
    /// matches, each in the order they occurred.
    pub fn from_resolution(resolution: &Resolution) -> Vec<ReviewItem> {
        resolution
            .unknown_keys()
            .into_iter()
            .map(|key| ReviewItem::UnknownClinic { key })
            .chain(
                resolution
                    .fuzzy_candidates
                    .iter()
                    .cloned()
                    .map(ReviewItem::Fuzzy),
            )
            .collect()
    }

    /// One item per registry entry still at `UnknownClinic`.
    pub fn unknown_from_registry(registry: &PatientRegistry) -> Vec<ReviewItem> {
        registry
            .unknown_keys()
            .into_iter()
            .map(|key| ReviewItem::UnknownClinic { key })
            .collect()
    }

    /// The identity key this item is about.
    pub fn key(&self) -> &str {
        match self {
            ReviewItem::UnknownClinic { key } => key,
            ReviewItem::Fuzzy(candidate) => &candidate.source_key,
        }
    }
}

/// An operator's answer to one review item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "clinic", rename_all = "snake_case")]
pub enum Decision {
    /// File an unknown patient under this clinic.
    AssignClinic(String),
    /// The fuzzy pair is the same patient; merge them.
    ConfirmMerge,
    /// Leave things as they are.
    Decline,
}

impl Decision {
    /// Assign a clinic. Blank clinic names are treated as a decline.
    pub fn assign(clinic: impl Into<String>) -> Self {
        let clinic = clinic.into();
        let clinic = clinic.trim();
        if clinic.is_empty() {
            Decision::Decline
        } else {
            Decision::AssignClinic(clinic.to_string())
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::AssignClinic(_) => "Assign",
            Decision::ConfirmMerge => "Merge",
            Decision::Decline => "Decline",
        }
    }
}

/// What applying a decision did to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// An unknown patient was given a clinic.
    Assigned { key: String, clinic: String },
    /// `from` was folded into `into` and removed.
    Merged { from: String, into: String },
    /// The merge target was missing, so `from` was renamed to `into`.
    Renamed { from: String, into: String },
    /// Nothing changed.
    Skipped { key: String },
}

impl Outcome {
    /// Whether the registry was modified.
    pub fn changed(&self) -> bool {
        !matches!(self, Outcome::Skipped { .. })
    }
}

/// Apply one decision to the registry.
///
/// - `UnknownClinic` + `AssignClinic(c)`: upsert the key with `c`.
/// - `Fuzzy` + `ConfirmMerge`: merge the source record into the candidate
///   record. Extra fields from the source win on conflict; the clinic is the
///   candidate's; the date is today. The source key is removed. If the
///   candidate record no longer exists, the source is renamed to it instead.
/// - Anything else, including a decision that does not fit the item, is a
///   decline and leaves the registry untouched.
pub fn apply(decision: &Decision, item: &ReviewItem, registry: &mut PatientRegistry) -> Outcome {
    match (item, decision) {
        (ReviewItem::UnknownClinic { key }, Decision::AssignClinic(clinic)) => {
            registry.upsert(key, clinic);
            info!(key = %key, clinic = %clinic, "Assigned clinic");
            Outcome::Assigned {
                key: key.clone(),
                clinic: clinic.clone(),
            }
        }
        (ReviewItem::Fuzzy(candidate), Decision::ConfirmMerge) => {
            merge(registry, &candidate.source_key, &candidate.candidate_key)
        }
        _ => {
            debug!(key = %item.key(), decision = decision.label(), "Skipped");
            Outcome::Skipped {
                key: item.key().to_string(),
            }
        }
    }
}

fn merge(registry: &mut PatientRegistry, source: &str, target: &str) -> Outcome {
    if source == target {
        return Outcome::Skipped {
            key: source.to_string(),
        };
    }

    let Some(source_record) = registry.remove(source) else {
        warn!(source = %source, target = %target, "Merge source already gone");
        return Outcome::Skipped {
            key: source.to_string(),
        };
    };

    match registry.lookup_exact(target).cloned() {
        Some(mut merged) => {
            merged.extra.extend(source_record.extra);
            merged.last_updated = today();
            registry.insert(target, merged);
            info!(from = %source, into = %target, "Merged duplicate");
            Outcome::Merged {
                from: source.to_string(),
                into: target.to_string(),
            }
        }
        None => {
            let mut renamed = source_record;
            renamed.last_updated = today();
            registry.insert(target, renamed);
            warn!(from = %source, into = %target, "Merge target missing; renamed instead");
            Outcome::Renamed {
                from: source.to_string(),
                into: target.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{PatientRecord, UNKNOWN_CLINIC};
    use chrono::NaiveDate;
    use serde_json::Value;

    fn old_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    fn fuzzy(source: &str, candidate: &str) -> ReviewItem {
        ReviewItem::Fuzzy(FuzzyCandidate {
            source_key: source.to_string(),
            candidate_key: candidate.to_string(),
            score: 90.0,
        })
    }

    #[test]
    fn test_assign_unknown() {
        let mut registry = PatientRegistry::new();
        registry.upsert_on("Jane Doe", UNKNOWN_CLINIC, old_date());

        let item = ReviewItem::UnknownClinic { key: "Jane Doe".to_string() };
        let outcome = apply(&Decision::assign("Lakeside"), &item, &mut registry);

        assert!(outcome.changed());
        let record = registry.lookup_exact("Jane Doe").unwrap();
        assert_eq!(record.clinic, "Lakeside");
        assert_eq!(record.last_updated, today());
    }

    #[test]
    fn test_blank_clinic_is_decline() {
        assert_eq!(Decision::assign("   "), Decision::Decline);
        assert_eq!(Decision::assign(" Riverside "), Decision::AssignClinic("Riverside".into()));
    }

    #[test]
    fn test_decline_leaves_registry_untouched() {
        let mut registry = PatientRegistry::new();
        registry.upsert_on("Jon Smith", "Riverside", old_date());
        registry.upsert_on("John Smith", "Riverside", old_date());
        let before = registry.clone();

        let outcome = apply(&Decision::Decline, &fuzzy("John Smith", "Jon Smith"), &mut registry);

        assert!(!outcome.changed());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_mismatched_decision_is_decline() {
        let mut registry = PatientRegistry::new();
        registry.upsert_on("Jane Doe", UNKNOWN_CLINIC, old_date());
        let before = registry.clone();

        let item = ReviewItem::UnknownClinic { key: "Jane Doe".to_string() };
        assert!(!apply(&Decision::ConfirmMerge, &item, &mut registry).changed());
        assert!(!apply(&Decision::assign("X"), &fuzzy("A", "B"), &mut registry).changed());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_merge_keeps_target_clinic_and_source_extras() {
        let mut registry = PatientRegistry::new();
        let mut target = PatientRecord::new("Riverside", old_date());
        target.extra.insert("room".into(), Value::from("1A"));
        target.extra.insert("wing".into(), Value::from("North"));
        let mut source = PatientRecord::new("Lakeside", old_date());
        source.extra.insert("room".into(), Value::from("2B"));
        registry.insert("Jon Smith", target);
        registry.insert("John Smith", source);

        let outcome = apply(&Decision::ConfirmMerge, &fuzzy("John Smith", "Jon Smith"), &mut registry);

        assert_eq!(
            outcome,
            Outcome::Merged { from: "John Smith".into(), into: "Jon Smith".into() }
        );
        assert!(!registry.contains("John Smith"));
        let merged = registry.lookup_exact("Jon Smith").unwrap();
        assert_eq!(merged.clinic, "Riverside");
        assert_eq!(merged.last_updated, today());
        assert_eq!(merged.extra["room"], Value::from("2B"));
        assert_eq!(merged.extra["wing"], Value::from("North"));
    }

    #[test]
    fn test_merge_into_missing_target_renames() {
        let mut registry = PatientRegistry::new();
        registry.upsert_on("John Smith", "Riverside", old_date());

        let outcome = apply(&Decision::ConfirmMerge, &fuzzy("John Smith", "Jon Smith"), &mut registry);

        assert!(matches!(outcome, Outcome::Renamed { .. }));
        assert!(!registry.contains("John Smith"));
        assert_eq!(registry.lookup_exact("Jon Smith").unwrap().clinic, "Riverside");
    }

    #[test]
    fn test_merge_with_missing_source_is_noop() {
        let mut registry = PatientRegistry::new();
        registry.upsert_on("Jon Smith", "Riverside", old_date());
        let before = registry.clone();

        let outcome = apply(&Decision::ConfirmMerge, &fuzzy("John Smith", "Jon Smith"), &mut registry);

        assert!(!outcome.changed());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_decision_json_shape() {
        let decisions: Vec<Decision> = serde_json::from_str(
            r#"[{"action": "assign_clinic", "clinic": "Riverside"},
                {"action": "confirm_merge"},
                {"action": "decline"}]"#,
        )
        .unwrap();

        assert_eq!(
            decisions,
            vec![
                Decision::AssignClinic("Riverside".into()),
                Decision::ConfirmMerge,
                Decision::Decline
            ]
        );
    }
}
