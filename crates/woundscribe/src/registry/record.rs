//! Registry records and lookups.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::similarity::SimilarityScorer;

/// Clinic assigned when a patient could not be matched.
pub const UNKNOWN_CLINIC: &str = "UnknownClinic";

/// Today's local date, used to stamp `last_updated`.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Clinic assignment for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Clinic the patient's notes are filed under.
    pub clinic: String,

    /// Date of the last assignment or merge.
    pub last_updated: NaiveDate,

    /// Any other fields found in the registry file, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PatientRecord {
    /// Create a record stamped with the given date.
    pub fn new(clinic: impl Into<String>, last_updated: NaiveDate) -> Self {
        Self {
            clinic: clinic.into(),
            last_updated,
            extra: BTreeMap::new(),
        }
    }

    /// Whether this patient still needs a clinic.
    pub fn is_unknown(&self) -> bool {
        self.clinic == UNKNOWN_CLINIC
    }
}

/// The best approximate match for a key.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// The existing registry key that matched.
    pub key: String,
    /// Similarity on a 0-100 scale.
    pub score: f64,
}

/// All known patients, keyed by identity key.
///
/// Keys are kept sorted so iteration, listing and fuzzy tie-breaks are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientRegistry {
    records: BTreeMap<String, PatientRecord>,
}

impl PatientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of patients.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry has no patients.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact lookup by identity key.
    pub fn lookup_exact(&self, key: &str) -> Option<&PatientRecord> {
        self.records.get(key)
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Find the most similar existing key.
    ///
    /// Every key is scored against `key`; the highest score wins, ties going
    /// to the lexicographically smallest key. The winner is returned only if
    /// its score is at least `threshold`.
    pub fn lookup_fuzzy(
        &self,
        key: &str,
        threshold: f64,
        scorer: &dyn SimilarityScorer,
    ) -> Option<FuzzyMatch> {
        let mut best: Option<FuzzyMatch> = None;

        // BTreeMap iterates in key order, so a strict `>` keeps the first key on ties.
        for candidate in self.records.keys() {
            let score = scorer.score(key, candidate);
            if score.is_nan() {
                continue;
            }
            let better = match &best {
                None => true,
                Some(current) => score > current.score,
            };
            if better {
                best = Some(FuzzyMatch {
                    key: candidate.clone(),
                    score,
                });
            }
        }

        best.filter(|m| m.score >= threshold)
    }

    /// Insert or overwrite the clinic for `key`, stamping today's date.
    pub fn upsert(&mut self, key: &str, clinic: &str) -> &PatientRecord {
        self.upsert_on(key, clinic, today())
    }

    /// Insert or overwrite the clinic for `key` with an explicit date.
    ///
    /// Extra fields on an existing record are preserved.
    pub fn upsert_on(&mut self, key: &str, clinic: &str, date: NaiveDate) -> &PatientRecord {
        let record = self
            .records
            .entry(key.to_string())
            .or_insert_with(|| PatientRecord::new(clinic, date));
        record.clinic = clinic.to_string();
        record.last_updated = date;
        record
    }

    /// Insert a complete record, returning any record it replaced.
    pub fn insert(&mut self, key: impl Into<String>, record: PatientRecord) -> Option<PatientRecord> {
        self.records.insert(key.into(), record)
    }

    /// Remove a patient.
    pub fn remove(&mut self, key: &str) -> Option<PatientRecord> {
        self.records.remove(key)
    }

    /// Move a record to a new key, stamping today's date.
    ///
    /// Returns `false` if `old` is not present. An existing record under
    /// `new` is replaced.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        match self.records.remove(old) {
            Some(mut record) => {
                record.last_updated = today();
                self.records.insert(new.to_string(), record);
                true
            }
            None => false,
        }
    }

    /// Iterate over patients in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PatientRecord)> {
        self.records.iter()
    }

    /// Keys of patients still assigned to [`UNKNOWN_CLINIC`], in key order.
    pub fn unknown_keys(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|(_, record)| record.is_unknown())
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TokenSortScorer;

    /// Scores from a fixed table; unknown pairs score 0.
    struct TableScorer(Vec<(&'static str, f64)>);

    impl SimilarityScorer for TableScorer {
        fn score(&self, _a: &str, b: &str) -> f64 {
            self.0
                .iter()
                .find(|(k, _)| *k == b)
                .map(|(_, s)| *s)
                .unwrap_or(0.0)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_upsert_inserts_and_overwrites() {
        let mut registry = PatientRegistry::new();
        registry.upsert_on("John Smith", "Riverside", date(2024, 1, 1));
        assert_eq!(registry.lookup_exact("John Smith").unwrap().clinic, "Riverside");

        registry.upsert_on("John Smith", "Lakeside", date(2024, 2, 1));
        let record = registry.lookup_exact("John Smith").unwrap();
        assert_eq!(record.clinic, "Lakeside");
        assert_eq!(record.last_updated, date(2024, 2, 1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_upsert_stamps_today() {
        let mut registry = PatientRegistry::new();
        let record = registry.upsert("Jane Doe", UNKNOWN_CLINIC);
        assert_eq!(record.last_updated, today());
        assert!(record.is_unknown());
    }

    #[test]
    fn test_upsert_preserves_extra_fields() {
        let mut registry = PatientRegistry::new();
        let mut record = PatientRecord::new("Riverside", date(2024, 1, 1));
        record.extra.insert("room".to_string(), Value::from("12B"));
        registry.insert("John Smith", record);

        registry.upsert("John Smith", "Lakeside");
        let record = registry.lookup_exact("John Smith").unwrap();
        assert_eq!(record.extra.get("room"), Some(&Value::from("12B")));
    }

    #[test]
    fn test_fuzzy_threshold_is_inclusive() {
        let mut registry = PatientRegistry::new();
        registry.upsert("Jon Smith", "Riverside");
        let scorer = TableScorer(vec![("Jon Smith", 85.0)]);

        let hit = registry.lookup_fuzzy("John Smith", 85.0, &scorer).unwrap();
        assert_eq!(hit.key, "Jon Smith");
        assert!(registry.lookup_fuzzy("John Smith", 86.0, &scorer).is_none());
    }

    #[test]
    fn test_fuzzy_tie_breaks_lexicographically() {
        let mut registry = PatientRegistry::new();
        registry.upsert("Zed Smith", "A");
        registry.upsert("Ann Smith", "B");
        registry.upsert("Bob Smith", "C");
        let scorer = TableScorer(vec![("Zed Smith", 92.0), ("Bob Smith", 92.0), ("Ann Smith", 50.0)]);

        let hit = registry.lookup_fuzzy("Jim Smith", 85.0, &scorer).unwrap();
        assert_eq!(hit.key, "Bob Smith");
        assert_eq!(hit.score, 92.0);
    }

    #[test]
    fn test_fuzzy_on_empty_registry() {
        let registry = PatientRegistry::new();
        assert!(registry.lookup_fuzzy("John Smith", 0.0, &TokenSortScorer).is_none());
    }

    #[test]
    fn test_fuzzy_with_token_sort_scorer() {
        let mut registry = PatientRegistry::new();
        registry.upsert("Jon Smith", "Riverside");
        registry.upsert("Mary Jones", "Lakeside");

        let hit = registry.lookup_fuzzy("John Smith", 85.0, &TokenSortScorer).unwrap();
        assert_eq!(hit.key, "Jon Smith");
        assert!((hit.score - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_rename_and_remove() {
        let mut registry = PatientRegistry::new();
        registry.upsert_on("Jon Smith", "Riverside", date(2020, 1, 1));

        assert!(registry.rename("Jon Smith", "John Smith"));
        assert!(!registry.contains("Jon Smith"));
        let record = registry.lookup_exact("John Smith").unwrap();
        assert_eq!(record.clinic, "Riverside");
        assert_eq!(record.last_updated, today());

        assert!(!registry.rename("Nobody", "Someone"));
        assert!(registry.remove("John Smith").is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_keys_sorted() {
        let mut registry = PatientRegistry::new();
        registry.upsert("Zoe Adams", UNKNOWN_CLINIC);
        registry.upsert("Amy Brown", UNKNOWN_CLINIC);
        registry.upsert("Bea Clark", "Riverside");

        assert_eq!(registry.unknown_keys(), vec!["Amy Brown", "Zoe Adams"]);
    }
}
