//! Pluggable string similarity for fuzzy registry lookups.

/// Scores how alike two identity keys are, from 0 (unrelated) to 100 (same).
pub trait SimilarityScorer: Send + Sync {
    /// Similarity of `a` and `b` on a 0-100 scale.
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Token-order-insensitive edit similarity.
///
/// Both strings are lowercased, split into whitespace tokens, sorted and
/// rejoined before a normalized Levenshtein comparison. `"Smith John"` and
/// `"john smith"` score 100; `"John Smith"` and `"Jon Smith"` score 90.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortScorer;

impl SimilarityScorer for TokenSortScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a = sorted_tokens(a);
        let b = sorted_tokens(b);
        strsim::normalized_levenshtein(&a, &b) * 100.0
    }
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<String> = s.split_whitespace().map(str::to_lowercase).collect();
    tokens.sort();
    tokens.join(" ")
}
