//! Name normalization.
//!
//! OCR name captures are noisy: trailing age/room annotations, quoted
//! nicknames, stray punctuation. Normalization turns a raw capture into a
//! canonical identity key (the registry's primary key) and a label that is
//! safe to use as a file name.
//!
//! Two strategies are tried in a fixed order:
//!
//! 1. [`NameStrategy::CommaSeparated`] - a `Last, First` fragment ahead of
//!    any junk marker, reordered to `First Last`.
//! 2. [`NameStrategy::JunkStripped`] - everything before the first junk
//!    marker (`Age`, `DOB`, `Room`, `#`), used verbatim.
//!
//! If neither yields any text the name is [`UNKNOWN_NAME`].
//!
//! # Example
//!
//! ```
//! use woundscribe::normalize::normalize;
//!
//! let name = normalize("Smith, John Age 74 Room 12");
//! assert_eq!(name.identity_key, "John Smith");
//! assert_eq!(name.file_label, "Smith_John");
//! ```

mod strategy;

pub use strategy::NameStrategy;

use serde::{Deserialize, Serialize};

/// Identity key and label used when no name could be recovered.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Characters that are not allowed in file or directory names.
const ILLEGAL_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// The canonical form of a raw name capture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedName {
    /// Registry lookup key, e.g. `"John Smith"`.
    pub identity_key: String,
    /// Filesystem-safe label, e.g. `"Smith_John"`.
    pub file_label: String,
}

impl NormalizedName {
    /// The name used when nothing usable was captured.
    pub fn unknown() -> Self {
        Self {
            identity_key: UNKNOWN_NAME.to_string(),
            file_label: UNKNOWN_NAME.to_string(),
        }
    }

    /// Whether this is the [`UNKNOWN_NAME`] fallback.
    pub fn is_unknown(&self) -> bool {
        self.identity_key == UNKNOWN_NAME
    }
}

/// Normalize a raw name capture.
///
/// Never fails; the worst case is [`NormalizedName::unknown`].
pub fn normalize(raw: &str) -> NormalizedName {
    NameStrategy::PRIORITY
        .iter()
        .find_map(|strategy| strategy.apply(raw))
        .unwrap_or_else(NormalizedName::unknown)
}

/// Normalize an optional capture; `None` means no marker was seen.
pub fn normalize_opt(raw: Option<&str>) -> NormalizedName {
    raw.map(normalize).unwrap_or_else(NormalizedName::unknown)
}

/// Make a string safe to use as a file or directory name.
///
/// Removes `< > : " / \ | ? *`, collapses whitespace runs to a single `_`
/// and trims leading/trailing underscores.
///
/// ```
/// use woundscribe::normalize::sanitize;
///
/// assert_eq!(sanitize("  Doe:  Jane? "), "Doe_Jane");
/// ```
pub fn sanitize(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c))
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .trim_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_name_is_reordered() {
        let name = normalize("Smith, John");
        assert_eq!(name.identity_key, "John Smith");
        assert_eq!(name.file_label, "Smith_John");
    }

    #[test]
    fn test_comma_name_ignores_trailing_junk() {
        let name = normalize("Smith, John Age 74 Room 12");
        assert_eq!(name.identity_key, "John Smith");
    }

    #[test]
    fn test_quoted_aside_is_discarded() {
        assert_eq!(normalize("Smith, \"Jack\" John").identity_key, "John Smith");
        assert_eq!(normalize("Smith \u{201c}Jack\u{201d}, John").identity_key, "John Smith");
    }

    #[test]
    fn test_fallback_strips_junk_suffix() {
        let name = normalize("John Smith Age 74");
        assert_eq!(name.identity_key, "John Smith");
        assert_eq!(name.file_label, "John_Smith");

        assert_eq!(normalize("Mary Jones # 4B").identity_key, "Mary Jones");
        assert_eq!(normalize("Mary Jones dob 1/2/40").identity_key, "Mary Jones");
        assert_eq!(normalize("Mary Jones ROOM 9").identity_key, "Mary Jones");
    }

    #[test]
    fn test_junk_words_need_word_boundaries() {
        // "Page" and "Brooms" contain junk words but are not junk markers.
        assert_eq!(normalize("Page Brooms").identity_key, "Page Brooms");
    }

    #[test]
    fn test_empty_input_is_unknown() {
        assert_eq!(normalize(""), NormalizedName::unknown());
        assert_eq!(normalize("   \t "), NormalizedName::unknown());
        assert_eq!(normalize("Age 74"), NormalizedName::unknown());
        assert!(normalize_opt(None).is_unknown());
    }

    #[test]
    fn test_junk_first_name_falls_back() {
        let name = normalize("Smith, DOB 1/2/40");
        assert_eq!(name.identity_key, "Smith,");
        assert_eq!(name.file_label, "Smith,");

        assert_eq!(normalize("Smith, Age 74").identity_key, "Smith,");
        assert_eq!(normalize("Smith, John DOB 1/2/40").identity_key, "John Smith");
    }

    #[test]
    fn test_identity_key_is_fixed_point() {
        for raw in [
            "Smith, John",
            "John Smith Age 74",
            "doe, jane",
            "Unknown",
            "Smith, DOB 1/2/40",
            "Smith, Age 74",
            "Dob, Room",
            "Ab, Cd-Age2",
        ] {
            let key = normalize(raw).identity_key;
            assert_eq!(normalize(&key).identity_key, key, "raw: {raw}");
        }
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Smith_John"), "Smith_John");
        assert_eq!(sanitize("a<b>c:d\"e/f\\g|h?i*j"), "abcdefghij");
        assert_eq!(sanitize("  John   Smith \n"), "John_Smith");
        assert_eq!(sanitize("_lead and trail_"), "lead_and_trail");
        assert_eq!(sanitize("???"), "");
    }
}
