//! Name-shape strategies.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{NormalizedName, sanitize};

/// `Last, First` with an optional quoted aside before or after the comma.
static COMMA_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let word = r"([A-Z][A-Za-z\-]*(?:['’][A-Za-z]+)?)";
    let aside = r#"(?:["“”‘’'][^"“”‘’']*["“”‘’']\s*)?"#;
    Regex::new(&format!(r"{word}\s*{aside},\s*{aside}{word}"))
        .expect("comma name pattern is valid")
});

/// First junk marker; everything from here on is annotation, not name.
static JUNK_MARKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:age|dob|room)\b|#").expect("junk pattern is valid"));

/// A way of reading a name out of raw OCR text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameStrategy {
    /// `"Smith, John"` becomes `"John Smith"` / `"Smith_John"`.
    CommaSeparated,
    /// Text before the first junk marker, used as-is.
    JunkStripped,
}

impl NameStrategy {
    /// Strategies in the order they are tried.
    pub const PRIORITY: [NameStrategy; 2] = [NameStrategy::CommaSeparated, NameStrategy::JunkStripped];

    /// Try this strategy. `None` means the input does not have this shape.
    pub fn apply(&self, raw: &str) -> Option<NormalizedName> {
        match self {
            NameStrategy::CommaSeparated => comma_separated(raw),
            NameStrategy::JunkStripped => junk_stripped(raw),
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            NameStrategy::CommaSeparated => "Last, First",
            NameStrategy::JunkStripped => "junk stripped",
        }
    }
}

fn comma_separated(raw: &str) -> Option<NormalizedName> {
    let caps = COMMA_NAME_PATTERN.captures(before_junk(raw))?;
    let last = caps.get(1)?.as_str();
    let first = caps.get(2)?.as_str();
    let identity_key = format!("{first} {last}");

    // A junk word glued into a name ("Jo-Age2") still reads as a marker in the key.
    if JUNK_MARKER_PATTERN.is_match(&identity_key) {
        return None;
    }

    Some(NormalizedName {
        identity_key,
        file_label: sanitize(&format!("{last}_{first}")),
    })
}

/// Text up to the first junk marker.
fn before_junk(raw: &str) -> &str {
    let end = JUNK_MARKER_PATTERN
        .find(raw)
        .map(|m| m.start())
        .unwrap_or(raw.len());
    &raw[..end]
}

fn junk_stripped(raw: &str) -> Option<NormalizedName> {
    let name = before_junk(raw).trim();

    if name.is_empty() {
        return None;
    }

    let file_label = sanitize(name);
    Some(NormalizedName {
        identity_key: name.to_string(),
        // A name made only of illegal characters still needs a usable label.
        file_label: if file_label.is_empty() {
            super::UNKNOWN_NAME.to_string()
        } else {
            file_label
        },
    })
}
