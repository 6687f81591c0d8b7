//! Marker-driven page segmentation.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::normalize::UNKNOWN_NAME;

use super::document::Document;

/// Label that starts a new patient note on the facility's forms.
pub const DEFAULT_MARKER_LABEL: &str = "Resident Name";

/// Characters allowed in a captured name, including OCR'd curly quotes.
const NAME_CHARS: &str = r#"[A-Za-z’‘".,\- ]+"#;

static DEFAULT_MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    marker_pattern(DEFAULT_MARKER_LABEL).expect("default marker pattern is valid")
});

/// Segmenter configuration.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Marker label preceding the patient name (matched case-insensitively).
    pub marker_label: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            marker_label: DEFAULT_MARKER_LABEL.to_string(),
        }
    }
}

impl SegmenterConfig {
    /// Use a different marker label.
    pub fn with_marker_label(mut self, label: impl Into<String>) -> Self {
        self.marker_label = label.into();
        self
    }
}

/// Splits an ordered page stream into per-patient documents.
#[derive(Debug, Clone)]
pub struct DocumentSegmenter {
    marker: Regex,
}

impl DocumentSegmenter {
    /// Create a segmenter looking for [`DEFAULT_MARKER_LABEL`].
    pub fn new() -> Self {
        Self {
            marker: DEFAULT_MARKER_PATTERN.clone(),
        }
    }

    /// Create a segmenter with custom configuration.
    pub fn with_config(config: &SegmenterConfig) -> Result<Self> {
        Ok(Self {
            marker: marker_pattern(&config.marker_label)?,
        })
    }

    /// Segment page texts into documents.
    ///
    /// Every page lands in exactly one document, in page order. Pages before
    /// the first marker form a leading document without a name; a stream
    /// with no markers at all is a single unnamed document.
    pub fn segment<S: AsRef<str>>(&self, page_texts: &[S]) -> Vec<Document> {
        let mut documents = Vec::new();
        let mut start = 0;
        let mut name: Option<String> = None;
        let mut markers = 0usize;

        for (index, text) in page_texts.iter().enumerate() {
            match self.find_name(text.as_ref()) {
                Some(found) => {
                    markers += 1;
                    debug!(page = index + 1, name = %found, "Found name marker");
                    if let Some(document) = Document::new(start..index, name.take()) {
                        documents.push(document);
                    }
                    start = index;
                    name = Some(found);
                }
                None => debug!(page = index + 1, "No name marker"),
            }
        }

        if let Some(document) = Document::new(start..page_texts.len(), name) {
            documents.push(document);
        }

        if markers == 0 && !page_texts.is_empty() {
            warn!(
                pages = page_texts.len(),
                "No name markers found; treating all pages as one unnamed document"
            );
        }
        info!(documents = documents.len(), markers, "Segmentation complete");

        documents
    }

    /// Find the marker on a page and return the trimmed name capture.
    pub fn find_name(&self, text: &str) -> Option<String> {
        let caps = self.marker.captures(text)?;
        let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();

        if name.is_empty() {
            Some(UNKNOWN_NAME.to_string())
        } else {
            Some(name.to_string())
        }
    }
}

impl Default for DocumentSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the marker regex: label, separator run, then the name capture.
///
/// Whitespace inside the label matches any whitespace run, since OCR often
/// doubles spaces.
fn marker_pattern(label: &str) -> Result<Regex> {
    let label = label
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    Ok(Regex::new(&format!(r"(?i){label}[:\-_ ]*\s*({NAME_CHARS})"))?)
}
