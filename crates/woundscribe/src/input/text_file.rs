//! Page text from an OCR output file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, WoundscribeError};

use super::PageTextSource;

/// Form feed, the page break written by tesseract and pdftotext.
pub const PAGE_SEPARATOR: char = '\x0c';

/// Page texts read from a plain-text file with pages separated by form feeds.
///
/// The document path passed to [`PageTextSource::extract_page_texts`] is not
/// read; the text was produced from it beforehand.
#[derive(Debug, Clone)]
pub struct PageTextFile {
    path: PathBuf,
}

impl PageTextFile {
    /// Read page texts from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Split text into pages.
    ///
    /// A single trailing separator does not start an extra page, and empty
    /// text has no pages.
    pub fn split_pages(text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let text = text.strip_suffix(PAGE_SEPARATOR).unwrap_or(text);
        text.split(PAGE_SEPARATOR).map(str::to_string).collect()
    }
}

impl PageTextSource for PageTextFile {
    fn extract_page_texts(&self, _document: &Path) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path).map_err(|e| WoundscribeError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let pages = Self::split_pages(&text);
        debug!(path = %self.path.display(), pages = pages.len(), "Read page text file");
        Ok(pages)
    }
}
