//! Text from a PDF's embedded text layer.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use crate::error::{Result, WoundscribeError};

use super::PageTextSource;

/// Reads the text layer of each page with lopdf.
///
/// Useful for scans that were OCR'd by the scanner itself. Pages whose text
/// cannot be decoded come back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextLayer;

impl PageTextSource for PdfTextLayer {
    fn extract_page_texts(&self, document: &Path) -> Result<Vec<String>> {
        let doc = load_document(document)?;

        let texts: Vec<String> = doc
            .get_pages()
            .into_keys()
            .map(|page_num| match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    warn!(page = page_num, error = %e, "No text layer for page");
                    String::new()
                }
            })
            .collect();

        debug!(path = %document.display(), pages = texts.len(), "Extracted PDF text layer");
        Ok(texts)
    }
}

/// Number of pages in a PDF.
pub fn pdf_page_count(document: &Path) -> Result<usize> {
    Ok(load_document(document)?.get_pages().len())
}

pub(crate) fn load_document(document: &Path) -> Result<Document> {
    Document::load(document).map_err(|e| WoundscribeError::Pdf {
        path: document.to_path_buf(),
        message: format!("Failed to load PDF: {}", e),
    })
}
