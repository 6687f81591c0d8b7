//! Page text sources.
//!
//! Text recognition happens outside this crate. A [`PageTextSource`] hands
//! back one string per page, already in page order; noise and empty pages are
//! normal input, not errors.

mod pdf;
mod text_file;

use std::path::Path;

use crate::error::Result;

pub use pdf::{PdfTextLayer, pdf_page_count};
pub(crate) use pdf::load_document as pdf_load;
pub use text_file::{PAGE_SEPARATOR, PageTextFile};

/// Produces per-page text for a source document.
pub trait PageTextSource {
    /// One entry per page, in page order.
    fn extract_page_texts(&self, document: &Path) -> Result<Vec<String>>;
}
