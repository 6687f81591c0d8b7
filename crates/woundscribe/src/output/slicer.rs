//! Page slicing with lopdf.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, WoundscribeError};
use crate::input::pdf_load;

/// Writes a new document containing only some pages of a source document.
pub trait DocumentSlicer {
    /// Write `pages` (0-based) of `document` to `destination`, creating
    /// parent directories as needed.
    fn write_slice(&self, document: &Path, pages: &[usize], destination: &Path) -> Result<()>;
}

/// Slices PDFs by deleting every page not selected.
///
/// Pages keep their source order; duplicates in the selection are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfSlicer;

impl DocumentSlicer for LopdfSlicer {
    fn write_slice(&self, document: &Path, pages: &[usize], destination: &Path) -> Result<()> {
        if pages.is_empty() {
            return Err(WoundscribeError::InvalidPageSelection(
                "no pages selected".to_string(),
            ));
        }

        let mut doc = pdf_load(document)?;
        let total = doc.get_pages().len();

        if let Some(&bad) = pages.iter().find(|&&p| p >= total) {
            return Err(WoundscribeError::InvalidPageSelection(format!(
                "page index {} out of range for '{}' ({} pages)",
                bad,
                document.display(),
                total
            )));
        }

        // lopdf numbers pages from 1.
        let keep: BTreeSet<u32> = pages.iter().map(|&p| p as u32 + 1).collect();
        let delete: Vec<u32> = (1..=total as u32).filter(|n| !keep.contains(n)).collect();
        doc.delete_pages(&delete);
        doc.prune_objects();
        doc.compress();

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| WoundscribeError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        doc.save(destination).map_err(|e| WoundscribeError::Pdf {
            path: destination.to_path_buf(),
            message: format!("Failed to save slice: {}", e),
        })?;

        debug!(
            source = %document.display(),
            destination = %destination.display(),
            pages = keep.len(),
            "Wrote slice"
        );
        Ok(())
    }
}
