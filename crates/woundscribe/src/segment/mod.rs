//! Document segmentation.
//!
//! A scanned batch is one long run of pages covering many patients. Each
//! patient's note starts on a page carrying a name marker such as
//! `Resident Name: Smith, John`. The segmenter cuts the page stream at every
//! marker, so that each logical [`Document`] is a contiguous run of pages.

mod document;
mod segmenter;

pub use document::Document;
pub use segmenter::{DEFAULT_MARKER_LABEL, DocumentSegmenter, SegmenterConfig};
