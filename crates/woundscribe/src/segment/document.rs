//! Logical documents produced by segmentation.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A contiguous run of source pages attributed to one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentFields")]
pub struct Document {
    /// 0-based page indices, contiguous and strictly increasing.
    pages: Vec<usize>,

    /// Name captured from the marker, or `None` for pages before the first marker.
    raw_name: Option<String>,
}

/// Unchecked wire form of a [`Document`].
#[derive(Deserialize)]
struct DocumentFields {
    pages: Vec<usize>,
    raw_name: Option<String>,
}

impl TryFrom<DocumentFields> for Document {
    type Error = String;

    fn try_from(fields: DocumentFields) -> Result<Self, Self::Error> {
        if fields.pages.is_empty() {
            return Err("document must hold at least one page".to_string());
        }
        if fields.pages.windows(2).any(|w| w[0].checked_add(1) != Some(w[1])) {
            return Err(format!("document pages are not contiguous: {:?}", fields.pages));
        }
        Ok(Self {
            pages: fields.pages,
            raw_name: fields.raw_name,
        })
    }
}

impl Document {
    /// Create a document over a page range.
    ///
    /// Returns `None` for an empty range; documents always hold at least one page.
    pub fn new(pages: Range<usize>, raw_name: Option<String>) -> Option<Self> {
        if pages.is_empty() {
            return None;
        }
        Some(Self {
            pages: pages.collect(),
            raw_name,
        })
    }

    /// Page indices in this document.
    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    /// The raw marker capture, if any.
    pub fn raw_name(&self) -> Option<&str> {
        self.raw_name.as_deref()
    }

    /// First page index.
    pub fn first_page(&self) -> usize {
        self.pages[0]
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Split into pages and name, consuming the document.
    pub fn into_parts(self) -> (Vec<usize>, Option<String>) {
        (self.pages, self.raw_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_range_is_rejected() {
        assert!(Document::new(3..3, None).is_none());
    }

    #[test]
    fn test_document_accessors() {
        let doc = Document::new(2..5, Some("Doe, Jane".to_string())).unwrap();
        assert_eq!(doc.pages(), &[2, 3, 4]);
        assert_eq!(doc.first_page(), 2);
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.raw_name(), Some("Doe, Jane"));
    }

    #[test]
    fn test_deserialize_checks_pages() {
        let doc: Document = serde_json::from_str(r#"{"pages":[4,5],"raw_name":"Doe, Jane"}"#).unwrap();
        assert_eq!(doc, Document::new(4..6, Some("Doe, Jane".to_string())).unwrap());

        assert!(serde_json::from_str::<Document>(r#"{"pages":[],"raw_name":null}"#).is_err());
        assert!(serde_json::from_str::<Document>(r#"{"pages":[1,3],"raw_name":null}"#).is_err());
    }
}
