//! Main Woundscribe struct and public API.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, WoundscribeError};
use crate::input::PageTextSource;
use crate::output::{DocumentSlicer, OutputLayout};
use crate::reconcile::ReviewItem;
use crate::registry::{PatientRegistry, SimilarityScorer};
use crate::resolve::{DEFAULT_FUZZY_THRESHOLD, IdentityResolver, Resolution};
use crate::segment::{DocumentSegmenter, SegmenterConfig};

/// Default extension for output files.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "pdf";

/// Configuration for a processing run.
#[derive(Debug, Clone)]
pub struct WoundscribeConfig {
    /// Segmenter configuration.
    pub segmenter: SegmenterConfig,
    /// Minimum similarity (0-100) for a fuzzy registry match.
    pub fuzzy_threshold: f64,
    /// Extension for output files.
    pub output_extension: String,
}

impl Default for WoundscribeConfig {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::default(),
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }
}

impl WoundscribeConfig {
    /// Set the marker label that starts each patient's note.
    pub fn with_marker_label(mut self, label: impl Into<String>) -> Self {
        self.segmenter = self.segmenter.with_marker_label(label);
        self
    }

    /// Set the fuzzy match threshold.
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }
}

/// Result of processing one scanned batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Number of input pages.
    pub page_count: usize,
    /// Assignments and fuzzy matches.
    pub resolution: Resolution,
}

impl ProcessResult {
    /// Items an operator should review, unknown patients first.
    pub fn review_items(&self) -> Vec<ReviewItem> {
        ReviewItem::from_resolution(&self.resolution)
    }
}

/// One file written for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenFile {
    /// Patient identity key.
    pub identity_key: String,
    /// Clinic directory the file was filed under.
    pub clinic: String,
    /// Source pages in the file.
    pub pages: Vec<usize>,
    /// Where the file was written.
    pub path: PathBuf,
}

/// The segmentation + identity resolution pipeline.
#[derive(Debug, Clone)]
pub struct Woundscribe {
    config: WoundscribeConfig,
    segmenter: DocumentSegmenter,
    resolver: IdentityResolver,
}

impl Woundscribe {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self {
            config: WoundscribeConfig::default(),
            segmenter: DocumentSegmenter::new(),
            resolver: IdentityResolver::new(),
        }
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: WoundscribeConfig) -> Result<Self> {
        let segmenter = DocumentSegmenter::with_config(&config.segmenter)?;
        let resolver = IdentityResolver::new().with_threshold(config.fuzzy_threshold)?;
        if config.output_extension.trim().is_empty() {
            return Err(WoundscribeError::Config(
                "Output extension must not be empty".to_string(),
            ));
        }

        Ok(Self {
            config,
            segmenter,
            resolver,
        })
    }

    /// Use a different similarity scorer for fuzzy matching.
    pub fn with_scorer(mut self, scorer: impl SimilarityScorer + 'static) -> Self {
        self.resolver = self.resolver.with_scorer(scorer);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &WoundscribeConfig {
        &self.config
    }

    /// Segment page texts and resolve each document against the registry.
    ///
    /// The registry is updated in memory; saving it is up to the caller.
    pub fn process<S: AsRef<str>>(
        &self,
        page_texts: &[S],
        registry: &mut PatientRegistry,
    ) -> ProcessResult {
        let documents = self.segmenter.segment(page_texts);
        let resolution = self.resolver.resolve(documents, registry);

        info!(
            pages = page_texts.len(),
            documents = resolution.assignments.len(),
            fuzzy = resolution.fuzzy_candidates.len(),
            "Processed batch"
        );

        ProcessResult {
            page_count: page_texts.len(),
            resolution,
        }
    }

    /// Extract page texts from a document, then [`process`](Self::process) them.
    pub fn process_document(
        &self,
        source: &dyn PageTextSource,
        document: &Path,
        registry: &mut PatientRegistry,
    ) -> Result<ProcessResult> {
        let page_texts = source.extract_page_texts(document)?;
        Ok(self.process(&page_texts, registry))
    }

    /// Write one output file per assignment under `output_root`.
    pub fn write_outputs(
        &self,
        document: &Path,
        resolution: &Resolution,
        slicer: &dyn DocumentSlicer,
        output_root: &Path,
    ) -> Result<Vec<WrittenFile>> {
        let mut layout = OutputLayout::new(output_root, self.config.output_extension.clone());
        let mut written = Vec::with_capacity(resolution.assignments.len());

        for assignment in &resolution.assignments {
            let path = layout.reserve(&assignment.clinic, &assignment.file_label);
            slicer.write_slice(document, &assignment.pages, &path)?;
            info!(path = %path.display(), key = %assignment.identity_key, "Saved");

            written.push(WrittenFile {
                identity_key: assignment.identity_key.clone(),
                clinic: assignment.clinic.clone(),
                pages: assignment.pages.clone(),
                path,
            });
        }

        Ok(written)
    }
}

impl Default for Woundscribe {
    fn default() -> Self {
        Self::new()
    }
}
