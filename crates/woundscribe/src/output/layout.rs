//! Output path planning.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::normalize::{UNKNOWN_NAME, sanitize};

/// `<root>/<clinic>/<label>.<ext>`, with clinic and label made filesystem-safe.
pub fn destination_path(root: &Path, clinic: &str, label: &str, extension: &str) -> PathBuf {
    root.join(safe_component(clinic))
        .join(format!("{}.{}", safe_component(label), extension))
}

fn safe_component(s: &str) -> String {
    let safe = sanitize(s);
    // "." and ".." would escape the clinic directory.
    if safe.is_empty() || safe.chars().all(|c| c == '.') {
        UNKNOWN_NAME.to_string()
    } else {
        safe
    }
}

/// Hands out destination paths for one run without collisions.
///
/// The first document for a clinic/label pair gets `<label>.<ext>`; later ones
/// get `<label>_2.<ext>`, `<label>_3.<ext>`, and so on.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    extension: String,
    used: HashSet<PathBuf>,
}

impl OutputLayout {
    /// Create a layout under `root` using `extension` for every file.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            used: HashSet::new(),
        }
    }

    /// Output root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reserve the next free path for a document.
    pub fn reserve(&mut self, clinic: &str, label: &str) -> PathBuf {
        let mut path = destination_path(&self.root, clinic, label, &self.extension);
        let mut n = 2;
        while self.used.contains(&path) {
            path = destination_path(&self.root, clinic, &format!("{label}_{n}"), &self.extension);
            n += 1;
        }
        self.used.insert(path.clone());
        path
    }
}
