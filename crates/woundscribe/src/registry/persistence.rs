//! Persistence for the patient registry - save/load JSON files.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, WoundscribeError};

use super::record::PatientRegistry;

/// Where the registry lives unless configured otherwise.
pub const DEFAULT_REGISTRY_PATH: &str = "data/patient_map.json";

impl PatientRegistry {
    /// Load the registry from a JSON file.
    ///
    /// A missing file is an empty registry. A file that exists but does not
    /// parse is [`WoundscribeError::RegistryCorrupt`]; nothing is partially loaded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "No registry file; starting empty");
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path).map_err(|e| WoundscribeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let registry: PatientRegistry =
            serde_json::from_str(&contents).map_err(|e| WoundscribeError::RegistryCorrupt {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), patients = registry.len(), "Loaded registry");
        Ok(registry)
    }

    /// Save the whole registry to a JSON file.
    ///
    /// The file is written to a temporary sibling and renamed into place, so
    /// a failed save never leaves a half-written registry behind.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use woundscribe::registry::PatientRegistry;
    /// # fn example(registry: &PatientRegistry) -> woundscribe::Result<()> {
    /// registry.save("data/patient_map.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                WoundscribeError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = NamedTempFile::new_in(parent).map_err(|e| {
            WoundscribeError::Persistence(format!(
                "Failed to create temporary file in '{}': {}",
                parent.display(),
                e
            ))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| {
            WoundscribeError::Persistence(format!("Failed to serialize registry: {}", e))
        })?;
        writer.write_all(b"\n").map_err(|e| {
            WoundscribeError::Persistence(format!("Failed to write registry: {}", e))
        })?;

        let file = writer.into_inner().map_err(|e| {
            WoundscribeError::Persistence(format!("Failed to flush registry: {}", e.error()))
        })?;
        file.persist(path).map_err(|e| {
            WoundscribeError::Persistence(format!(
                "Failed to replace '{}': {}",
                path.display(),
                e.error
            ))
        })?;

        info!(path = %path.display(), patients = self.len(), "Saved registry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UNKNOWN_CLINIC;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_registry() {
        let dir = TempDir::new().unwrap();
        let registry = PatientRegistry::load(dir.path().join("absent.json")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patient_map.json");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let mut registry = PatientRegistry::new();
        registry.upsert_on("John Smith", "Riverside", date);
        registry.upsert_on("Jane Doe", UNKNOWN_CLINIC, date);
        registry.save(&path).unwrap();

        let loaded = PatientRegistry::load(&path).unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data").join("patient_map.json");

        PatientRegistry::new().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patient_map.json");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let mut registry = PatientRegistry::new();
        registry.upsert_on("John Smith", "Riverside", date);
        registry.save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["John Smith"]["clinic"], "Riverside");
        assert_eq!(value["John Smith"]["last_updated"], "2024-03-09");
    }

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patient_map.json");
        fs::write(
            &path,
            r#"{"John Smith": {"clinic": "Riverside", "last_updated": "2024-03-09", "notes": "left heel"}}"#,
        )
        .unwrap();

        let registry = PatientRegistry::load(&path).unwrap();
        registry.save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["John Smith"]["notes"], "left heel");
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patient_map.json");

        for contents in ["{not json", r#"{"John Smith": {"clinic": 3}}"#, r#"["a", "b"]"#] {
            fs::write(&path, contents).unwrap();
            let err = PatientRegistry::load(&path).unwrap_err();
            assert!(matches!(err, WoundscribeError::RegistryCorrupt { .. }), "{contents}");
        }
    }

    #[test]
    fn test_bad_date_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patient_map.json");
        fs::write(&path, r#"{"A": {"clinic": "X", "last_updated": "yesterday"}}"#).unwrap();

        assert!(matches!(
            PatientRegistry::load(&path),
            Err(WoundscribeError::RegistryCorrupt { .. })
        ));
    }
}
