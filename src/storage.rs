//! Report storage
//!
//! Owns the output directory: writes rendered reports into it, lists what
//! has been saved, and streams a saved report back verbatim.

use crate::error::ProcessError;
use crate::report;
use crate::types::RunReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One entry in the saved-statistics listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedReport {
    /// File name within the output directory
    pub name: String,
    /// Last modification time, when the filesystem reports one
    pub modified: Option<DateTime<Utc>>,
}

/// Store for generated report files
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new(crate::DEFAULT_OUTPUT_DIR)
    }
}

impl ReportStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory reports are written to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a rendered report named after its source file
    ///
    /// The output directory is created on demand; creating it when it
    /// already exists is a no-op.
    pub fn write(&self, source_name: &str, report: &RunReport) -> Result<PathBuf, ProcessError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(source_name);
        fs::write(&path, report::render(report))?;
        Ok(path)
    }

    /// List saved reports, sorted by file name
    ///
    /// A missing or empty output directory yields an empty list.
    pub fn list(&self) -> Result<Vec<SavedReport>, ProcessError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let modified = entry.metadata()?.modified().ok().map(DateTime::<Utc>::from);
            entries.push(SavedReport {
                name: entry.file_name().to_string_lossy().into_owned(),
                modified,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Read a saved report's text, unmodified
    pub fn read(&self, name: &str) -> Result<String, ProcessError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(ProcessError::UnknownReport(name.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_report() -> RunReport {
        RunReport {
            calories_burned: 600.25,
            avg_speed_mph: 5.966,
            total_distance_km: 8.0,
            total_time_minutes: 50.0,
        }
    }

    #[test]
    fn test_write_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("output"));

        let path = store.write("run1.txt", &sample_report()).unwrap();
        assert_eq!(path, store.root().join("run1.txt"));

        // Writing again must not fail on the existing directory.
        store.write("run1.txt", &sample_report()).unwrap();

        assert_eq!(store.read("run1.txt").unwrap(), report::render(&sample_report()));
    }

    #[test]
    fn test_list_is_sorted_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        store.write("b.txt", &sample_report()).unwrap();
        store.write("a.txt", &sample_report()).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("never-created"));

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_read_unknown_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        assert!(matches!(
            store.read("missing.txt"),
            Err(ProcessError::UnknownReport(name)) if name == "missing.txt"
        ));
    }
}
