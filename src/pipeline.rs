//! Pipeline orchestration
//!
//! Ties the stages together: read a log file, parse it into totals, derive
//! the report, and persist it. A directory is processed file by file; one
//! file failing never stops the rest.

use crate::calculator::CalorieCalculator;
use crate::error::ProcessError;
use crate::parser::{RunLogParser, SkippedLine};
use crate::storage::ReportStore;
use crate::types::{BodyWeight, RunReport};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of processing a single log file
#[derive(Debug)]
pub struct FileSummary {
    /// The computed report
    pub report: RunReport,
    /// Where the rendered report was written
    pub report_path: PathBuf,
    /// Data lines that were skipped, in file order
    pub skipped: Vec<SkippedLine>,
}

/// Per-file result when processing a path
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<FileSummary, ProcessError>,
}

/// Process one run log and write its report
///
/// Convenience wrapper around [`RunProcessor`] for one-shot use.
pub fn process_log(
    path: &Path,
    weight: BodyWeight,
    output_dir: &Path,
) -> Result<FileSummary, ProcessError> {
    RunProcessor::new(weight, ReportStore::new(output_dir)).process_file(path)
}

/// Stateful processor holding the session weight and report store
pub struct RunProcessor {
    weight: BodyWeight,
    store: ReportStore,
}

impl RunProcessor {
    /// Create a processor for the given weight and store
    pub fn new(weight: BodyWeight, store: ReportStore) -> Self {
        Self { weight, store }
    }

    /// Store reports are written through
    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// Process a file, or every regular file in a directory
    ///
    /// Directory entries are handled in file-name order. An entry that fails
    /// carries the error in its outcome; the remaining entries still run.
    pub fn process_path(&self, path: &Path) -> Result<Vec<FileOutcome>, ProcessError> {
        if !path.exists() {
            return Err(ProcessError::MissingPath(path.to_path_buf()));
        }

        if path.is_dir() {
            let mut files: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|entry| entry.is_file())
                .collect();
            files.sort();

            Ok(files
                .into_iter()
                .map(|file| FileOutcome {
                    result: self.process_file(&file),
                    path: file,
                })
                .collect())
        } else {
            Ok(vec![FileOutcome {
                result: self.process_file(path),
                path: path.to_path_buf(),
            }])
        }
    }

    /// Process a single log file end to end
    ///
    /// Stages:
    /// 1. Read the file text
    /// 2. RunLogParser - fold data lines into totals
    /// 3. CalorieCalculator - derive the report
    /// 4. ReportStore - persist the rendered report
    pub fn process_file(&self, path: &Path) -> Result<FileSummary, ProcessError> {
        let text = fs::read_to_string(path)?;
        let parsed = RunLogParser::parse(&text);
        let report = CalorieCalculator::summarize(parsed.totals, self.weight);

        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        let report_path = self.store.write(&source_name, &report)?;

        Ok(FileSummary {
            report,
            report_path,
            skipped: parsed.skipped,
        })
    }
}
