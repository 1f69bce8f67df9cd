use crate::error::{Result, TabGrepError};
use crate::extractor::MatchRow;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const COLUMN_SEPARATOR: &[u8] = b"\t";
const LINE_SEPARATOR: &[u8] = b"\n";
const REPORT_EXTENSION: &str = "txt";

/// Builds the tab-separated report: the header with spaces turned into
/// tabs, then one line per row with its fields joined by tabs. Every line,
/// including the last, ends with a single line feed.
pub fn render(header: &str, rows: &[MatchRow]) -> Vec<u8> {
    let mut report = header.replace(' ', "\t").into_bytes();
    report.extend_from_slice(LINE_SEPARATOR);

    for row in rows {
        report.extend(row.join(COLUMN_SEPARATOR));
        report.extend_from_slice(LINE_SEPARATOR);
    }

    report
}

/// How the report file inside the output folder is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNaming {
    /// Use this file name verbatim.
    Explicit(String),
    /// Settings file name up to its first dot, plus `.txt`.
    ConfigStem(PathBuf),
}

impl OutputNaming {
    pub fn file_name(&self) -> String {
        match self {
            OutputNaming::Explicit(name) => name.clone(),
            OutputNaming::ConfigStem(config_path) => {
                let base = config_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let stem = base.split('.').next().unwrap_or_default();
                format!("{}.{}", stem, REPORT_EXTENSION)
            }
        }
    }
}

pub struct ReportWriter {
    output_directory: PathBuf,
}

impl ReportWriter {
    pub fn new<P: Into<PathBuf>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.into(),
        }
    }

    pub fn output_path(&self, naming: &OutputNaming) -> PathBuf {
        self.output_directory.join(naming.file_name())
    }

    /// Writes the whole buffer in one go, creating or truncating the file.
    pub fn write(&self, naming: &OutputNaming, report: &[u8]) -> Result<PathBuf> {
        let path = self.output_path(naming);

        fs::write(&path, report).map_err(|e| TabGrepError::Write {
            path: path.clone(),
            source: e,
        })?;

        debug!(path = %path.display(), bytes = report.len(), "report written");
        Ok(path)
    }
}

/// Outcome of one run, for the final status output.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub config_path: PathBuf,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub files_selected: usize,
    pub matches: usize,
    pub bytes_scanned: u64,
    pub bytes_written: usize,
    pub duration: Duration,
    pub completed_at: DateTime<Local>,
}
