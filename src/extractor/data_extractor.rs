use crate::config::GrepConfig;
use crate::error::{Result, TabGrepError};
use regex::bytes::Regex;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Capture groups 1..N of one match, as raw bytes.
pub type MatchRow = Vec<Vec<u8>>;

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub bytes_processed: u64,
    pub matches_found: usize,
    pub current_file: Option<String>,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            bytes_processed: 0,
            matches_found: 0,
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn update_file(&mut self, filename: String, bytes: u64, matches: usize) {
        self.files_processed += 1;
        self.bytes_processed += bytes;
        self.matches_found += matches;
        self.current_file = Some(filename);
    }

    /// Whole percent of files processed, rounded down.
    pub fn percentage(&self) -> u64 {
        if self.total_files == 0 {
            0
        } else {
            (self.files_processed * 100 / self.total_files) as u64
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub rows: Vec<MatchRow>,
    pub progress: ExtractionProgress,
}

pub struct DataExtractor {
    pattern: Regex,
}

impl DataExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| TabGrepError::pattern(pattern, e))?;
        Ok(Self { pattern })
    }

    pub fn from_config(config: &GrepConfig) -> Result<Self> {
        Ok(Self {
            pattern: config.compile_data_pattern()?,
        })
    }

    /// All non-overlapping matches in `contents`, without the whole-match group.
    /// A group that did not take part in the match yields an empty field.
    pub fn extract_rows(&self, contents: &[u8]) -> Vec<MatchRow> {
        self.pattern
            .captures_iter(contents)
            .map(|caps| {
                caps.iter()
                    .skip(1)
                    .map(|group| group.map(|m| m.as_bytes().to_vec()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Reads every file in order and collects its rows. Any read failure
    /// aborts the whole extraction.
    pub fn extract(
        &self,
        files: &[PathBuf],
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<Extraction> {
        let mut progress = ExtractionProgress::new(files.len());
        let mut rows = Vec::new();

        if files.is_empty() {
            debug!("no files selected, skipping extraction");
            return Ok(Extraction { rows, progress });
        }

        for file in files {
            let contents = fs::read(file).map_err(|e| TabGrepError::Read {
                path: file.clone(),
                source: e,
            })?;

            let file_rows = self.extract_rows(&contents);
            trace!(path = %file.display(), matches = file_rows.len(), "scanned");

            progress.update_file(
                file.display().to_string(),
                contents.len() as u64,
                file_rows.len(),
            );
            rows.extend(file_rows);

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        debug!(
            files = progress.files_processed,
            matches = rows.len(),
            bytes = progress.bytes_processed,
            "extraction finished"
        );

        Ok(Extraction { rows, progress })
    }
}
