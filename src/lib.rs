pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, GrepConfig};
pub use error::{Result, TabGrepError, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    render, DataExtractor, Extraction, ExtractionProgress, MatchRow, OutputNaming, ReportWriter,
    RunSummary,
};
pub use scanner::{sort_by_mod_time, FileSelector, PathFilter};
pub use ui::{OutputFormatter, OutputMode, ProgressManager, Prompter};

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// One configured extraction run: file selection, pattern extraction and
/// report writing, in that order. The first error aborts the run and no
/// report is written.
pub struct TabGrep {
    config: GrepConfig,
    config_path: PathBuf,
    selector: FileSelector,
    extractor: DataExtractor,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl TabGrep {
    /// Compiles both patterns up front, so a bad pattern fails before any
    /// file is visited.
    pub fn new<P: Into<PathBuf>>(
        config: GrepConfig,
        config_path: P,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Result<Self> {
        let selector =
            FileSelector::new(PathFilter::from_config(&config)?).with_recursive(config.recursive);
        let extractor = DataExtractor::from_config(&config)?;

        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Ok(Self {
            config,
            config_path: config_path.into(),
            selector,
            extractor,
            output_formatter,
            progress_manager,
        })
    }

    /// Loads the settings file and applies command-line overrides.
    pub fn from_cli<P: AsRef<Path>>(cli_args: &Cli, config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let mut config = GrepConfig::load_from_file(config_path)?;
        config.merge_with_cli_args(&cli_args.create_cli_overrides());

        Self::new(
            config,
            config_path,
            cli_args.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        )
    }

    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output_dir: Q) -> Result<RunSummary> {
        let start_time = Instant::now();
        let input = input.as_ref();

        self.output_formatter.info(&self.config.to_string());

        let files = self.select_files(input)?;

        self.output_formatter.phase("Find matches");
        let extraction = self.extract_rows(&files)?;
        self.output_formatter
            .phase(&format!("Match Count = {}", extraction.rows.len()));

        let report = render(&self.config.column_header, &extraction.rows);
        let writer = ReportWriter::new(output_dir.as_ref());
        let naming = self.output_naming();

        self.output_formatter.phase(&format!(
            "Writing file: {:?}",
            writer.output_path(&naming).display().to_string()
        ));
        let output_path = writer.write(&naming, &report)?;

        info!(
            files = files.len(),
            rows = extraction.rows.len(),
            output = %output_path.display(),
            "run finished"
        );

        Ok(RunSummary {
            config_path: self.config_path.clone(),
            input_path: input.to_path_buf(),
            output_path,
            files_selected: files.len(),
            matches: extraction.rows.len(),
            bytes_scanned: extraction.progress.bytes_processed,
            bytes_written: report.len(),
            duration: start_time.elapsed(),
            completed_at: chrono::Local::now(),
        })
    }

    /// Selects, and when configured sorts, the files to scan.
    pub fn select_files(&self, input: &Path) -> Result<Vec<PathBuf>> {
        self.output_formatter.phase("Populate files");

        let spinner = self.progress_manager.create_spinner("Listing files...");
        let selected = self.selector.select(input);
        spinner.finish_and_clear();
        let files = selected?;

        self.output_formatter
            .phase(&format!("File Count = {}", files.len()));
        if self.output_formatter.debug_enabled() {
            let statistics = self.selector.get_statistics(&files)?;
            self.output_formatter.debug(&statistics.display_summary());
        }

        if self.config.sort_by_mod_time {
            let files = sort_by_mod_time(files)?;
            self.output_formatter.phase("Files are sorted by Mod Time.");
            return Ok(files);
        }

        Ok(files)
    }

    fn extract_rows(&self, files: &[PathBuf]) -> Result<Extraction> {
        let progress_bar = self.progress_manager.create_extraction_progress();
        let progress_callback = {
            let pb = progress_bar.clone();
            let formatter = &self.output_formatter;
            move |progress: &ExtractionProgress| {
                ui::progress::update_extraction_progress(&pb, progress);
                formatter.progress(progress.percentage());
            }
        };

        let extraction = match self.extractor.extract(files, Some(&progress_callback)) {
            Ok(extraction) => extraction,
            Err(e) => {
                progress_bar.abandon();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &progress_bar,
            &format!("Scanned {} files", extraction.progress.files_processed),
            extraction.progress.elapsed(),
        );

        Ok(extraction)
    }

    pub fn output_naming(&self) -> OutputNaming {
        self.config.output_naming(&self.config_path)
    }

    pub fn config(&self) -> &GrepConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &TabGrepError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }

    /// Writes a sample settings file.
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let path = output_path.as_ref();
        std::fs::write(path, GrepConfig::create_sample_config()).map_err(|e| {
            TabGrepError::Write {
                path: path.to_path_buf(),
                source: e,
            }
        })
    }
}
