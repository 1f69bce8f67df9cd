pub mod data_extractor;
pub mod report;

pub use data_extractor::{DataExtractor, Extraction, ExtractionProgress, MatchRow};
pub use report::{render, OutputNaming, ReportWriter, RunSummary};
