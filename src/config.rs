use crate::error::{Result, TabGrepError};
use crate::extractor::OutputNaming;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Settings loaded from the JSON settings file.
///
/// Field names on disk follow the settings format used by existing
/// configuration files. Unknown fields are ignored and missing fields take
/// their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GrepConfig {
    #[serde(rename = "AbsoluteFilePathRegExpPattern")]
    pub file_path_pattern: String,

    #[serde(rename = "SearchFilesRecursively")]
    pub recursive: bool,

    #[serde(rename = "SortFilesByModTime")]
    pub sort_by_mod_time: bool,

    #[serde(rename = "DataRegExpPattern")]
    pub data_pattern: String,

    #[serde(rename = "ColumnHeaderSpaceSeparated")]
    pub column_header: String,

    #[serde(rename = "OutputFileName", skip_serializing_if = "String::is_empty")]
    pub output_file_name: String,
}

impl GrepConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TabGrepError::Config {
                message: format!("Settings file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| TabGrepError::Config {
            message: format!("Failed to read settings file {}: {}", path.display(), e),
        })?;

        Self::from_json(&content).map_err(|e| TabGrepError::Config {
            message: format!("Failed to parse settings file {}: {}", path.display(), e),
        })
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn merge_with_cli_args(&mut self, overrides: &CliOverrides) {
        if let Some(recursive) = overrides.recursive {
            self.recursive = recursive;
        }

        if let Some(sort) = overrides.sort_by_mod_time {
            self.sort_by_mod_time = sort;
        }

        if let Some(ref name) = overrides.output_file_name {
            self.output_file_name = name.clone();
        }
    }

    /// Compiles both patterns so syntax errors surface before any file is touched.
    pub fn validate(&self) -> Result<()> {
        self.compile_path_pattern()?;
        self.compile_data_pattern()?;
        Ok(())
    }

    pub fn compile_path_pattern(&self) -> Result<regex::Regex> {
        regex::Regex::new(&self.file_path_pattern)
            .map_err(|e| TabGrepError::pattern(&self.file_path_pattern, e))
    }

    pub fn compile_data_pattern(&self) -> Result<regex::bytes::Regex> {
        regex::bytes::Regex::new(&self.data_pattern)
            .map_err(|e| TabGrepError::pattern(&self.data_pattern, e))
    }

    /// Picks how the report file is named: an explicit `OutputFileName`
    /// wins, otherwise the name is derived from the settings file.
    pub fn output_naming<P: AsRef<Path>>(&self, config_path: P) -> OutputNaming {
        if self.output_file_name.is_empty() {
            OutputNaming::ConfigStem(config_path.as_ref().to_path_buf())
        } else {
            OutputNaming::Explicit(self.output_file_name.clone())
        }
    }

    pub fn create_sample_config() -> String {
        let sample = Self {
            file_path_pattern: r".*\.log$".to_string(),
            recursive: true,
            sort_by_mod_time: false,
            data_pattern: r"(\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}) ([A-Z]+)".to_string(),
            column_header: "DateTime Event".to_string(),
            output_file_name: String::new(),
        };
        serde_json::to_string_pretty(&sample).unwrap_or_else(|_| String::new())
    }
}

impl fmt::Display for GrepConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GrepConfig; FilePattern={:?}; Recursively={}; SortByModTime={}; RegExp={:?}; ColumnHeader={:?};",
            self.file_path_pattern,
            self.recursive,
            self.sort_by_mod_time,
            self.data_pattern,
            self.column_header
        )
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub recursive: Option<bool>,
    pub sort_by_mod_time: Option<bool>,
    pub output_file_name: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recursive(mut self, recursive: Option<bool>) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_sort_by_mod_time(mut self, sort: Option<bool>) -> Self {
        self.sort_by_mod_time = sort;
        self
    }

    pub fn with_output_file_name(mut self, name: Option<String>) -> Self {
        self.output_file_name = name;
        self
    }
}
