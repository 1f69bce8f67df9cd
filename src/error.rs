use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabGrepError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid regular expression {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },
}

impl TabGrepError {
    pub fn pattern(pattern: &str, source: regex::Error) -> Self {
        TabGrepError::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    }

    /// Process exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            TabGrepError::Config { .. } => 2,
            TabGrepError::Pattern { .. } => 3,
            TabGrepError::Io(_)
            | TabGrepError::Read { .. }
            | TabGrepError::Write { .. }
            | TabGrepError::Walk(_)
            | TabGrepError::Prompt(_)
            | TabGrepError::InvalidPath { .. } => 4,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for TabGrepError {
    fn user_message(&self) -> String {
        match self {
            TabGrepError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            TabGrepError::Pattern { pattern, source } => {
                format!("Invalid regular expression {:?}: {}", pattern, source)
            }
            TabGrepError::Read { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            TabGrepError::Write { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            TabGrepError::Walk(err) => match err.path() {
                Some(path) => format!("Could not traverse {}: {}", path.display(), err),
                None => format!("Directory traversal failed: {}", err),
            },
            TabGrepError::InvalidPath { path } => {
                format!("Invalid input path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            TabGrepError::Config { .. } => Some(
                "Check the JSON syntax of the settings file and that AbsoluteFilePathRegExpPattern matches the input path.".to_string()
            ),
            TabGrepError::Pattern { .. } => Some(
                "Fix the regular expression in the settings file. Remember that backslashes must be escaped in JSON (e.g. \"\\\\d+\").".to_string()
            ),
            TabGrepError::Walk(_) => Some(
                "Ensure you have read permission for every directory under the data folder.".to_string()
            ),
            TabGrepError::Write { .. } => Some(
                "Ensure the output folder exists and is writable.".to_string()
            ),
            TabGrepError::InvalidPath { .. } => Some(
                "Check that the data folder exists. Surrounding quotes are stripped automatically.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TabGrepError>;
