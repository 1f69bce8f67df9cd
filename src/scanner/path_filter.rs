use crate::config::GrepConfig;
use crate::error::{Result, TabGrepError};
use regex::Regex;
use std::path::Path;

/// Matches candidate files by their full path.
pub struct PathFilter {
    pattern: Regex,
}

impl PathFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| TabGrepError::pattern(pattern, e))?;
        Ok(Self { pattern })
    }

    pub fn from_config(config: &GrepConfig) -> Result<Self> {
        Ok(Self {
            pattern: config.compile_path_pattern()?,
        })
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.pattern.is_match(&path.to_string_lossy())
    }

    /// A single-file input must be selected by the pattern; anything else
    /// means the settings do not describe this file.
    pub fn require_match(&self, path: &Path) -> Result<()> {
        if self.is_match(path) {
            Ok(())
        } else {
            Err(TabGrepError::Config {
                message: format!(
                    "File path pattern {:?} does not match input file {}",
                    self.pattern.as_str(),
                    path.display()
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_full_path() {
        let filter = PathFilter::new(r".*\.txt$").unwrap();

        assert!(filter.is_match(Path::new("/data/a.txt")));
        assert!(filter.is_match(Path::new("relative/dir/b.txt")));
        assert!(!filter.is_match(Path::new("/data/b.log")));
        assert!(!filter.is_match(Path::new("/data/a.txt.bak")));
    }

    #[test]
    fn test_pattern_sees_directories() {
        let filter = PathFilter::new(r"/logs/2024/").unwrap();

        assert!(filter.is_match(Path::new("/srv/logs/2024/app.log")));
        assert!(!filter.is_match(Path::new("/srv/logs/2023/app.log")));
    }

    #[test]
    fn test_unanchored_pattern_matches_substring() {
        let filter = PathFilter::new("report").unwrap();
        assert!(filter.is_match(Path::new("/tmp/monthly_report_01.csv")));
    }

    #[test]
    fn test_require_match() {
        let filter = PathFilter::new(r"\.csv$").unwrap();

        assert!(filter.require_match(Path::new("/data/x.csv")).is_ok());
        let err = filter.require_match(Path::new("/data/x.txt")).unwrap_err();
        assert!(matches!(err, TabGrepError::Config { .. }));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PathFilter::new("(*");
        assert!(matches!(result, Err(TabGrepError::Pattern { .. })));
    }
}
