use crate::error::{Result, TabGrepError};
use crate::scanner::path_filter::PathFilter;
use crate::ui::output::format_bytes;
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

pub struct FileSelector {
    filter: PathFilter,
    recursive: bool,
}

impl FileSelector {
    pub fn new(filter: PathFilter) -> Self {
        Self {
            filter,
            recursive: false,
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Lists the files to extract from.
    ///
    /// A regular file as `root` is returned as-is, provided the pattern
    /// matches it. A directory is walked (one level, or the whole subtree
    /// when recursive) and every regular file whose full path matches the
    /// pattern is kept; a symlink counts when its target is a regular file.
    /// Entries within a directory are visited in file name order. The first traversal error aborts the selection.
    pub fn select<P: AsRef<Path>>(&self, root: P) -> Result<Vec<PathBuf>> {
        let root_path = root.as_ref();

        let metadata = fs::metadata(root_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TabGrepError::InvalidPath {
                    path: format!("{} does not exist", root_path.display()),
                }
            } else {
                TabGrepError::Read {
                    path: root_path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if !metadata.is_dir() {
            self.filter.require_match(root_path)?;
            debug!(path = %root_path.display(), "input is a single file");
            return Ok(vec![root_path.to_path_buf()]);
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;

            if !self.filter.is_match(entry.path()) || !is_regular_file(&entry)? {
                continue;
            }

            trace!(path = %entry.path().display(), "selected");
            files.push(entry.into_path());
        }

        debug!(
            root = %root_path.display(),
            recursive = self.recursive,
            count = files.len(),
            "file selection finished"
        );

        Ok(files)
    }

    pub fn get_statistics(&self, files: &[PathBuf]) -> Result<SelectionStatistics> {
        let sizes = files
            .iter()
            .map(|p| -> Result<(u64, &PathBuf)> {
                let metadata = fs::metadata(p).map_err(|e| TabGrepError::Read {
                    path: p.clone(),
                    source: e,
                })?;
                Ok((metadata.len(), p))
            })
            .collect::<Result<Vec<_>>>()?;

        let (largest_file_size, largest_file_path) = sizes
            .iter()
            .max_by_key(|(size, _)| *size)
            .map(|(size, path)| (*size, (*path).clone()))
            .unwrap_or((0, PathBuf::new()));

        Ok(SelectionStatistics {
            total_files: files.len(),
            total_size: sizes.iter().map(|(size, _)| size).sum(),
            largest_file_size,
            largest_file_path,
        })
    }
}

/// Symlinks are not followed while walking, but a link whose target is a
/// regular file is still read through the link.
fn is_regular_file(entry: &walkdir::DirEntry) -> Result<bool> {
    if entry.file_type().is_file() {
        return Ok(true);
    }
    if !entry.path_is_symlink() {
        return Ok(false);
    }

    let target = fs::metadata(entry.path()).map_err(|e| TabGrepError::Read {
        path: entry.path().to_path_buf(),
        source: e,
    })?;
    Ok(target.is_file())
}

/// Stable reorder by ascending modification time, at one-second resolution.
pub fn sort_by_mod_time(files: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let mut keyed = files
        .into_iter()
        .map(|path| -> Result<(i64, PathBuf)> {
            let metadata = fs::metadata(&path).map_err(|e| TabGrepError::Read {
                path: path.clone(),
                source: e,
            })?;
            let seconds = FileTime::from_last_modification_time(&metadata).unix_seconds();
            Ok((seconds, path))
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by_key(|(seconds, _)| *seconds);

    Ok(keyed.into_iter().map(|(_, path)| path).collect())
}

#[derive(Debug, Default)]
pub struct SelectionStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub largest_file_size: u64,
    pub largest_file_path: PathBuf,
}

impl SelectionStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Selection:\n  Total files: {}\n  Total size: {}\n",
            self.total_files,
            format_bytes(self.total_size)
        );

        if self.largest_file_size > 0 {
            summary.push_str(&format!(
                "  Largest file: {} ({})\n",
                self.largest_file_path.display(),
                format_bytes(self.largest_file_size)
            ));
        }

        summary
    }
}
