use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{StatementParseError, StatementResult};

/// Selects statement files by name: a file is kept when its name contains any
/// of the patterns. An empty pattern list keeps every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    patterns: Vec<String>,
}

impl FileFilter {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| file_name.contains(p.as_str()))
    }
}

/// Lists the regular files of `dir` accepted by `filter`, sorted by file name.
pub fn discover(dir: &Path, filter: &FileFilter) -> StatementResult<Vec<PathBuf>> {
    let unreadable = |source| StatementParseError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let name = entry.file_name();
        if !filter.matches(&name.to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "Skipping entry that is not a file");
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(dir = %dir.display(), files = files.len(), "Discovered statement files");
    Ok(files)
}
