//! Loads workspace files into a host.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::ide::WorkspaceHost;
use crate::index::{IndexError, IndexSummary};

/// Walks a directory and feeds its source files through one reindex batch.
pub struct WorkspaceLoader {
    extensions: Vec<String>,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self {
            extensions: vec!["php".to_string()],
        }
    }

    /// Override the file extensions treated as source files.
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.extensions = extensions.into_iter().collect();
        self
    }

    /// Load every source file under `dir` into the host as a single batch.
    ///
    /// Unreadable directory entries are skipped with a warning; an unreadable
    /// source file aborts the load.
    pub fn load_directory(
        &self,
        dir: &Path,
        host: &WorkspaceHost,
    ) -> Result<IndexSummary, IndexError> {
        let mut batch: Vec<(String, String)> = Vec::new();

        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(%err, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
            if !matches {
                continue;
            }

            let text = fs::read_to_string(path).map_err(|source| IndexError::Io {
                path: path.display().to_string(),
                source,
            })?;
            batch.push((path.display().to_string(), text));
        }

        info!(files = batch.len(), dir = %dir.display(), "loading workspace");
        host.reindex(&batch, &[])
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}
