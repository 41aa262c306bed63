//! Browser over a local directory tree (`<root>/<game>/*.json`)

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::{DirEntry, EntryKind, FetchError, FetchResult, FileEntry, RepositoryBrowser};

#[derive(Debug, Clone)]
pub struct LocalBrowser {
    root: PathBuf,
}

impl LocalBrowser {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> FetchResult<PathBuf> {
        let dir = if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        };
        if !dir.is_dir() {
            return Err(FetchError::NotFound(dir.display().to_string()));
        }
        Ok(dir)
    }

    /// Immediate children of `path`, sorted by name
    fn children(&self, path: &str) -> FetchResult<Vec<walkdir::DirEntry>> {
        let dir = self.resolve(path)?;
        let mut entries = Vec::new();
        for entry in walkdir::WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                FetchError::Io(
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                )
            })?;
            entries.push(entry);
        }
        debug!(dir = %dir.display(), entries = entries.len(), "listed local directory");
        Ok(entries)
    }
}

impl RepositoryBrowser for LocalBrowser {
    fn list_directories(&self, path: &str) -> FetchResult<Vec<DirEntry>> {
        Ok(self
            .children(path)?
            .into_iter()
            .map(|entry| {
                let file_type = entry.file_type();
                let kind = if file_type.is_dir() {
                    EntryKind::Dir
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };
                DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    kind,
                }
            })
            .collect())
    }

    fn list_files(&self, path: &str) -> FetchResult<Vec<FileEntry>> {
        Ok(self
            .children(path)?
            .into_iter()
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                download_url: entry.path().to_string_lossy().into_owned(),
            })
            .collect())
    }

    fn fetch_json(&self, url: &str) -> FetchResult<Value> {
        let contents = fs::read_to_string(url)?;
        serde_json::from_str(&contents).map_err(|source| FetchError::Json {
            location: url.to_string(),
            source,
        })
    }
}
