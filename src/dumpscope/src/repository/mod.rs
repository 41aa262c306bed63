//! Repository browser abstraction.
//!
//! Dumps are published as one directory per game, each holding the category
//! JSON files. A browser lists directories and files and fetches JSON by the
//! download URL a listing returned.

mod local;

#[cfg(feature = "github")]
mod github;

pub use local::LocalBrowser;

#[cfg(feature = "github")]
pub use github::{GithubBrowser, DEFAULT_API_BASE};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid JSON from {location}: {source}")]
    Json {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for repository operations
pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Dir,
    File,
    #[serde(other)]
    Other,
}

/// One listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// A fetchable file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub download_url: String,
}

/// Source of game dumps
pub trait RepositoryBrowser {
    /// List all entries (directories and files) under `path`
    fn list_directories(&self, path: &str) -> FetchResult<Vec<DirEntry>>;

    /// List the files under `path` with their download URLs
    fn list_files(&self, path: &str) -> FetchResult<Vec<FileEntry>>;

    /// Fetch and parse a JSON document
    fn fetch_json(&self, url: &str) -> FetchResult<Value>;
}

impl<B: RepositoryBrowser + ?Sized> RepositoryBrowser for &B {
    fn list_directories(&self, path: &str) -> FetchResult<Vec<DirEntry>> {
        (**self).list_directories(path)
    }

    fn list_files(&self, path: &str) -> FetchResult<Vec<FileEntry>> {
        (**self).list_files(path)
    }

    fn fetch_json(&self, url: &str) -> FetchResult<Value> {
        (**self).fetch_json(url)
    }
}

impl<B: RepositoryBrowser + ?Sized> RepositoryBrowser for Box<B> {
    fn list_directories(&self, path: &str) -> FetchResult<Vec<DirEntry>> {
        (**self).list_directories(path)
    }

    fn list_files(&self, path: &str) -> FetchResult<Vec<FileEntry>> {
        (**self).list_files(path)
    }

    fn fetch_json(&self, url: &str) -> FetchResult<Value> {
        (**self).fetch_json(url)
    }
}
