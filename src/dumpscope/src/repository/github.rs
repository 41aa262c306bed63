//! Browser over the GitHub contents API

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{DirEntry, EntryKind, FetchError, FetchResult, FileEntry, RepositoryBrowser};

/// Contents API root of the public dumps repository
pub const DEFAULT_API_BASE: &str =
    "https://api.github.com/repos/offsetsdumps/offsetsdumps/contents/games";

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("dumpscope/", env!("CARGO_PKG_VERSION"));

/// Entry of a contents API directory listing
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    download_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GithubBrowser {
    api_base: String,
    agent: ureq::Agent,
}

impl GithubBrowser {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn contents(&self, path: &str) -> FetchResult<Vec<ContentEntry>> {
        let url = if path.is_empty() {
            self.api_base.clone()
        } else {
            format!("{}/{}", self.api_base, path.trim_matches('/'))
        };
        debug!(%url, "listing repository contents");

        let value = self.get_json(&url, Some(ACCEPT))?;
        serde_json::from_value(value).map_err(|source| FetchError::Json {
            location: url,
            source,
        })
    }

    fn get_json(&self, url: &str, accept: Option<&str>) -> FetchResult<Value> {
        let mut request = self.agent.get(url);
        if let Some(accept) = accept {
            request = request.set("Accept", accept);
        }

        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(status, _) => FetchError::Status {
                url: url.to_string(),
                status,
            },
            ureq::Error::Transport(t) => FetchError::Transport {
                url: url.to_string(),
                reason: t.to_string(),
            },
        })?;

        let body = response.into_string()?;
        serde_json::from_str(&body).map_err(|source| FetchError::Json {
            location: url.to_string(),
            source,
        })
    }
}

impl Default for GithubBrowser {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl RepositoryBrowser for GithubBrowser {
    fn list_directories(&self, path: &str) -> FetchResult<Vec<DirEntry>> {
        Ok(self
            .contents(path)?
            .into_iter()
            .map(|c| DirEntry {
                name: c.name,
                kind: c.kind,
            })
            .collect())
    }

    fn list_files(&self, path: &str) -> FetchResult<Vec<FileEntry>> {
        Ok(self
            .contents(path)?
            .into_iter()
            .filter(|c| c.kind == EntryKind::File)
            .filter_map(|c| {
                c.download_url.map(|download_url| FileEntry {
                    name: c.name,
                    download_url,
                })
            })
            .collect())
    }

    fn fetch_json(&self, url: &str) -> FetchResult<Value> {
        self.get_json(url, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_listing_deserializes() {
        let listing = serde_json::json!([
            { "name": "Fortnite", "type": "dir", "download_url": null },
            { "name": "README.md", "type": "file", "download_url": "https://raw/README.md" },
            { "name": "lib", "type": "submodule", "download_url": null }
        ]);
        let entries: Vec<ContentEntry> = serde_json::from_value(listing).unwrap();
        assert_eq!(entries[0].kind, EntryKind::Dir);
        assert_eq!(entries[1].download_url.as_deref(), Some("https://raw/README.md"));
        assert_eq!(entries[2].kind, EntryKind::Other);
    }

    #[test]
    fn test_base_is_normalized() {
        let browser = GithubBrowser::new("https://example.com/contents/games/");
        assert_eq!(browser.api_base(), "https://example.com/contents/games");
        assert_eq!(GithubBrowser::default().api_base(), DEFAULT_API_BASE);
    }
}
