//! Page sources
//!
//! Builders only see the `PageSource` trait. `HttpSource` fetches from the live
//! wiki with a single timeout-bounded attempt; `DirSource` reads pages saved to
//! disk; `MemorySource` serves HTML held in memory.

use crate::config::HarvestConfig;
use crate::document::Document;
use crate::error::{HarvestError, Result};
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

pub trait PageSource {
    /// Load and parse the page at `path` (relative to the source's base).
    fn fetch(&mut self, path: &str) -> Result<Document>;
}

/// Try each candidate in order and return the first page that loads.
///
/// Failures are logged and skipped. `None` means every candidate failed.
pub fn first_available(
    source: &mut dyn PageSource,
    candidates: &[String],
) -> Option<(String, Document)> {
    for path in candidates {
        match source.fetch(path) {
            Ok(doc) => {
                debug!(path = %path, tables = doc.tables.len(), "loaded page");
                return Some((path.clone(), doc));
            }
            Err(e) => warn!(path = %path, error = %e, "candidate page unavailable"),
        }
    }
    None
}

pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|source| HarvestError::Http {
                url: base_url.clone(),
                source,
            })?;

        Ok(HttpSource {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &HarvestConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

impl PageSource for HttpSource {
    fn fetch(&mut self, path: &str) -> Result<Document> {
        let url = format!("{}{}", self.base_url, path);
        let http_err = |source| HarvestError::Http {
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(http_err)?;
        Ok(Document::parse_html(&body))
    }
}

/// Reads pages previously saved as `<dir>/<file_name_for(path)>`
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirSource { dir: dir.into() }
    }

    /// File name a page path is stored under: `/魚` -> `魚.html`
    pub fn file_name_for(path: &str) -> String {
        let trimmed = path.trim_matches('/');
        let name: String = trimmed
            .chars()
            .map(|c| if c == '/' || c == '\\' || c == '?' { '_' } else { c })
            .collect();
        format!("{}.html", if name.is_empty() { "index" } else { &name })
    }

    pub fn page_path(&self, path: &str) -> PathBuf {
        self.dir.join(Self::file_name_for(path))
    }
}

impl PageSource for DirSource {
    fn fetch(&mut self, path: &str) -> Result<Document> {
        let file = self.page_path(path);
        let html = std::fs::read_to_string(&file).map_err(|e| HarvestError::io(&file, e))?;
        Ok(Document::parse_html(&html))
    }
}

/// In-memory pages keyed by path
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    pages: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(path.into(), html.into());
        self
    }
}

impl PageSource for MemorySource {
    fn fetch(&mut self, path: &str) -> Result<Document> {
        let html = self.pages.get(path).ok_or_else(|| HarvestError::Status {
            url: path.to_string(),
            status: 404,
        })?;
        Ok(Document::parse_html(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_available_takes_first_success() {
        let mut source = MemorySource::new()
            .with_page("/b", "<table><tr><th>x</th></tr></table>")
            .with_page("/c", "<p>later</p>");
        let candidates = vec!["/a".to_string(), "/b".to_string(), "/c".to_string()];

        let (path, doc) = first_available(&mut source, &candidates).unwrap();
        assert_eq!(path, "/b");
        assert_eq!(doc.tables.len(), 1);
    }

    #[test]
    fn test_first_available_none_when_all_fail() {
        let mut source = MemorySource::new();
        let candidates = vec!["/a".to_string()];
        assert!(first_available(&mut source, &candidates).is_none());
    }

    #[test]
    fn test_dir_source_reads_saved_pages() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("魚.html"),
            "<table><tr><th>名前</th><th>時間</th></tr></table>",
        )
        .unwrap();

        let mut source = DirSource::new(dir.path());
        let doc = source.fetch("/魚").unwrap();
        assert_eq!(doc.tables[0].header().unwrap(), ["名前", "時間"]);

        assert!(matches!(source.fetch("/Fish"), Err(HarvestError::Io { .. })));
    }

    #[test]
    fn test_file_name_for() {
        assert_eq!(DirSource::file_name_for("/Community_Center"), "Community_Center.html");
        assert_eq!(DirSource::file_name_for("/a/b?c"), "a_b_c.html");
        assert_eq!(DirSource::file_name_for("/"), "index.html");
    }
}
