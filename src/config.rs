use crate::error::{HarvestError, Result};
use crate::types::SeasonMask;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://ja.stardewvalleywiki.com";
pub const DEFAULT_USER_AGENT: &str = "harvest/0.1";

/// One season page of the crop scrape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonPage {
    pub season: SeasonMask,
    pub path: String,
}

/// Candidate page paths per domain, tried in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePaths {
    /// Every season page is loaded; none is a fallback for another
    pub crops: Vec<SeasonPage>,
    pub fish: Vec<String>,
    pub npcs: Vec<String>,
    pub bundles: Vec<String>,
}

fn paths(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

impl Default for SourcePaths {
    fn default() -> Self {
        SourcePaths {
            crops: vec![
                SeasonPage { season: SeasonMask::SPRING, path: "/%E6%98%A5".into() },
                SeasonPage { season: SeasonMask::SUMMER, path: "/%E5%A4%8F".into() },
                SeasonPage { season: SeasonMask::FALL, path: "/%E7%A7%8B".into() },
                SeasonPage { season: SeasonMask::WINTER, path: "/%E5%86%AC".into() },
            ],
            fish: paths(&["/魚", "/%E9%AD%9A", "/Fish"]),
            npcs: paths(&[
                "/住人",
                "/%E4%BD%8F%E4%BA%BA",
                "/村人",
                "/%E6%9D%91%E4%BA%BA",
                "/Villagers",
            ]),
            bundles: paths(&[
                "/バンドル",
                "/%E3%83%90%E3%83%B3%E3%83%89%E3%83%AB",
                "/コミュニティセンター",
                "/Community_Center",
            ]),
        }
    }
}

/// Configuration for a harvest run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Wiki root; page paths are appended to it
    pub base_url: String,

    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Where the JSON snapshots go
    pub raw_dir: PathBuf,

    /// Where the generated load script goes, next to the schema fragments
    pub sql_dir: PathBuf,

    /// Whether to write the JSON snapshots at all
    pub write_snapshots: bool,

    pub sources: SourcePaths,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        HarvestConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            raw_dir: PathBuf::from("data/raw"),
            sql_dir: PathBuf::from("data/sql"),
            write_snapshots: true,
            sources: SourcePaths::default(),
        }
    }
}

impl HarvestConfig {
    /// Load a JSON config file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| HarvestError::io(path, e))?;
        let config: HarvestConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(HarvestError::Config("timeout_secs must be positive".into()));
        }
        if self.base_url.is_empty() {
            return Err(HarvestError::Config("base_url must not be empty".into()));
        }
        for page in &self.sources.crops {
            if page.season.bits().count_ones() != 1 || page.season.bits() > 8 {
                return Err(HarvestError::Config(format!(
                    "crop page {} must name exactly one season",
                    page.path
                )));
            }
        }
        Ok(())
    }

    pub fn script_path(&self) -> PathBuf {
        self.sql_dir.join(crate::sql::compose::GENERATED_DATA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources() {
        let config = HarvestConfig::default();
        assert_eq!(config.sources.crops.len(), 4);
        assert_eq!(config.sources.crops[3].season, SeasonMask::WINTER);
        assert_eq!(config.sources.fish[0], "/魚");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvest.json");
        std::fs::write(&path, r#"{"timeout_secs": 5, "sources": {"fish": ["/Fish"]}}"#).unwrap();

        let config = HarvestConfig::load(&path).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.sources.fish, vec!["/Fish".to_string()]);
        assert_eq!(config.sources.npcs, SourcePaths::default().npcs);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_rejects_multi_season_page() {
        let mut config = HarvestConfig::default();
        config.sources.crops[0].season = SeasonMask(3);
        assert!(matches!(config.validate(), Err(HarvestError::Config(_))));
    }
}
