use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Sitemap index of Afgørelsesportalen
pub const DEFAULT_SITEMAP_URL: &str = "https://afgoerelsesportalen.dk/sitemap.xml";

/// Client identifier sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; NH-Knowledge-Updater/2.0; +https://github.com)";

/// Configuration for one synchronisation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base directory holding one folder per board
    #[serde(default = "default_archive_root")]
    pub archive_root: PathBuf,

    /// Sitemap (index or leaf) used as entry point
    #[serde(default = "default_sitemap_url")]
    pub sitemap_url: String,

    /// User-Agent header for every HTTP request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request deadline in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path markers a sitemap entry must contain to count as a decision page
    #[serde(default = "default_decision_markers")]
    pub decision_markers: Vec<String>,
}

fn default_archive_root() -> PathBuf {
    PathBuf::from("knowledge_archive")
}

fn default_sitemap_url() -> String {
    DEFAULT_SITEMAP_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_decision_markers() -> Vec<String> {
    vec!["/afgoerelse/".to_string(), "/nyhed/".to_string()]
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            archive_root: default_archive_root(),
            sitemap_url: default_sitemap_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            decision_markers: default_decision_markers(),
        }
    }
}

impl SyncConfig {
    /// Create a configuration for the given archive root with default values
    pub fn new(archive_root: impl Into<PathBuf>) -> Self {
        Self {
            archive_root: archive_root.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SyncError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            SyncError::Config(format!("cannot open {}: {}", path.display(), e))
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            SyncError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        serde_json::from_str(json).map_err(|e| SyncError::Config(e.to_string()))
    }

    pub fn with_archive_root(mut self, archive_root: impl Into<PathBuf>) -> Self {
        self.archive_root = archive_root.into();
        self
    }

    pub fn with_sitemap_url(mut self, sitemap_url: impl Into<String>) -> Self {
        self.sitemap_url = sitemap_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The fixed deadline applied to every request
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config = SyncConfig::from_json("{}").unwrap();
        assert_eq!(config.archive_root, PathBuf::from("knowledge_archive"));
        assert_eq!(config.sitemap_url, DEFAULT_SITEMAP_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.decision_markers, vec!["/afgoerelse/", "/nyhed/"]);
    }

    #[test]
    fn json_overrides_individual_fields() {
        let config = SyncConfig::from_json(
            r#"{"archive_root": "/srv/archive", "timeout_secs": 5}"#,
        )
        .unwrap();
        assert_eq!(config.archive_root, PathBuf::from("/srv/archive"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.sitemap_url, DEFAULT_SITEMAP_URL);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = SyncConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = SyncConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn builder_overrides() {
        let config = SyncConfig::new("archive")
            .with_sitemap_url("http://localhost/sitemap.xml")
            .with_timeout_secs(2);
        assert_eq!(config.archive_root, PathBuf::from("archive"));
        assert_eq!(config.sitemap_url, "http://localhost/sitemap.xml");
        assert_eq!(config.timeout_secs, 2);
    }
}
