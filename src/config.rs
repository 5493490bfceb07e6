use std::fs;
use std::path::Path;
use log::{info, error};
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "scraper_config.json";

/// The guest search endpoint never returns more than this per page.
pub const MAX_PAGE_SIZE: u32 = 100;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36";

/// Search parameters and run settings.
///
/// Every field has a default, so a config file only needs to name what it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub keyword: String,
    pub location: String,
    /// LinkedIn geo identifier matching `location`.
    pub geo_id: String,
    /// Scheme and host of the job site, no trailing slash.
    pub origin: String,
    pub page_size: u32,
    pub rate_limit_pause_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub output_file: String,
    pub blocklist: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            keyword: "intern".to_string(),
            location: "United States".to_string(),
            geo_id: "103644278".to_string(),
            origin: "https://www.linkedin.com".to_string(),
            page_size: 25,
            rate_limit_pause_secs: 30,
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_file: "intern_jobs_US.csv".to_string(),
            blocklist: ["clearance", "citizen", "sponsor", "visa"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl ScraperConfig {
    /// Loads the config file, falling back to defaults when it is absent or unusable.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file {:?} found. Using defaults.", path);
            return ScraperConfig::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                ScraperConfig::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: ScraperConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let origin = Url::parse(&self.origin).map_err(|e| ConfigError::Invalid {
            field: "origin",
            reason: e.to_string(),
        })?;
        if origin.cannot_be_a_base() || origin.host_str().is_none() {
            return Err(ConfigError::Invalid {
                field: "origin",
                reason: "must be an absolute http(s) URL".to_string(),
            });
        }
        if self.origin.ends_with('/') {
            return Err(ConfigError::Invalid {
                field: "origin",
                reason: "must not end with '/'".to_string(),
            });
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid {
                field: "page_size",
                reason: format!("must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }
        if reqwest::header::HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ConfigError::Invalid {
                field: "user_agent",
                reason: "must be a valid HTTP header value".to_string(),
            });
        }
        Ok(())
    }
}
