//! Optional RON configuration file.
//!
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```ron
//! (
//!     log_level: "debug",
//!     remote: (max_pages: 20),
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracker_core::DEFAULT_PER_PAGE;
use tracker_engine::{
    FetchSettings, RemoteSettings, TimestampZone, DEFAULT_API_BASE, DEFAULT_MAX_PAGES,
    DEFAULT_WEB_BASE,
};

pub const DEFAULT_CONFIG_FILENAME: &str = "unfollow_tracker.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub per_page: usize,
    pub timestamp_zone: TimestampZone,
    pub remote: RemoteConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            per_page: DEFAULT_PER_PAGE,
            timestamp_zone: TimestampZone::Utc,
            remote: RemoteConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub api_base: String,
    pub web_base: String,
    pub max_pages: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            web_base: DEFAULT_WEB_BASE.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            redirect_limit: fetch.redirect_limit,
            max_bytes: fetch.max_bytes,
        }
    }
}

impl RemoteConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn remote_settings(&self) -> RemoteSettings {
        RemoteSettings {
            api_base: self.api_base.clone(),
            web_base: self.web_base.clone(),
            max_pages: self.max_pages,
        }
    }
}

/// Loads `explicit` if given (it must exist), otherwise the default file in
/// the working directory when present, otherwise built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if !default.is_file() {
                return Ok(AppConfig::default());
            }
            default
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse(&content).map_err(|message| ConfigError::Parse { path, message })
}

fn parse(content: &str) -> Result<AppConfig, String> {
    ron::from_str(content).map_err(|err| err.to_string())
}

pub fn to_ron(config: &AppConfig) -> Result<String, ron::Error> {
    ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::new())
}
