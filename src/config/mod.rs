use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::core::notification::{DEFAULT_CAPACITY, DEFAULT_TTL};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const API_URL_ENV: &str = "BACKOFFICE_API_URL";
pub const CONFIG_ENV: &str = "BACKOFFICE_CONFIG";

const APP_NAME: &str = "backoffice";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} not found")]
    NotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub notification_ttl_secs: Option<u64>,
    pub max_notifications: Option<usize>,
    pub export_dir: Option<PathBuf>,
}

impl Config {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn notification_ttl(&self) -> Duration {
        self.notification_ttl_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TTL)
    }

    pub fn max_notifications(&self) -> usize {
        self.max_notifications.unwrap_or(DEFAULT_CAPACITY).max(1)
    }
}

/// Load a config file the user named explicitly. Unlike the default
/// location, a missing file here is an error.
pub fn load_required(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    load_from(path)
}

/// A missing file yields defaults; an unreadable or malformed one is an error
/// the caller can surface without aborting.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join(APP_NAME).join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join(APP_NAME).join("config.toml"));
    }

    directories::ProjectDirs::from("io", APP_NAME, APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join(APP_NAME));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join(APP_NAME));
    }
    directories::ProjectDirs::from("io", APP_NAME, APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn log_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("logs"))
}

/// Configured export directory, else `exports/` under the data dir, else the cwd
pub fn export_dir(config: &Config) -> PathBuf {
    config
        .export_dir
        .clone()
        .or_else(|| data_dir().map(|dir| dir.join("exports")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// CLI flag, then `BACKOFFICE_API_URL`, then the config file, then the default
pub fn resolve_api_base_url(cli: Option<&str>, env: Option<&str>, config: &Config) -> String {
    [cli, env, config.api_base_url.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(normalize_base_url)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

fn normalize_base_url(value: &str) -> String {
    let value = value.trim_end_matches('/');
    if value.contains("://") {
        value.to_string()
    } else {
        format!("http://{value}")
    }
}

/// Settings resolved at startup and shown in the settings popup
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub notification_ttl: Duration,
    pub max_notifications: usize,
    pub request_timeout: Option<Duration>,
}

impl Settings {
    pub fn from_config(config: &Config, api_base_url: String) -> Self {
        Self {
            api_base_url,
            config_path: config_path(),
            log_path: None,
            export_dir: export_dir(config),
            notification_ttl: config.notification_ttl(),
            max_notifications: config.max_notifications(),
            request_timeout: config.request_timeout(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            config_path: None,
            log_path: None,
            export_dir: PathBuf::from("."),
            notification_ttl: DEFAULT_TTL,
            max_notifications: DEFAULT_CAPACITY,
            request_timeout: None,
        }
    }
}
