/*
 * SPDX-FileCopyrightText: 2024 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use connector::search::SearchEndpoint;
use connector::{DEFAULT_SERVER_URL, RequestConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fmt, fs, io};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub const APP_DIR: &str = "tadmust";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Clone, Copy, Debug, EnumIter, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ConfigKey {
    Server,
    SearchEndpoint,
    PollInterval,
    LogLevel,
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl std::str::FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::iter()
            .find(|key| key.to_string() == s.to_lowercase())
            .ok_or_else(|| ConfigError::InvalidKey(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not find a configuration directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(
        "invalid key: {0} (valid keys are: {keys})",
        keys = ConfigKey::iter().map(|k| k.to_string()).collect::<Vec<_>>().join(", ")
    )]
    InvalidKey(String),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: ConfigKey, message: String },
}

/// Values as written to `config.toml`, keyed by the lowercase key name.
pub type ConfigMap = BTreeMap<String, String>;

/// The TOML file holding user settings.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/tadmust/config.toml`
    pub fn default_location() -> Result<Self, ConfigError> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        path.push(APP_DIR);
        path.push("config.toml");
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ConfigMap, ConfigError> {
        if !self.path.exists() {
            return Ok(ConfigMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(toml::from_str(&contents)?)
    }

    pub fn save(&self, config: &ConfigMap) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.path, contents).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Sets `key` when `value` is given, then returns the stored value.
    /// Values are validated before anything is written.
    pub fn set_get_value(
        &self,
        key: ConfigKey,
        value: Option<String>,
    ) -> Result<Option<String>, ConfigError> {
        let mut config = self.load()?;

        if let Some(value) = value {
            let value = value.trim().to_string();
            validate(key, &value)?;
            config.insert(key.to_string(), value);
            self.save(&config)?;
        }

        Ok(config.get(&key.to_string()).cloned())
    }

    pub fn set_get_value_from_string(
        &self,
        key: &str,
        value: Option<String>,
    ) -> Result<Option<String>, ConfigError> {
        self.set_get_value(key.parse()?, value)
    }

    pub fn settings(&self) -> Result<Settings, ConfigError> {
        Settings::from_map(&self.load()?)
    }
}

fn validate(key: ConfigKey, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue { key, message };

    match key {
        ConfigKey::Server => {
            let url = url::Url::parse(value).map_err(|e| invalid(e.to_string()))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(invalid("expected an http or https URL".to_string()));
            }
        }
        ConfigKey::SearchEndpoint => {
            value.parse::<SearchEndpoint>().map_err(invalid)?;
        }
        ConfigKey::PollInterval => match value.parse::<u64>() {
            Ok(0) => return Err(invalid("must be at least 1 second".to_string())),
            Ok(_) => {}
            Err(e) => return Err(invalid(e.to_string())),
        },
        ConfigKey::LogLevel => {
            tracing_subscriber::EnvFilter::try_new(value).map_err(|e| invalid(e.to_string()))?;
        }
    }

    Ok(())
}

/// Typed view of the configuration with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub search_endpoint: SearchEndpoint,
    pub poll_interval: Duration,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            search_endpoint: SearchEndpoint::default(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    pub fn from_map(config: &ConfigMap) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        for (name, value) in config {
            let key: ConfigKey = name.parse()?;
            validate(key, value)?;

            match key {
                ConfigKey::Server => settings.server_url = value.clone(),
                ConfigKey::SearchEndpoint => {
                    settings.search_endpoint = value
                        .parse()
                        .map_err(|message| ConfigError::InvalidValue { key, message })?
                }
                ConfigKey::PollInterval => {
                    settings.poll_interval = Duration::from_secs(value.parse().map_err(
                        |e: std::num::ParseIntError| ConfigError::InvalidValue {
                            key,
                            message: e.to_string(),
                        },
                    )?)
                }
                ConfigKey::LogLevel => settings.log_level = value.clone(),
            }
        }

        Ok(settings)
    }

    pub fn request_config(&self) -> RequestConfig {
        RequestConfig::new(self.server_url.clone())
    }
}

/// `<data dir>/tadmust`, where the session is kept between runs.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let mut path = dirs::data_dir().ok_or(ConfigError::NoConfigDir)?;
    path.push(APP_DIR);
    Ok(path)
}
