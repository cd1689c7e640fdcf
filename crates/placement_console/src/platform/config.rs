use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use placement_client::DEFAULT_BACKEND_BASE_URL;
use placement_logging::{placement_info, placement_warn};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILENAME: &str = "placement_console.ron";
const CONFIG_PATH_ENV: &str = "PLACEMENT_CONFIG";
const BASE_URL_ENV: &str = "PLACEMENT_BACKEND_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Origin all backend requests are issued against.
    pub backend_base_url: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid backend base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("backend base url {0:?} must use http or https")]
    UnsupportedScheme(String),
}

/// Loads the config file, applies environment overrides and validates the result.
pub fn load() -> Result<ConsoleConfig, ConfigError> {
    let path = env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = load_from_file(&path);
    let config = apply_overrides(config, env::var(BASE_URL_ENV).ok());
    validate(config)
}

/// Missing, unreadable or malformed files yield the defaults.
fn load_from_file(path: &Path) -> ConsoleConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ConsoleConfig::default();
        }
        Err(err) => {
            placement_warn!("Failed to read config from {:?}: {}", path, err);
            return ConsoleConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            placement_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            placement_warn!("Failed to parse config from {:?}: {}", path, err);
            ConsoleConfig::default()
        }
    }
}

fn apply_overrides(mut config: ConsoleConfig, base_url: Option<String>) -> ConsoleConfig {
    if let Some(base_url) = base_url.filter(|value| !value.trim().is_empty()) {
        config.backend_base_url = base_url.trim().to_string();
    }
    config
}

fn validate(config: ConsoleConfig) -> Result<ConsoleConfig, ConfigError> {
    let parsed =
        Url::parse(&config.backend_base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: config.backend_base_url.clone(),
            source,
        })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(config.backend_base_url));
    }
    Ok(config)
}
