// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::api::DEFAULT_BASE_URL;
use crate::entities::Cursor;

pub const APP_ID: &str = "dev.mariinkys.DexView";

const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("`{0}` is not a valid base url")]
    BaseUrl(String),

    #[error("{field} must be at least 1, got {value}")]
    NotPositive { field: &'static str, value: i64 },
}

/// User settings, read from `config.ron` in the platform config directory.
/// Missing fields take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DexConfig {
    pub base_url: String,
    pub items_per_page: i64,
    /// Page size for the `collection` command
    pub default_limit: i64,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            items_per_page: 12,
            default_limit: Cursor::DEFAULT_LIMIT,
        }
    }
}

impl DexConfig {
    /// Where the config file lives, if the platform has a config directory
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_ID).join(CONFIG_FILE))
    }

    /// Reads the user's config, falling back to defaults when there is none
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_ron(&contents)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::BaseUrl(self.base_url.clone()));
        }
        for (field, value) in [
            ("items_per_page", self.items_per_page),
            ("default_limit", self.default_limit),
        ] {
            if value < 1 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DexConfig::default();
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.items_per_page, 12);
        assert_eq!(config.default_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_files_keep_the_other_defaults() {
        let config = DexConfig::from_ron("(items_per_page: 24)").unwrap();
        assert_eq!(config.items_per_page, 24);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            DexConfig::from_ron("(items_per_page: 0)"),
            Err(ConfigError::NotPositive {
                field: "items_per_page",
                value: 0
            })
        ));
        assert!(matches!(
            DexConfig::from_ron(r#"(base_url: "not a url")"#),
            Err(ConfigError::BaseUrl(_))
        ));
        assert!(matches!(
            DexConfig::from_ron("(items_per_page: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_the_default_config() {
        let path = std::env::temp_dir().join("dexview-no-such-dir").join(CONFIG_FILE);
        assert_eq!(DexConfig::load_from(&path).unwrap(), DexConfig::default());
    }
}
