//! Catalog configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. Command-line overrides applied by the binary
//! 2. An explicit `--config` file, or `config.yaml` in the platform config
//!    directory (e.g. `~/.config/pokedex/config.yaml`)
//! 3. Built-in defaults
//!
//! ```yaml
//! base_url: https://pokeapi.co/api/v2
//! list_limit: 1000
//! timeout_seconds: 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default catalog service root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default sprite hosting root; sprites live at `{root}/{id}.png`
pub const DEFAULT_SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Page size for the single bulk fetch. Large enough to cover the whole catalog.
pub const DEFAULT_LIST_LIMIT: u32 = 1000;

/// Configuration for talking to the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root URL of the catalog REST service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page size used by the bulk record fetch
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,

    /// Root URL of the sprite images
    #[serde(default = "default_sprite_base_url")]
    pub sprite_base_url: String,

    /// Transport timeout for every request
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_list_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

fn default_sprite_base_url() -> String {
    DEFAULT_SPRITE_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("pokedex/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            list_limit: default_list_limit(),
            sprite_base_url: default_sprite_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::load_from_path(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_from_path(&path)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific YAML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: CatalogConfig =
            serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        tracing::debug!("Loaded catalog config from {}", path.display());
        Ok(config)
    }

    /// Platform config file location, if the platform has one
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "pokedex")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Check the values that would otherwise fail at request time
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [
            ("base_url", &self.base_url),
            ("sprite_base_url", &self.sprite_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "{field} must start with http:// or https:// (got '{url}')"
                )));
            }
        }

        if self.list_limit == 0 {
            return Err(ConfigError::Invalid(
                "list_limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// URL of the bulk record listing
    pub fn records_url(&self) -> String {
        format!("{}/pokemon?limit={}", self.base(), self.list_limit)
    }

    /// URL of the category name listing
    pub fn categories_url(&self) -> String {
        format!("{}/type", self.base())
    }

    /// URL of one category's membership
    pub fn category_url(&self, name: &str) -> String {
        format!("{}/type/{}", self.base(), name)
    }

    /// Sprite image URL for a record id
    pub fn sprite_url(&self, id: &str) -> String {
        format!("{}/{}.png", self.sprite_base_url.trim_end_matches('/'), id)
    }
}
