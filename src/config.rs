//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/camcover/camcover.toml`
//! 3. Explicit config file passed by the caller
//! 4. Environment variables: `CAMCOVER_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{CoverError, CoverResult};
use crate::parser::DEFAULT_SENTINEL;

/// Settings for parsing and building trees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Token marking an absent node (default: "N")
    pub sentinel: String,
    /// Log a warning when the builder stops before the end of the input
    pub warn_on_trailing_tokens: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            warn_on_trailing_tokens: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub sentinel: Option<String>,
    pub warn_on_trailing_tokens: Option<bool>,
}

/// Get the XDG config directory for camcover.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "camcover").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("camcover.toml"))
}

fn config_err(e: ConfigError) -> CoverError {
    CoverError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> CoverResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| CoverError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| CoverError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            sentinel: overlay
                .sentinel
                .clone()
                .unwrap_or_else(|| self.sentinel.clone()),
            warn_on_trailing_tokens: overlay
                .warn_on_trailing_tokens
                .unwrap_or(self.warn_on_trailing_tokens),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist if given
    pub fn load(config_file: Option<&Path>) -> CoverResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply CAMCOVER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> CoverResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("CAMCOVER"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("sentinel") {
            settings.sentinel = val;
        }
        match config.get_bool("warn_on_trailing_tokens") {
            Ok(val) => settings.warn_on_trailing_tokens = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => {
                return Err(CoverError::Config {
                    message: format!("CAMCOVER_WARN_ON_TRAILING_TOKENS: {}", e),
                })
            }
        }

        Ok(settings)
    }

    /// Reject sentinels the tokenizer could never tell apart from values.
    pub fn validate(&self) -> CoverResult<()> {
        if self.sentinel.is_empty() {
            return Err(CoverError::Config {
                message: "sentinel must not be empty".to_string(),
            });
        }
        if self.sentinel.chars().any(char::is_whitespace) {
            return Err(CoverError::Config {
                message: format!("sentinel '{}' contains whitespace", self.sentinel),
            });
        }
        if self.sentinel.parse::<i32>().is_ok() {
            return Err(CoverError::Config {
                message: format!("sentinel '{}' is a valid node value", self.sentinel),
            });
        }
        Ok(())
    }

    /// Render as TOML for display.
    pub fn to_toml(&self) -> CoverResult<String> {
        toml::to_string_pretty(self).map_err(|e| CoverError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
