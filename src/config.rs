// Outline configuration
//
// Field names follow the host settings keys (camelCase). Numeric settings are
// clamped into their supported ranges whenever a configuration is applied.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_DEBOUNCE_MS: u64 = 250;
pub const MIN_DEBOUNCE_MS: u64 = 25;
pub const MAX_DEBOUNCE_MS: u64 = 5000;

pub const DEFAULT_MAX_CACHE_ENTRIES: usize = 500;
pub const MIN_CACHE_ENTRIES: usize = 10;
pub const MAX_CACHE_ENTRIES: usize = 20_000;

/// Default Python nesting depth: top-level functions and methods of top-level classes
pub const DEFAULT_PYTHON_MAX_DEPTH: usize = crate::extractors::python::DEFAULT_MAX_DEPTH;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings consumed by the outline core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutlineConfig {
    /// When false, every document yields zero symbols
    pub enabled: bool,
    /// Name filter applied to returned symbols (empty = no filter)
    pub filter_regex: String,
    pub python_max_depth: usize,
    pub debounce_ms: u64,
    pub max_cache_entries: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filter_regex: String::new(),
            python_max_depth: DEFAULT_PYTHON_MAX_DEPTH,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_cache_entries: DEFAULT_MAX_CACHE_ENTRIES,
        }
    }
}

pub fn clamp_debounce_ms(value: u64) -> u64 {
    value.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS)
}

pub fn clamp_cache_entries(value: usize) -> usize {
    value.clamp(MIN_CACHE_ENTRIES, MAX_CACHE_ENTRIES)
}

impl OutlineConfig {
    /// Copy with every numeric setting inside its supported range
    pub fn clamped(&self) -> Self {
        Self {
            debounce_ms: clamp_debounce_ms(self.debounce_ms),
            max_cache_entries: clamp_cache_entries(self.max_cache_entries),
            ..self.clone()
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(clamp_debounce_ms(self.debounce_ms))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: OutlineConfig = toml::from_str(content)?;
        Ok(config.clamped())
    }

    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!("Configuration file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;

        debug!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}
