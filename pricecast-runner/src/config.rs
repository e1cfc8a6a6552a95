//! Serializable run configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Files sampled per exchange when not configured.
pub const DEFAULT_FILES_PER_EXCHANGE: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Parameters for one batch run.
///
/// TOML form:
/// ```toml
/// base_dir = "data/stocks"
/// files_per_exchange = 3
/// seed = 42
/// ```
///
/// Every key is optional in the file. `base_dir` is usually supplied on the
/// command line, so parsing does not validate; call [`RunConfig::validate`]
/// once all sources are merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Directory whose subdirectories are exchanges.
    #[serde(default)]
    pub base_dir: PathBuf,

    /// Maximum files sampled from each exchange.
    #[serde(default = "default_files_per_exchange")]
    pub files_per_exchange: usize,

    /// Master seed. Drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_files_per_exchange() -> usize {
    DEFAULT_FILES_PER_EXCHANGE
}

impl RunConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            files_per_exchange: DEFAULT_FILES_PER_EXCHANGE,
            seed: None,
        }
    }

    pub fn with_files_per_exchange(mut self, n: usize) -> Self {
        self.files_per_exchange = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("base_dir must not be empty".into()));
        }
        Ok(())
    }

    /// Directory that receives the generated files.
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join(crate::selector::OUTPUT_DIR_NAME)
    }
}
