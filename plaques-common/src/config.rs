//! Configuration loading and dataset path resolution

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable naming the GeoJSON dataset
pub const DATASET_ENV_VAR: &str = "PLAQUES_DATASET";
/// Environment variable naming an explicit TOML config file
pub const CONFIG_ENV_VAR: &str = "PLAQUES_CONFIG";

/// Number of admitted features fed to the pipeline by default
pub const DEFAULT_SAMPLE_LIMIT: usize = 800;
/// Table rows per page by default
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing level when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Contents of `config.toml`
///
/// Every field is optional in the file; missing fields take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// GeoJSON dataset path
    pub dataset: Option<PathBuf>,
    /// Maximum admitted features entering the pipeline
    pub sample_limit: usize,
    /// Run the fixture augmenter before normalization
    pub augment: bool,
    /// Table rows per page
    pub page_size: usize,
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            augment: true,
            page_size: DEFAULT_PAGE_SIZE,
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse a config file, failing on unreadable or malformed content
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load the config file if one is found, otherwise defaults
    ///
    /// A missing file is normal. A malformed one is returned alongside the
    /// defaults so the caller can report it once logging is up; startup never
    /// fails on configuration.
    pub fn load_or_default() -> (Self, Option<Error>) {
        let Some(path) = config_file_path() else {
            return (Self::default(), None);
        };
        match Self::load(&path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

/// Locate the TOML config file
///
/// Priority: `PLAQUES_CONFIG`, then `<config dir>/plaques/config.toml` when it
/// exists.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|d| d.join("plaques").join("config.toml"))
        .filter(|p| p.exists())
}

/// Resolve the dataset path
///
/// Priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. Compiled default (fallback)
pub fn resolve_dataset_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATASET_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.dataset {
        return path.clone();
    }

    default_dataset_path()
}

/// Compiled default dataset location, relative to the working directory
pub fn default_dataset_path() -> PathBuf {
    PathBuf::from("data").join("open-plaques-london.geojson")
}
