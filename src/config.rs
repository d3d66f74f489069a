//! Scanner configuration
//!
//! Loaded from a TOML or JSON file; every field has a default so a partial
//! (or missing) file is valid. Command-line flags are applied on top with
//! [`ScannerConfig::merge_overrides`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_PATH: &str = ".php-scanner/files.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// File or directory to scan
    pub directory: PathBuf,
    /// Paths containing any of these substrings are skipped
    pub excluded_directories: Vec<String>,
    /// Prefix stripped from absolute paths to form each document's `file_name`
    pub base_directory: String,
    /// Source extensions to discover, without the dot
    pub extensions: Vec<String>,
    /// JSON file backing the document store
    pub store_path: PathBuf,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            excluded_directories: Vec::new(),
            base_directory: String::new(),
            extensions: vec!["php".to_string()],
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

/// Values given on the command line; `None`/empty leaves the file value in place
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub directory: Option<PathBuf>,
    pub excluded_directories: Vec<String>,
    pub base_directory: Option<String>,
    pub store_path: Option<PathBuf>,
}

impl ScannerConfig {
    /// Load configuration from a file
    ///
    /// `.toml` files are read as TOML, anything else as JSON. Returns the
    /// default config if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        Ok(config)
    }

    pub fn merge_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(directory) = overrides.directory {
            self.directory = directory;
        }
        if !overrides.excluded_directories.is_empty() {
            self.excluded_directories = overrides.excluded_directories;
        }
        if let Some(base_directory) = overrides.base_directory {
            self.base_directory = base_directory;
        }
        if let Some(store_path) = overrides.store_path {
            self.store_path = store_path;
        }
        self
    }
}
