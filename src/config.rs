//! Configuration for the putty-reg analyzer.
//!
//! Settings are read from `~/.config/putty-reg/config.yaml` (XDG layout on
//! every platform except Windows, which uses the roaming config dir). Every
//! field has a default, so a missing file or a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Registry key prefix PuTTY writes its settings under.
pub const DEFAULT_HEADER_MARKER: &str = r"HKEY_CURRENT_USER\Software\SimonTatham\PuTTY";

/// Highest severity a finding may carry.
pub const MAX_SEVERITY: u8 = 10;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid YAML.
    #[error("YAML parse error in config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A field value failed validation.
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Analyzer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File name suffix a candidate must end with (compared case-insensitively)
    pub file_extension: String,

    /// Only process content that decodes as text
    pub require_plaintext: bool,

    /// Marker that must appear in the content (case-insensitive)
    pub header_marker: String,

    /// Severity attached to credential findings (0-10)
    pub finding_severity: u8,

    /// Where report artifacts are written (defaults to the data dir)
    pub output_dir: Option<PathBuf>,

    /// Log level used when neither `--log-level` nor `RUST_LOG` is set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_extension: ".reg".to_string(),
            require_plaintext: true,
            header_marker: DEFAULT_HEADER_MARKER.to_string(),
            finding_severity: 5,
            output_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load the config from the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        log::info!("Config path: {:?}", path);

        if path.exists() {
            Self::load_from(&path)
        } else {
            log::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate the config at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn from_yaml(contents: &str) -> Result<Self, serde_yaml_ng::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(contents)
    }

    /// Check field values that serde cannot constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.finding_severity > MAX_SEVERITY {
            return Err(ConfigError::Validation(format!(
                "finding_severity must be between 0 and {}, got {}",
                MAX_SEVERITY, self.finding_severity
            )));
        }
        if self.header_marker.trim().is_empty() {
            return Err(ConfigError::Validation(
                "header_marker must not be empty".to_string(),
            ));
        }
        if !self.file_extension.is_empty() && !self.file_extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "file_extension must start with '.', got {:?}",
                self.file_extension
            )));
        }
        Ok(())
    }

    /// Directory report artifacts are written to.
    pub fn artifact_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("putty-reg")
                .join("artifacts"),
        }
    }

    /// Get the configuration directory.
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("putty-reg")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("putty-reg")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }
}
