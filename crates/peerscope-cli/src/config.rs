//! Configuration file loading.
//!
//! Lookup order: `--config`, `./peerscope.toml`, then
//! `<config dir>/peerscope/config.toml`. Without a file the defaults apply.

use peerscope_history::HistoryConfig;
use peerscope_portfolio::AnalyticsConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

const LOCAL_FILE: &str = "peerscope.toml";

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Format used when `--format` is not given.
    pub format: OutputFormat,
    /// Colored headers and messages.
    pub color: bool,
    /// Decimal places for weights in tables.
    pub precision: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
            precision: 2,
        }
    }
}

/// Full CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Snapshot analytics settings.
    pub analytics: AnalyticsConfig,
    /// Fact history settings.
    pub history: HistoryConfig,
    /// Output settings.
    pub output: OutputSettings,
}

/// A configuration together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Effective configuration.
    pub config: CliConfig,
    /// Source file, `None` when running on defaults.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Default configuration with no source file.
    pub fn defaults() -> Self {
        Self {
            config: CliConfig::default(),
            source: None,
        }
    }
}

impl CliConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }

    /// Validates every section.
    pub fn validate(&self) -> CliResult<()> {
        self.analytics.validate()?;
        self.history.validate()?;
        if self.output.precision > 10 {
            return Err(CliError::Config(format!(
                "output.precision must be at most 10, got {}",
                self.output.precision
            )));
        }
        Ok(())
    }

    /// Loads the configuration following the lookup order.
    ///
    /// An explicit path must exist; the implicit locations are optional.
    pub fn load(explicit: Option<&Path>) -> CliResult<LoadedConfig> {
        let source = match explicit {
            Some(path) if !path.exists() => {
                return Err(CliError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => Some(path.to_path_buf()),
            None => candidates().into_iter().find(|p| p.exists()),
        };

        let config = match &source {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration");
                let content = std::fs::read_to_string(path)?;
                Self::from_toml(&content)
                    .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?
            }
            None => Self::default(),
        };

        Ok(LoadedConfig { config, source })
    }
}

/// Implicit config locations, in lookup order.
pub fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_FILE)];
    if let Some(path) = user_config_path() {
        paths.push(path);
    }
    paths
}

/// Per-user config file location.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("peerscope").join("config.toml"))
}
