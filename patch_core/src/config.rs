//! Configuration file support for patchsim.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/patchsim/config.toml`.
//! Every section is optional; missing values fall back to defaults.

use crate::{Error, ReferenceCurve, Result, SeriesFormat, SimulationParameters};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationParameters,

    #[serde(default)]
    pub curve: CurveConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the reference curve comes from
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CurveConfig {
    /// JSON array of hourly values; the bundled curve is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CurveConfig {
    /// Load the configured curve, falling back to the bundled one
    pub fn load(&self) -> Result<ReferenceCurve> {
        match &self.path {
            Some(path) => ReferenceCurve::load(path),
            None => {
                tracing::debug!("No curve path configured, using bundled curve");
                ReferenceCurve::builtin()
            }
        }
    }
}

/// Output defaults
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: SeriesFormat,
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("Neither a config directory nor HOME is available".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("patchsim").join("config.toml"))
    }

    /// Reject values the generator would refuse at run time
    pub fn validate(&self) -> Result<()> {
        self.simulation
            .validate()
            .map_err(|e| Error::Config(format!("[simulation] {}", e)))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
