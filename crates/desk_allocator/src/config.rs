use crate::{
    constants::{
        DEFAULT_DATA_DIR, DEFAULT_FORECAST_THRESHOLD, DEFAULT_OUTPUT_DIR,
        DEFAULT_SANITIZATION_POLICY_IDS, ENV_DATA_DIR, MAX_PERCENTAGE,
    },
    engine::EngineSettings,
    error::{AllocatorError, Result},
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};

/// Top-level configuration, read from a TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub engine: EngineConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the JSON snapshot files
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Forecast percentage strictly below which an area is available
    pub forecast_threshold: u8,
    /// Mandatory policy ids that exclude desks under maintenance
    pub sanitization_policy_ids: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            forecast_threshold: DEFAULT_FORECAST_THRESHOLD,
            sanitization_policy_ids: DEFAULT_SANITIZATION_POLICY_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for exported CSV files
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AllocatorError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            AllocatorError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            Self::load_from_file(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply `DESK_ALLOCATOR_DATA_DIR` when it is set to a non-blank value
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(data_dir) = env::var(ENV_DATA_DIR)
            && !data_dir.trim().is_empty()
        {
            let path = PathBuf::from(data_dir);

            if path.exists() && !path.is_dir() {
                return Err(AllocatorError::Config(format!(
                    "Data path is not a directory: {}",
                    path.display()
                )));
            }
            debug!("{} overrides data directory: {}", ENV_DATA_DIR, path.display());
            self.data.dir = path;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.data.dir.as_os_str().is_empty() {
            return Err(AllocatorError::Config(
                "data.dir cannot be empty".to_string(),
            ));
        }

        if self.engine.forecast_threshold > MAX_PERCENTAGE {
            return Err(AllocatorError::Config(format!(
                "engine.forecast_threshold must be between 0 and {}, got {}",
                MAX_PERCENTAGE, self.engine.forecast_threshold
            )));
        }

        if self.engine.sanitization_policy_ids.is_empty() {
            return Err(AllocatorError::Config(
                "engine.sanitization_policy_ids cannot be empty".to_string(),
            ));
        }

        if self
            .engine
            .sanitization_policy_ids
            .iter()
            .any(|id| id.trim().is_empty())
        {
            return Err(AllocatorError::Config(
                "engine.sanitization_policy_ids cannot contain blank ids".to_string(),
            ));
        }

        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            forecast_threshold: self.engine.forecast_threshold,
            sanitization_policy_ids: self.engine.sanitization_policy_ids.clone(),
        }
    }
}
