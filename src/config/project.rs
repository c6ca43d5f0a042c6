use std::fs;
use std::path::{Path, PathBuf};

use super::ConfigData;
use crate::error::ConfigError;

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = ".whitespace-format.toml";

/// Configuration file of one project, not yet validated
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub data: ConfigData,
    pub path: PathBuf,
}

impl ProjectConfig {
    pub fn load_or_default(project_root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_path = project_root.as_ref().join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Self::load(config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "no configuration file, using defaults");
            Ok(Self {
                data: ConfigData::default(),
                path: config_path,
            })
        }
    }

    pub fn load(config_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path.into();
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Unreadable {
            path: path.clone(),
            source,
        })?;
        let data = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(Self { data, path })
    }

    /// Write a default configuration file unless one already exists.
    /// Returns whether a file was written.
    pub fn init(project_root: impl AsRef<Path>) -> Result<bool, ConfigError> {
        let config_path = project_root.as_ref().join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Ok(false);
        }

        let config = Self {
            data: ConfigData::default(),
            path: config_path,
        };
        config.save()?;
        Ok(true)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(&self.data).map_err(|e| ConfigError::Save {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        fs::write(&self.path, content).map_err(|e| ConfigError::Save {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
