pub mod config;
pub mod error;
pub mod files;
pub mod lines;
pub mod report;
pub mod transform;
pub mod validation;

use std::path::Path;

use config::{Config, FormatOptions, ProjectConfig};
use error::ConfigError;
use transform::{Formatted, Pipeline};
use validation::ConfigValidator;

/// Validated configuration together with the pipeline built from it.
///
/// Cheap to share between threads; formatting never mutates it.
pub struct Formatter {
    config: Config,
    pipeline: Pipeline,
}

impl Formatter {
    pub fn new(options: &FormatOptions) -> Result<Self, ConfigError> {
        let config = ConfigValidator::validate(options)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        let pipeline = Pipeline::new(&config);
        Self { config, pipeline }
    }

    /// Load `.whitespace-format.toml` from `project_root`, falling back to defaults
    pub fn load(project_root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let project = ProjectConfig::load_or_default(project_root)?;
        Self::new(&project.data.format)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn format(&self, content: &str) -> Formatted {
        transform::format_with(&self.pipeline, content, &self.config)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("config", &self.config)
            .field("stages", &self.pipeline.stage_names())
            .finish()
    }
}
