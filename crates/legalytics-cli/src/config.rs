//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use legalytics_extractor::ExtractorConfig;
use legalytics_llm::GroqConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion backend settings
    #[serde(default)]
    pub backend: GroqConfig,

    /// Extraction settings and reply grammar
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".legalytics").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path may be absent, in
    /// which case the defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply endpoint and model overrides from flags or the environment.
    pub fn apply_overrides(&mut self, endpoint: Option<String>, model: Option<String>) {
        if let Some(endpoint) = endpoint {
            self.backend.endpoint = endpoint;
        }
        if let Some(model) = model {
            self.backend.model = model;
        }
    }
}
