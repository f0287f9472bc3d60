//! Navigator configuration file support.
//!
//! Configuration is read from TOML files:
//! 1. Global config (`~/.navigator/config.toml`)
//! 2. Local config (`./.navigatorrc`)
//!
//! Local config overrides global config. Credentials the files leave unset are
//! filled from the environment and from a `.env` file; the process
//! environment is never modified.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use navigator_models::{AssistantSettings, SearchSettings};

use crate::error::{CoreError, Result};
use crate::input::DEFAULT_DATA_FILE;

/// Environment variable holding the Custom Search API key.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Environment variable holding the Custom Search engine id.
pub const GOOGLE_CSE_ID_VAR: &str = "GOOGLE_CSE_ID";

/// Environment variable holding the assistant API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Navigator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Directory holding the reference tables
    #[serde(default)]
    pub reference_dir: Option<PathBuf>,

    /// Student data file used by `auto`, `plan` and `assistant`
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: Option<String>,

    /// Snippet search settings
    #[serde(default)]
    pub search: SearchSettings,

    /// Hosted assistant settings
    #[serde(default)]
    pub assistant: AssistantSettings,
}

impl NavigatorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the file is missing, unreadable or
    /// not valid TOML.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| CoreError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".navigator")
            .join("config.toml")
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".navigatorrc")
    }

    /// Discover and load configuration files.
    ///
    /// Missing or invalid files are skipped.
    pub fn discover_and_load() -> Self {
        Self::discover_from(&Self::default_global_path(), &Self::default_local_path())
    }

    fn discover_from(global: &Path, local: &Path) -> Self {
        let mut config = Self::default();

        for path in [global, local] {
            match Self::load_from_file(path) {
                Ok(found) => {
                    debug!(path = %path.display(), "Loaded configuration");
                    config.merge(&found);
                }
                Err(e) => debug!(error = %e, "Configuration skipped"),
            }
        }

        config
    }

    /// Merge another configuration into this one.
    ///
    /// Values from `other` override values in `self` if they are set.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ref dir) = other.reference_dir {
            self.reference_dir = Some(dir.clone());
        }
        if let Some(ref file) = other.data_file {
            self.data_file = Some(file.clone());
        }
        if let Some(ref level) = other.log_level {
            self.log_level = Some(level.clone());
        }
        self.search.merge(&other.search);
        self.assistant.merge(&other.assistant);
    }

    /// Fill unset credentials from `lookup`.
    ///
    /// Values already present in the configuration are kept.
    pub fn apply_credentials<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if self.search.api_key.is_none() {
            self.search.api_key = fetch(GOOGLE_API_KEY_VAR);
        }
        if self.search.engine_id.is_none() {
            self.search.engine_id = fetch(GOOGLE_CSE_ID_VAR);
        }
        if self.assistant.api_key.is_none() {
            self.assistant.api_key = fetch(OPENAI_API_KEY_VAR);
        }
    }

    /// Fill unset credentials from the process environment, then from a
    /// `.env` file in the working directory or its parents.
    pub fn apply_environment(&mut self) {
        let dotenv: Vec<(String, String)> = dotenvy::dotenv_iter()
            .map(|iter| iter.filter_map(std::result::Result::ok).collect())
            .unwrap_or_default();

        self.apply_credentials(|name| {
            std::env::var(name).ok().or_else(|| {
                dotenv
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.clone())
            })
        });
    }

    /// Resolves the configuration used by a run.
    ///
    /// An explicit `path` replaces file discovery. Credentials are then
    /// completed from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if an explicit file cannot be loaded.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let config = Self::load_from_file(path)?;
                debug!(path = %path.display(), "Loaded configuration");
                config
            }
            None => Self::discover_and_load(),
        };
        config.apply_environment();
        Ok(config)
    }

    /// Reference directory, defaulting to the working directory.
    pub fn reference_dir(&self) -> PathBuf {
        self.reference_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Student data file, defaulting to `student_data.json`.
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}
