//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::collections::{CapacityConfig, CollectionsConfig};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Project configuration file name
pub const CONFIG_FILE_NAME: &str = "sequent.toml";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.sequent/config.toml) - lowest priority
/// 2. Project config (./sequent.toml) - overrides global
/// 3. Environment variables (SEQUENT_*) - overrides project
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Effective collection configuration
    pub collections: CollectionsConfig,

    /// Directory where sequent.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Create a loader that reads the global config from an explicit path
    pub fn with_global_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find sequent.toml, merges it over the
    /// global config if one exists, then applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;

        let mut collections = self.load_global_or_default()?;
        collections.merge(&project_config);

        let collections = apply_env_overrides(collections)?;

        Ok(Config {
            collections,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = CollectionsConfig::load_from_file(config_path)?;
        let mut collections = self.load_global_or_default()?;
        collections.merge(&project_config);

        let collections = apply_env_overrides(collections)?;

        Ok(Config {
            collections,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, CollectionsConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let config = CollectionsConfig::load_from_file(&config_path)?;
                return Ok((Some(current), config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, CollectionsConfig::default())),
            }
        }
    }

    /// Global config, or the defaults when there is no home directory.
    /// A global file that exists but fails to load is an error.
    fn load_global_or_default(&mut self) -> ConfigResult<CollectionsConfig> {
        match self.load_global_config() {
            Err(ConfigError::HomeNotFound) => Ok(CollectionsConfig::default()),
            result => result,
        }
    }

    /// Load global configuration from ~/.sequent/config.toml
    fn load_global_config(&mut self) -> ConfigResult<CollectionsConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => {
                let path = Self::global_config_dir()?.join("config.toml");
                self.global_config_path = Some(path.clone());
                path
            }
        };

        if !path.exists() {
            return Ok(CollectionsConfig::default());
        }

        CollectionsConfig::load_from_file(&path)
    }

    /// Get the global configuration directory (~/.sequent)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".sequent"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply environment variable overrides
///
/// Environment variables follow the pattern: SEQUENT_<COLLECTION>_CAPACITY
/// Example: SEQUENT_LIST_CAPACITY=256
fn apply_env_overrides(mut config: CollectionsConfig) -> ConfigResult<CollectionsConfig> {
    if let Some(capacity) = env_capacity("SEQUENT_LIST_CAPACITY")? {
        config.list = Some(CapacityConfig::with_capacity(capacity));
    }
    if let Some(capacity) = env_capacity("SEQUENT_STACK_CAPACITY")? {
        config.stack = Some(CapacityConfig::with_capacity(capacity));
    }
    if let Some(capacity) = env_capacity("SEQUENT_DICTIONARY_CAPACITY")? {
        config.dictionary = Some(CapacityConfig::with_capacity(capacity));
    }

    config.validate()?;
    Ok(config)
}

fn env_capacity(var: &str) -> ConfigResult<Option<usize>> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: var.to_string(),
                reason: format!("expected a non-negative integer, got '{}'", raw),
            }),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if this is a project (has sequent.toml)
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
