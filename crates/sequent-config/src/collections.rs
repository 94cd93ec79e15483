//! Collection Configuration (sequent.toml)
//!
//! Initial backing-store capacities for lists, stacks and dictionaries.

use crate::{ConfigError, ConfigResult, MAX_INITIAL_CAPACITY};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Collection defaults loaded from `sequent.toml` or `~/.sequent/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CollectionsConfig {
    /// List settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<CapacityConfig>,

    /// Stack settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<CapacityConfig>,

    /// Dictionary settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<CapacityConfig>,
}

/// Backing-store sizing for one collection kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CapacityConfig {
    /// Number of elements to pre-allocate (default: 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_capacity: Option<usize>,
}

impl CapacityConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            initial_capacity: Some(capacity),
        }
    }
}

impl CollectionsConfig {
    /// Load collection configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: "<string>".into(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the collection configuration
    pub fn validate(&self) -> ConfigResult<()> {
        validate_capacity("list.initial_capacity", self.list.as_ref())?;
        validate_capacity("stack.initial_capacity", self.stack.as_ref())?;
        validate_capacity("dictionary.initial_capacity", self.dictionary.as_ref())?;
        Ok(())
    }

    /// Initial capacity for new lists
    pub fn list_capacity(&self) -> usize {
        capacity_of(self.list.as_ref())
    }

    /// Initial capacity for new stacks
    pub fn stack_capacity(&self) -> usize {
        capacity_of(self.stack.as_ref())
    }

    /// Initial capacity for new dictionaries
    pub fn dictionary_capacity(&self) -> usize {
        capacity_of(self.dictionary.as_ref())
    }

    /// Merge another config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &CollectionsConfig) {
        merge_section(&mut self.list, other.list.as_ref());
        merge_section(&mut self.stack, other.stack.as_ref());
        merge_section(&mut self.dictionary, other.dictionary.as_ref());
    }
}

fn capacity_of(section: Option<&CapacityConfig>) -> usize {
    section.and_then(|s| s.initial_capacity).unwrap_or(0)
}

fn merge_section(base: &mut Option<CapacityConfig>, other: Option<&CapacityConfig>) {
    let Some(other) = other else {
        return;
    };
    if other.initial_capacity.is_some() {
        base.get_or_insert_with(CapacityConfig::default)
            .initial_capacity = other.initial_capacity;
    }
}

fn validate_capacity(field: &str, section: Option<&CapacityConfig>) -> ConfigResult<()> {
    if let Some(capacity) = section.and_then(|s| s.initial_capacity) {
        if capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: format!(
                    "must be at most {}, got {}",
                    MAX_INITIAL_CAPACITY, capacity
                ),
            });
        }
    }
    Ok(())
}
