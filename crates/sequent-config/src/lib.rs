//! Sequent Configuration System
//!
//! Provides configuration for sequent collection defaults:
//! - Collection configuration (`sequent.toml`)
//! - Global user configuration (`~/.sequent/config.toml`)
//! - Configuration precedence and merging
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.sequent/config.toml)
//! 2. Project config (./sequent.toml)
//! 3. Environment variables (SEQUENT_*)
//!
//! # Example
//!
//! ```no_run
//! use sequent_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! let capacity = config.collections.list_capacity();
//! ```

pub mod collections;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

/// Largest initial capacity a configuration may request for any collection.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use collections::{CapacityConfig, CollectionsConfig};
pub use loader::{Config, ConfigLoader};
