// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! # Mozaik Configuration
//!
//! Type-safe configuration for Mozaik tools with:
//! - TOML file parsing (`mozaik_configuration.toml`)
//! - Environment variable overrides (`MOZAIK_*`)
//! - CLI argument overrides (dotted keys such as `stimulus.max_luminance`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mozaik_config::{load_config, validate_config};
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! validate_config(&config).expect("Invalid config");
//! println!("Max luminance: {}", config.stimulus.max_luminance);
//! ```

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config, CONFIG_FILE_NAME};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
