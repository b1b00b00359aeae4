// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that values are within valid ranges; every violation is reported at once.

use crate::{ConfigError, ConfigResult, MozaikConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    NotPositive { field: String, value: f64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{} = {} must be positive", field, value)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &MozaikConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");
    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Every violation in `config`, in section order.
pub fn collect_errors(config: &MozaikConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_logging(config, &mut errors);
    validate_stimulus(config, &mut errors);
    validate_export(config, &mut errors);
    errors
}

fn validate_logging(config: &MozaikConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("'{}' is not one of {}", config.logging.level, LOG_LEVELS.join(", ")),
        });
    }
    let format = config.logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: format!("'{}' is not one of {}", config.logging.format, LOG_FORMATS.join(", ")),
        });
    }
}

fn validate_stimulus(config: &MozaikConfig, errors: &mut Vec<ConfigValidationError>) {
    let stimulus = &config.stimulus;
    let positive = [
        ("stimulus.frame_duration", stimulus.frame_duration),
        ("stimulus.max_luminance", stimulus.max_luminance),
        ("stimulus.size_in_degrees[0]", stimulus.size_in_degrees.0),
        ("stimulus.size_in_degrees[1]", stimulus.size_in_degrees.1),
        ("stimulus.pixels_per_degree", stimulus.pixels_per_degree),
    ];
    for (field, value) in positive {
        if !(value > 0.0) || !value.is_finite() {
            errors.push(ConfigValidationError::NotPositive {
                field: field.to_string(),
                value,
            });
        }
    }
    if !stimulus.location.0.is_finite() || !stimulus.location.1.is_finite() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "stimulus.location".to_string(),
            reason: "coordinates must be finite".to_string(),
        });
    }
}

fn validate_export(config: &MozaikConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.export.max_frames == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "export.max_frames".to_string(),
            reason: "at least one frame must be exported".to_string(),
        });
    }
}
