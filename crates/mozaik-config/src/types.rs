// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `mozaik_configuration.toml`. Every field has a
//! default, so any subset of the file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MozaikConfig {
    pub logging: LoggingSection,
    pub stimulus: StimulusConfig,
    pub export: ExportConfig,
}

/// Console logging
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSection {
    /// trace, debug, info, warn or error
    pub level: String,
    /// text or json
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Defaults for the stimuli rendered by Mozaik tools
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StimulusConfig {
    /// ms
    pub frame_duration: f64,
    /// cd/m²
    pub max_luminance: f64,
    /// (width, height) in degrees of visual field
    pub size_in_degrees: (f64, f64),
    /// Centre of the stimulus in degrees of visual field
    pub location: (f64, f64),
    pub pixels_per_degree: f64,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            frame_duration: 7.0,
            max_luminance: 100.0,
            size_in_degrees: (10.0, 10.0),
            location: (0.0, 0.0),
            pixels_per_degree: 10.0,
        }
    }
}

/// Frame export
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// `None` exports into a fresh temporary directory
    pub output_dir: Option<PathBuf>,
    pub max_frames: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            max_frames: 100,
        }
    }
}
