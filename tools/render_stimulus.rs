// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Render a drifting sinusoidal grating to PNG frames
//!
//! Usage:
//!   render_stimulus [--config mozaik_configuration.toml] [--output frames/] [--frames 20]
//!                   [--orientation 0.785] [--set stimulus.max_luminance=80] [--debug-mozaik-stimuli]
//!
//! Stimulus defaults come from the `[stimulus]` section of the configuration; grating
//! arguments override them. The paths of the written frames are printed one per line.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use mozaik::config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config, validate_config, MozaikConfig,
};
use mozaik::observability::{debug_flags_help, parse_debug_flags};
use mozaik::stimuli::{DriftingSinusoidalGrating, GratingSettings, StimulusPlayer};

/// Render a drifting sinusoidal grating to PNG frames
#[derive(Parser, Debug)]
#[command(name = "render_stimulus", version, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Configuration file (default: search for mozaik_configuration.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (default: export.output_dir, or a fresh temporary directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of frames to write (default: export.max_frames)
    #[arg(short, long)]
    frames: Option<usize>,

    /// Orientation in radians
    #[arg(long, default_value_t = 0.0)]
    orientation: f64,

    /// Cycles per degree
    #[arg(long, default_value_t = 0.8)]
    spatial_frequency: f64,

    /// Hz
    #[arg(long, default_value_t = 2.0)]
    temporal_frequency: f64,

    /// Michelson contrast in percent
    #[arg(long, default_value_t = 100.0)]
    contrast: f64,

    /// Background luminance (default: half the maximum luminance)
    #[arg(long)]
    background_luminance: Option<f64>,

    /// Stimulus duration in ms (default: endless, bounded by the frame count)
    #[arg(long)]
    duration: Option<f64>,

    /// Radius in degrees of a circular aperture
    #[arg(long)]
    aperture_radius: Option<f64>,

    /// Configuration override as dotted key=value, e.g. stimulus.max_luminance=80
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
}

fn main() -> Result<()> {
    // --debug-<crate> flags are not clap arguments
    let debug_flags = parse_debug_flags();
    let args = Args::parse_from(std::env::args().filter(|a| !a.starts_with("--debug-")));

    let mut overrides = HashMap::new();
    for entry in &args.overrides {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("Override '{}' is not of the form key=value", entry);
        };
        overrides.insert(key.trim().to_string(), value.trim().to_string());
    }
    if let Some(output) = &args.output {
        overrides.insert("export.output_dir".to_string(), output.display().to_string());
    }
    if let Some(frames) = args.frames {
        overrides.insert("export.max_frames".to_string(), frames.to_string());
    }

    let config = load(&args, &overrides)?;
    validate_config(&config)?;

    let logging = mozaik::logging_config(&config);
    #[cfg(feature = "file-logging")]
    let _guard = mozaik::observability::init_logging(&logging, &debug_flags)?;
    #[cfg(not(feature = "file-logging"))]
    mozaik::observability::init_console_logging(&logging, &debug_flags)?;

    let parameters = mozaik::stimulus_parameters(&config).context("Invalid [stimulus] configuration")?;
    let settings = GratingSettings {
        orientation: args.orientation,
        spatial_frequency: args.spatial_frequency,
        temporal_frequency: args.temporal_frequency,
        contrast: args.contrast,
        background_luminance: args.background_luminance.unwrap_or(parameters.max_luminance / 2.0),
        pixels_per_degree: config.stimulus.pixels_per_degree,
        duration: args.duration,
        aperture_radius: args.aperture_radius,
    };
    let grating = DriftingSinusoidalGrating::new(parameters, settings).context("Invalid grating")?;
    let player = StimulusPlayer::new(grating)?;

    let paths = player.export(config.export.output_dir.as_deref(), config.export.max_frames)?;
    info!(target: "mozaik", "Rendered {} frames", paths.len());
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}

/// Configuration from the given or discovered file; defaults when none exists.
fn load(args: &Args, overrides: &HashMap<String, String>) -> Result<MozaikConfig> {
    if let Some(path) = &args.config {
        return load_config(Some(path), Some(overrides))
            .with_context(|| format!("Failed to load {}", path.display()));
    }
    match find_config_file() {
        Ok(path) => load_config(Some(&path), Some(overrides))
            .with_context(|| format!("Failed to load {}", path.display())),
        Err(_) => {
            let mut config = MozaikConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, overrides);
            Ok(config)
        }
    }
}
