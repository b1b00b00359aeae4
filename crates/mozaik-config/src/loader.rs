// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Values are layered in three tiers:
//! 1. TOML file (base values, missing keys fall back to defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, MozaikConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "mozaik_configuration.toml";

/// Find the Mozaik configuration file
///
/// Search order:
/// 1. `MOZAIK_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Parent directories, up to 5 levels
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("MOZAIK_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by MOZAIK_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    Err(ConfigError::FileNotFound(format!(
        "Mozaik configuration file '{}' not found in any of these locations:\n{}\n\nSet MOZAIK_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides, keyed by dotted path
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<MozaikConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: MozaikConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `MOZAIK_LOG_LEVEL` -> `logging.level`
/// - `MOZAIK_LOG_FORMAT` -> `logging.format`
/// - `MOZAIK_FRAME_DURATION` -> `stimulus.frame_duration`
/// - `MOZAIK_MAX_LUMINANCE` -> `stimulus.max_luminance`
/// - `MOZAIK_PIXELS_PER_DEGREE` -> `stimulus.pixels_per_degree`
/// - `MOZAIK_EXPORT_DIR` -> `export.output_dir`
/// - `MOZAIK_EXPORT_MAX_FRAMES` -> `export.max_frames`
///
/// Values that do not parse are ignored.
pub fn apply_environment_overrides(config: &mut MozaikConfig) {
    let overrides: HashMap<String, String> = [
        ("MOZAIK_LOG_LEVEL", "logging.level"),
        ("MOZAIK_LOG_FORMAT", "logging.format"),
        ("MOZAIK_FRAME_DURATION", "stimulus.frame_duration"),
        ("MOZAIK_MAX_LUMINANCE", "stimulus.max_luminance"),
        ("MOZAIK_PIXELS_PER_DEGREE", "stimulus.pixels_per_degree"),
        ("MOZAIK_EXPORT_DIR", "export.output_dir"),
        ("MOZAIK_EXPORT_MAX_FRAMES", "export.max_frames"),
    ]
    .into_iter()
    .filter_map(|(variable, key)| env::var(variable).ok().map(|value| (key.to_string(), value)))
    .collect();
    apply_cli_overrides(config, &overrides);
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Dotted keys to values, e.g. `{"stimulus.max_luminance": "80"}`. Pairs
///   such as `stimulus.location` take `x,y`.
///
/// Unknown keys and values that do not parse are ignored.
pub fn apply_cli_overrides(config: &mut MozaikConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("logging.level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("logging.format") {
        config.logging.format = value.clone();
    }

    if let Some(value) = parsed(cli_args, "stimulus.frame_duration") {
        config.stimulus.frame_duration = value;
    }
    if let Some(value) = parsed(cli_args, "stimulus.max_luminance") {
        config.stimulus.max_luminance = value;
    }
    if let Some(value) = parsed(cli_args, "stimulus.pixels_per_degree") {
        config.stimulus.pixels_per_degree = value;
    }
    if let Some(value) = cli_args.get("stimulus.size_in_degrees").and_then(|v| parse_pair(v)) {
        config.stimulus.size_in_degrees = value;
    }
    if let Some(value) = cli_args.get("stimulus.location").and_then(|v| parse_pair(v)) {
        config.stimulus.location = value;
    }

    if let Some(value) = cli_args.get("export.output_dir") {
        config.export.output_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = parsed(cli_args, "export.max_frames") {
        config.export.max_frames = value;
    }
}

fn parsed<T: std::str::FromStr>(cli_args: &HashMap<String, String>, key: &str) -> Option<T> {
    cli_args.get(key).and_then(|v| v.trim().parse::<T>().ok())
}

fn parse_pair(value: &str) -> Option<(f64, f64)> {
    let (x, y) = value.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("MOZAIK_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::set_var("MOZAIK_CONFIG_PATH", dir.path().join("missing.toml").to_str().unwrap());
        let missing = find_config_file();
        env::remove_var("MOZAIK_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
        assert!(matches!(missing, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::remove_var("MOZAIK_MAX_LUMINANCE");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[stimulus]").unwrap();
        writeln!(file, "max_luminance = 60.0").unwrap();
        writeln!(file, "[export]").unwrap();
        writeln!(file, "max_frames = 12").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.stimulus.max_luminance, 60.0);
        assert_eq!(config.export.max_frames, 12);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[stimulus\nmax_luminance = ").unwrap();
        assert!(matches!(load_config(Some(&config_path), None), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = MozaikConfig::default();

        env::set_var("MOZAIK_LOG_LEVEL", "debug");
        env::set_var("MOZAIK_PIXELS_PER_DEGREE", "25");
        env::set_var("MOZAIK_EXPORT_MAX_FRAMES", "not-a-number");

        apply_environment_overrides(&mut config);

        env::remove_var("MOZAIK_LOG_LEVEL");
        env::remove_var("MOZAIK_PIXELS_PER_DEGREE");
        env::remove_var("MOZAIK_EXPORT_MAX_FRAMES");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.stimulus.pixels_per_degree, 25.0);
        assert_eq!(config.export.max_frames, 100);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = MozaikConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("stimulus.location".to_string(), "1.5, -2".to_string());
        cli_args.insert("export.output_dir".to_string(), "/tmp/frames".to_string());
        cli_args.insert("stimulus.size_in_degrees".to_string(), "3".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.stimulus.location, (1.5, -2.0));
        assert_eq!(config.export.output_dir, Some(PathBuf::from("/tmp/frames")));
        assert_eq!(config.stimulus.size_in_degrees, (10.0, 10.0));
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[stimulus]").unwrap();
        writeln!(file, "max_luminance = 50.0").unwrap();
        writeln!(file, "frame_duration = 10.0").unwrap();

        env::set_var("MOZAIK_MAX_LUMINANCE", "70");
        env::set_var("MOZAIK_FRAME_DURATION", "5");

        let mut cli_args = HashMap::new();
        cli_args.insert("stimulus.max_luminance".to_string(), "90".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("MOZAIK_MAX_LUMINANCE");
        env::remove_var("MOZAIK_FRAME_DURATION");

        // CLI wins for luminance, env wins for frame duration
        assert_eq!(config.stimulus.max_luminance, 90.0);
        assert_eq!(config.stimulus.frame_duration, 5.0);
    }
}
