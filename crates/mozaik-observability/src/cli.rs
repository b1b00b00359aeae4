//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-mozaik-stimuli`, `--debug-mozaik-analysis`, etc.
//! to raise the log level of individual crates.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use mozaik_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-mozaik-stimuli".to_string()]);
/// assert!(flags.is_enabled("mozaik-stimuli"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string());
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create a tracing filter from debug flags with `info` for everything else
    pub fn to_filter_string(&self) -> String {
        self.to_filter_string_with_base("info")
    }

    /// Filter string for `EnvFilter`: `base` for every target, `debug` for enabled crates.
    ///
    /// Format: `mozaik-stimuli=debug,mozaik-analysis=debug,warn`.
    pub fn to_filter_string_with_base(&self, base: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name))
            .collect();
        filters.push(base.to_lowercase());
        filters.join(",")
    }
}

/// Helper function to parse debug flags from the process arguments and environment
///
/// Environment variable `MOZAIK_DEBUG`: comma-separated crate names, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(env_var) = env::var("MOZAIK_DEBUG") {
        apply_debug_env(&mut flags, &env_var);
    }
    flags
}

fn apply_debug_env(flags: &mut CrateDebugFlags, value: &str) {
    if value.trim() == "all" {
        flags.enable_all();
        return;
    }
    for crate_name in value.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        flags.enable(crate_name);
    }
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  MOZAIK_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  MOZAIK_DEBUG=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["render_stimulus".to_string(), "--debug-mozaik-stimuli".to_string()]);
        assert!(flags.is_enabled("mozaik-stimuli"));
        assert!(!flags.is_enabled("mozaik-analysis"));
        assert!(flags.any_enabled());
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_args(vec![
            "--debug-mozaik-stimuli".to_string(),
            "--debug-mozaik-analysis".to_string(),
        ]);
        assert_eq!(flags.to_filter_string_with_base("WARN"), "mozaik-analysis=debug,mozaik-stimuli=debug,warn");
        assert_eq!(CrateDebugFlags::default().to_filter_string(), "info");
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-mozaik-framework".to_string()]);
        assert_eq!(flags.log_level("mozaik-framework"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("mozaik-config"), tracing::Level::INFO);
    }

    #[test]
    fn test_env_list() {
        let mut flags = CrateDebugFlags::default();
        apply_debug_env(&mut flags, "mozaik-config, ,mozaik-stimuli");
        assert_eq!(flags.enabled_crates.len(), 2);
        apply_debug_env(&mut flags, "all");
        assert_eq!(flags.enabled_crates.len(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_help_names_every_crate() {
        let help = debug_flags_help();
        assert!(help.contains("--debug-{crate-name}"));
        for crate_name in KNOWN_CRATES {
            assert!(help.contains(crate_name));
        }
    }
}
