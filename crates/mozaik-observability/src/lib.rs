// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! # mozaik-observability
//!
//! Logging setup shared by Mozaik binaries and tests, with per-crate debug flag
//! support. Library crates only emit events; they never install a subscriber.
//!
//! ## Features
//! - `file-logging`: timestamped run folders with daily-rolling JSON log files

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known Mozaik crate names for debug flags; these are also the event targets the
/// crates log under.
pub const KNOWN_CRATES: &[&str] = &[
    "mozaik",
    "mozaik-structures",
    "mozaik-stimuli",
    "mozaik-analysis",
    "mozaik-framework",
    "mozaik-config",
];
