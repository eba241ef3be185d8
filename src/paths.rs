//! XDG-style path utilities for configuration and saved sessions.
//!
//! This module provides consistent path resolution across platforms,
//! preferring XDG Base Directory Specification conventions over
//! OS-specific locations.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "jobshell";

/// Returns the configuration directory for jobshell.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/jobshell` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/jobshell` otherwise
pub fn config_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

/// Returns the data directory for jobshell.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/jobshell` if `XDG_DATA_HOME` is set
/// 2. `~/.local/share/jobshell` otherwise
pub fn data_dir() -> Result<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

/// Where the REPL keeps a saved session.
pub fn session_file() -> Result<PathBuf> {
    Ok(data_dir()?.join("session.json"))
}

fn xdg_dir(var: &str, fallback: &[&str]) -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var(var)
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }
    let mut dir = dirs::home_dir().context("Failed to determine home directory")?;
    dir.extend(fallback);
    Ok(dir.join(APP_DIR))
}
