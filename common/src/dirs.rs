//! XDG directory utilities for pyra-icon.

use std::path::PathBuf;

use anyhow::{Context, Result};
use xdg::BaseDirectories;

pub const APP_NAME: &str = "pyra-icon";

fn base_dirs() -> BaseDirectories {
    BaseDirectories::with_prefix(APP_NAME)
}

/// Return the XDG config directory (no creation - config may not exist yet).
/// `~/.config/pyra-icon/`
pub fn config_dir() -> Result<PathBuf> {
    base_dirs()
        .get_config_home()
        .context("Could not determine config directory (HOME not set?)")
}

/// Default config file path.
/// `~/.config/pyra-icon/config.toml`
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Return the XDG state directory, creating it if needed.
/// `~/.local/state/pyra-icon/`
pub fn state_dir() -> Result<PathBuf> {
    let dir = base_dirs()
        .get_state_home()
        .context("Failed to get XDG state directory (HOME not set?)")?;
    std::fs::create_dir_all(&dir).context("Failed to create state directory")?;
    Ok(dir)
}

/// Log file used when file logging is enabled.
/// `~/.local/state/pyra-icon/pyra-icon.log`
pub fn log_path() -> Result<PathBuf> {
    Ok(state_dir()?.join("pyra-icon.log"))
}
