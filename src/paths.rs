//! Common paths for Perch data storage
//!
//! Toast settings live next to the rest of Perch's data under
//! ~/.config/perch/ on all platforms:
//! - toast.toml - Toast scheduler configuration

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the Perch data directory (~/.config/perch/)
///
/// This is consistent across all platforms for simplicity.
pub fn perch_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let perch_dir = home.join(".config").join("perch");
    fs::create_dir_all(&perch_dir).context("Failed to create perch directory")?;
    Ok(perch_dir)
}

/// Get the toast config file path (~/.config/perch/toast.toml)
pub fn toast_config_path() -> Result<PathBuf> {
    Ok(perch_dir()?.join("toast.toml"))
}
