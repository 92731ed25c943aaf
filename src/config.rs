//! Configuration module for the toast scheduler

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ToastError;
use crate::paths;
use crate::toast::{Gravity, MAX_LIMIT, ToastDuration};

/// Toast scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastConfig {
    /// A new toast preempts the one on screen instead of waiting for it
    #[serde(default = "default_immediate_mode")]
    pub immediate_mode: bool,

    /// Display time of short toasts, in milliseconds
    #[serde(default = "default_short_ms")]
    pub short_ms: u64,

    /// Display time of long toasts, in milliseconds
    #[serde(default = "default_long_ms")]
    pub long_ms: u64,

    /// Maximum number of pending toasts; the oldest is dropped on overflow
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,

    /// Length of the fade-in animation, in milliseconds
    #[serde(default = "default_animation_ms")]
    pub enter_ms: u64,

    /// Length of the fade-out animation, in milliseconds
    #[serde(default = "default_animation_ms")]
    pub exit_ms: u64,

    /// Gravity used by `ToastController::show`
    #[serde(default)]
    pub default_gravity: Gravity,

    /// Vertical offset used by `ToastController::show`
    #[serde(default = "default_y_offset")]
    pub default_y_offset: i32,
}

fn default_immediate_mode() -> bool {
    true
}

fn default_short_ms() -> u64 {
    ToastDuration::Short.default_millis()
}

fn default_long_ms() -> u64 {
    ToastDuration::Long.default_millis()
}

fn default_max_pending() -> usize {
    MAX_LIMIT
}

fn default_animation_ms() -> u64 {
    200
}

fn default_y_offset() -> i32 {
    64
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            immediate_mode: default_immediate_mode(),
            short_ms: default_short_ms(),
            long_ms: default_long_ms(),
            max_pending: default_max_pending(),
            enter_ms: default_animation_ms(),
            exit_ms: default_animation_ms(),
            default_gravity: Gravity::default(),
            default_y_offset: default_y_offset(),
        }
    }
}

impl ToastConfig {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::toast_config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Reject values the scheduler cannot work with
    pub fn validate(&self) -> Result<(), ToastError> {
        if self.max_pending == 0 {
            return Err(ToastError::InvalidConfig(
                "max_pending must be at least 1".to_string(),
            ));
        }
        if self.short_ms == 0 || self.long_ms == 0 {
            return Err(ToastError::InvalidConfig(
                "toast durations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// How long a toast of the given class stays on screen
    pub fn display_time(&self, duration: ToastDuration) -> Duration {
        Duration::from_millis(match duration {
            ToastDuration::Short => self.short_ms,
            ToastDuration::Long => self.long_ms,
        })
    }

    pub fn enter_duration(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}
