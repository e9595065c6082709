//! Configuration management (config.toml)
//!
//! Settings are stored in TOML format in the platform-specific config
//! directory. Every section and field has a default, so a partial or empty
//! file is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::preloader::AssetEntry;
use crate::producer::PresentationState;
use crate::runtime::RuntimeConfig;
use nativestate_shared::constants::{CHECKERBOARD_ASSET, MARBLE_ASSET};

const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Textures preloaded before the engine starts
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Engine loop settings
    #[serde(default)]
    pub runtime: RuntimeSettings,
    /// Presentation state the producer starts from
    #[serde(default)]
    pub initial: PresentationState,
}

/// Asset preload configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory asset paths are resolved against (default: "assets")
    #[serde(default = "default_asset_dir")]
    pub dir: PathBuf,
    /// Named assets (default: marble.jpg, checkerboard.png)
    #[serde(default = "default_entries")]
    pub entries: Vec<AssetEntry>,
}

/// Engine loop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeSettings {
    /// Ticks per second (default: 60)
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
    /// Per-tick budget in microseconds before a slow tick is logged (default: 4000)
    #[serde(default = "default_frame_budget_us")]
    pub frame_budget_us: u64,
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_entries() -> Vec<AssetEntry> {
    vec![
        AssetEntry::new(MARBLE_ASSET, "marble.jpg"),
        AssetEntry::new(CHECKERBOARD_ASSET, "checkerboard.png"),
    ]
}

fn default_tick_rate() -> u32 {
    60
}

fn default_frame_budget_us() -> u64 {
    4000
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_asset_dir(),
            entries: default_entries(),
        }
    }
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            frame_budget_us: default_frame_budget_us(),
        }
    }
}

impl RuntimeSettings {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            tick_rate: self.tick_rate,
            frame_budget: Duration::from_micros(self.frame_budget_us),
        }
    }
}

/// Returns the platform-specific config directory.
///
/// On Linux: `~/.config/nativestate`
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.nativestate", "", "NativeState")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads the configuration from the platform config directory.
///
/// Returns defaults if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE)) else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }
    load_from(&path).unwrap_or_else(|e| {
        warn!("Ignoring {}: {e}", path.display());
        Config::default()
    })
}

/// Loads the configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Saves the configuration to the platform config directory.
///
/// Creates the directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join(CONFIG_FILE);
    save_to(config, &path)?;
    Ok(path)
}

/// Saves the configuration to an explicit path.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
