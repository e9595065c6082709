//! Error types for the native state channel
//!
//! Nothing here crosses the channel itself: pushes and applies never fail.
//! These cover the surrounding setup (asset loading, lifecycle, config).

use std::path::PathBuf;

use thiserror::Error;

use crate::lifecycle::LifecycleState;

/// Failure to load a single preloaded asset, or to set up the preloader.
#[derive(Error, Debug)]
pub enum PreloadError {
    #[error("asset '{name}' not found at {}", path.display())]
    NotFound { name: String, path: PathBuf },
    #[error("asset '{name}' could not be decoded")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("asset '{name}' has unusable dimensions {width}x{height}")]
    InvalidDimensions {
        name: String,
        width: u32,
        height: u32,
    },
    #[error("asset '{name}' has {actual} bytes of pixel data, expected {expected}")]
    PixelSize {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("asset '{0}' is listed more than once")]
    DuplicateAsset(String),
}

/// Invalid host lifecycle transition or engine start failure.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("cannot start while {0}")]
    NotUnloaded(LifecycleState),
    #[error("cannot stop while {0}")]
    NotReady(LifecycleState),
    #[error("engine failed to start: {0}")]
    EngineStart(String),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no platform config directory available")]
    NoConfigDir,
}
