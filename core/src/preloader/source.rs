//! Texture sources for the preloader

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PreloadError;

/// A named image resource to preload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Name the producer looks the texture up by
    pub name: String,
    /// Image file, relative to the asset directory
    pub path: PathBuf,
}

impl AssetEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Decoded texture pixels, tightly packed BGRA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Loads one asset. Called concurrently from the preloader's worker threads.
pub trait TextureSource: Send + Sync {
    fn load(&self, entry: &AssetEntry) -> Result<DecodedTexture, PreloadError>;
}

impl<T: TextureSource + ?Sized> TextureSource for Arc<T> {
    fn load(&self, entry: &AssetEntry) -> Result<DecodedTexture, PreloadError> {
        (**self).load(entry)
    }
}

/// Decodes PNG/JPEG files from an asset directory.
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    root: PathBuf,
}

impl ImageFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureSource for ImageFileSource {
    fn load(&self, entry: &AssetEntry) -> Result<DecodedTexture, PreloadError> {
        let path = self.root.join(&entry.path);
        if !path.is_file() {
            return Err(PreloadError::NotFound {
                name: entry.name.clone(),
                path,
            });
        }

        let image = image::open(&path).map_err(|source| PreloadError::Decode {
            name: entry.name.clone(),
            source,
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        // Engine textures are BGRA
        let mut pixels = rgba.into_raw();
        for texel in pixels.chunks_exact_mut(4) {
            texel.swap(0, 2);
        }

        Ok(DecodedTexture {
            width,
            height,
            pixels,
        })
    }
}
