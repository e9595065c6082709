//! Parallel texture preloader
//!
//! Loads a fixed set of named textures once, fanning out one task per
//! unloaded slot and joining before returning. A slot whose load fails stays
//! empty and resolves to "no texture"; it never aborts the other loads.
//!
//! # Architecture
//!
//! ```text
//! preload()
//!     │
//!     ├──(rayon)──► load slot 1 ──► write slot 1
//!     ├──(rayon)──► load slot 2 ──► write slot 2
//!     │                 ...
//!     ▼
//! [join: every task resolved]
//! ```
//!
//! The preloader owns the decoded pixels. Everything else holds a
//! [`TextureHandle`] whose id indexes this table.

mod source;


use std::sync::{Arc, RwLock};

use hashbrown::HashMap;
use nativestate_shared::TextureHandle;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::PreloadError;
use crate::producer::TextureLookup;

pub use source::{AssetEntry, DecodedTexture, ImageFileSource, TextureSource};

/// A loaded texture and its pixels.
#[derive(Debug)]
pub struct ResidentTexture {
    pub handle: TextureHandle,
    /// BGRA8 pixels, `width * height * 4` bytes
    pub pixels: Arc<[u8]>,
}

/// Result of one [`AssetPreloader::preload`] pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PreloadReport {
    /// Slots loaded by this pass
    pub loaded: usize,
    /// Slots that failed and remain empty
    pub failed: usize,
    /// Slots already loaded before this pass
    pub skipped: usize,
}

enum SlotOutcome {
    Loaded,
    Failed,
    Skipped,
}

struct Slot {
    entry: AssetEntry,
    texture: RwLock<Option<Arc<ResidentTexture>>>,
}

impl Slot {
    fn resident(&self) -> Option<Arc<ResidentTexture>> {
        self.texture
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn store(&self, texture: ResidentTexture) {
        *self.texture.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(texture));
    }
}

/// Fixed table of preloadable textures.
pub struct AssetPreloader {
    source: Box<dyn TextureSource>,
    slots: Vec<Slot>,
    by_name: HashMap<String, usize>,
}

impl AssetPreloader {
    /// Create a preloader for `entries`. Nothing is loaded until [`preload`](Self::preload).
    pub fn new(
        entries: impl IntoIterator<Item = AssetEntry>,
        source: impl TextureSource + 'static,
    ) -> Result<Self, PreloadError> {
        let mut slots = Vec::new();
        let mut by_name = HashMap::new();
        for entry in entries {
            if by_name.insert(entry.name.clone(), slots.len()).is_some() {
                return Err(PreloadError::DuplicateAsset(entry.name));
            }
            slots.push(Slot {
                entry,
                texture: RwLock::new(None),
            });
        }

        Ok(Self {
            source: Box::new(source),
            slots,
            by_name,
        })
    }

    /// Load every empty slot in parallel and block until all loads resolve.
    ///
    /// Slots that already hold a texture are not reloaded. There is no
    /// timeout: a load that never returns blocks the caller.
    pub fn preload(&self) -> PreloadReport {
        let outcomes: Vec<SlotOutcome> = self
            .slots
            .par_iter()
            .enumerate()
            .map(|(index, slot)| self.load_slot(index, slot))
            .collect();

        let mut report = PreloadReport::default();
        for outcome in outcomes {
            match outcome {
                SlotOutcome::Loaded => report.loaded += 1,
                SlotOutcome::Failed => report.failed += 1,
                SlotOutcome::Skipped => report.skipped += 1,
            }
        }
        info!(
            loaded = report.loaded,
            failed = report.failed,
            skipped = report.skipped,
            "Texture preload complete"
        );
        report
    }

    /// Handle of the named texture, `None` if unknown or not loaded.
    pub fn handle(&self, name: &str) -> Option<TextureHandle> {
        let index = *self.by_name.get(name)?;
        self.slots[index].resident().map(|t| t.handle)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.handle(name).is_some()
    }

    /// Resolve a handle back to its pixels.
    pub fn texture(&self, handle: TextureHandle) -> Option<Arc<ResidentTexture>> {
        let index = (handle.id() as usize).checked_sub(1)?;
        self.slots
            .get(index)?
            .resident()
            .filter(|t| t.handle == handle)
    }

    pub fn entries(&self) -> impl Iterator<Item = &AssetEntry> {
        self.slots.iter().map(|slot| &slot.entry)
    }

    fn load_slot(&self, index: usize, slot: &Slot) -> SlotOutcome {
        if slot.resident().is_some() {
            debug!(asset = %slot.entry.name, "Texture already loaded");
            return SlotOutcome::Skipped;
        }

        match self.load_entry(index, &slot.entry) {
            Ok(texture) => {
                debug!(
                    asset = %slot.entry.name,
                    width = texture.handle.width(),
                    height = texture.handle.height(),
                    "Texture loaded"
                );
                slot.store(texture);
                SlotOutcome::Loaded
            }
            Err(e) => {
                warn!(asset = %slot.entry.name, "Texture unavailable: {e}");
                SlotOutcome::Failed
            }
        }
    }

    fn load_entry(&self, index: usize, entry: &AssetEntry) -> Result<ResidentTexture, PreloadError> {
        let decoded = self.source.load(entry)?;

        // Slot ids start at 1, 0 is the null texture on the wire
        let handle = TextureHandle::new(index as u32 + 1, decoded.width, decoded.height).ok_or(
            PreloadError::InvalidDimensions {
                name: entry.name.clone(),
                width: decoded.width,
                height: decoded.height,
            },
        )?;

        let expected = decoded.width as usize * decoded.height as usize * 4;
        if decoded.pixels.len() != expected {
            return Err(PreloadError::PixelSize {
                name: entry.name.clone(),
                expected,
                actual: decoded.pixels.len(),
            });
        }

        Ok(ResidentTexture {
            handle,
            pixels: decoded.pixels.into(),
        })
    }
}

impl TextureLookup for AssetPreloader {
    fn texture_handle(&self, asset: &str) -> Option<TextureHandle> {
        self.handle(asset)
    }
}
