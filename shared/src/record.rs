//! The state record pushed from the host shell to the engine.

use std::num::NonZeroU32;

use crate::constants::{DEFAULT_SCALE, MAX_TEXTURE_DIMENSION};
use crate::presets::SpotlightPreset;

/// Tagged reference to a decoded texture owned by the asset preloader.
///
/// The channel only forwards it. Dimensions are cached next to the id so the
/// engine can wrap the external texture without a lookup; both are non-zero,
/// which makes "no texture" expressible only as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    id: NonZeroU32,
    width: NonZeroU32,
    height: NonZeroU32,
}

impl TextureHandle {
    /// Returns `None` for a zero id, a zero dimension, or a dimension above
    /// [`MAX_TEXTURE_DIMENSION`].
    pub fn new(id: u32, width: u32, height: u32) -> Option<Self> {
        if width > MAX_TEXTURE_DIMENSION || height > MAX_TEXTURE_DIMENSION {
            return None;
        }
        Some(Self {
            id: NonZeroU32::new(id)?,
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    /// Resource id in the preloader's texture table (never 0).
    pub fn id(&self) -> u32 {
        self.id.get()
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }
}

/// Full snapshot of every presentation parameter.
///
/// Copied on every push. A record always carries all fields; there are no
/// deltas on this channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateRecord {
    /// Uniform object scale
    pub scale: f32,
    /// Whether the target object renders
    pub visible: bool,
    /// Spotlight tint
    pub spotlight: SpotlightPreset,
    /// Texture to bind, `None` clears the binding
    pub texture: Option<TextureHandle>,
}

impl StateRecord {
    /// Width of the referenced texture, 0 when there is none.
    pub fn texture_width(&self) -> u32 {
        self.texture.map_or(0, |t| t.width())
    }

    /// Height of the referenced texture, 0 when there is none.
    pub fn texture_height(&self) -> u32 {
        self.texture.map_or(0, |t| t.height())
    }
}

impl Default for StateRecord {
    /// Applied by the engine before the first push arrives.
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            visible: true,
            spotlight: SpotlightPreset::Neutral,
            texture: None,
        }
    }
}
