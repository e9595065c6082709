//! Centralized constants for the native state channel.
//!
//! Single source of truth for values both sides of the channel must agree on.

use std::ops::RangeInclusive;

/// Scale applied when nothing has been pushed yet.
pub const DEFAULT_SCALE: f32 = 1.0;

/// Range offered by the host UI's scale slider.
///
/// The channel forwards whatever the producer sets; this range is only
/// enforced by UI front-ends.
pub const SCALE_RANGE: RangeInclusive<f32> = 1.0..=3.0;

/// Largest texture edge accepted for a [`TextureHandle`](crate::TextureHandle).
///
/// Matches the maximum 2D texture size of the mobile GPUs the engine targets
/// and keeps dimensions representable as C `int` on the wire.
pub const MAX_TEXTURE_DIMENSION: u32 = 16384;

/// Length of the NUL-terminated `#rrggbb` spotlight string on the wire.
pub const SPOTLIGHT_HEX_LEN: usize = 8;

/// Asset name backing [`TextureChoice::Marble`](crate::TextureChoice::Marble).
pub const MARBLE_ASSET: &str = "marble";

/// Asset name backing [`TextureChoice::Checkerboard`](crate::TextureChoice::Checkerboard).
pub const CHECKERBOARD_ASSET: &str = "checkerboard";
