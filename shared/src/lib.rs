//! Shared types for the native state channel.
//!
//! Everything both sides of the channel must agree on lives here: the
//! [`StateRecord`] value pushed by the host shell, the closed preset sets the
//! UI offers, and the [`NativeState`] C-ABI layout.

pub mod constants;
pub mod native;
pub mod presets;
pub mod record;

pub use constants::{DEFAULT_SCALE, MAX_TEXTURE_DIMENSION, SCALE_RANGE};
pub use native::{NativeState, NativeStateCallback, NativeStateError};
pub use presets::{SpotlightPreset, TextureChoice, UnknownPreset};
pub use record::{StateRecord, TextureHandle};
