//! C-ABI form of the state record
//!
//! This is the one place where bit-exactness matters: a C or Objective-C
//! caller on the other side of the boundary declares the same struct.
//!
//! ```c
//! struct NativeState {
//!     float scale;
//!     uint8_t visible;
//!     char spotlight[8];      // NUL-terminated "#rrggbb"
//!     uint8_t _pad[3];
//!     uintptr_t texture;      // 0 = no texture
//!     int32_t texture_width;
//!     int32_t texture_height;
//! };
//! typedef void (*NativeStateCallback)(struct NativeState next_state);
//! ```
//!
//! `Pod` cannot be derived for a struct with implicit padding, so any field
//! change that introduces padding fails to compile, and the `const`
//! assertions below pin the size and every offset.

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

use crate::constants::SPOTLIGHT_HEX_LEN;
use crate::presets::SpotlightPreset;
use crate::record::{StateRecord, TextureHandle};

/// State record as laid out on the C boundary.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct NativeState {
    pub scale: f32,
    /// 0 = hidden, 1 = visible
    pub visible: u8,
    /// NUL-terminated HTML colour code
    pub spotlight: [u8; SPOTLIGHT_HEX_LEN],
    pub _pad: [u8; 3],
    /// Texture resource id, 0 = no texture
    pub texture: usize,
    pub texture_width: i32,
    pub texture_height: i32,
}

const _: () = assert!(size_of::<NativeState>() == 24 + size_of::<usize>());
const _: () = assert!(offset_of!(NativeState, scale) == 0);
const _: () = assert!(offset_of!(NativeState, visible) == 4);
const _: () = assert!(offset_of!(NativeState, spotlight) == 5);
const _: () = assert!(offset_of!(NativeState, texture) == 16);
const _: () = assert!(offset_of!(NativeState, texture_width) == 16 + size_of::<usize>());
const _: () = assert!(offset_of!(NativeState, texture_height) == 20 + size_of::<usize>());

/// Callback signature a C-side consumer registers.
pub type NativeStateCallback = extern "C" fn(NativeState);

/// Reasons a [`NativeState`] cannot be decoded into a [`StateRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NativeStateError {
    #[error("visible flag must be 0 or 1, got {0}")]
    InvalidVisible(u8),
    #[error("spotlight colour is not NUL-terminated")]
    UnterminatedSpotlight,
    #[error("unknown spotlight colour '{0}'")]
    UnknownSpotlight(String),
    #[error("texture {texture:#x} has inconsistent dimensions {width}x{height}")]
    InconsistentTexture {
        texture: usize,
        width: i32,
        height: i32,
    },
}

impl NativeState {
    /// Spotlight colour code up to the terminating NUL.
    pub fn spotlight_str(&self) -> Result<&str, NativeStateError> {
        let end = self
            .spotlight
            .iter()
            .position(|&b| b == 0)
            .ok_or(NativeStateError::UnterminatedSpotlight)?;
        std::str::from_utf8(&self.spotlight[..end]).map_err(|_| {
            NativeStateError::UnknownSpotlight(
                String::from_utf8_lossy(&self.spotlight[..end]).into_owned(),
            )
        })
    }
}

impl From<&StateRecord> for NativeState {
    fn from(record: &StateRecord) -> Self {
        let mut spotlight = [0u8; SPOTLIGHT_HEX_LEN];
        let hex = record.spotlight.hex().as_bytes();
        spotlight[..hex.len()].copy_from_slice(hex);

        // Dimensions are bounded by MAX_TEXTURE_DIMENSION, so they fit in i32
        Self {
            scale: record.scale,
            visible: record.visible as u8,
            spotlight,
            _pad: [0; 3],
            texture: record.texture.map_or(0, |t| t.id() as usize),
            texture_width: record.texture_width() as i32,
            texture_height: record.texture_height() as i32,
        }
    }
}

impl From<StateRecord> for NativeState {
    fn from(record: StateRecord) -> Self {
        Self::from(&record)
    }
}

impl TryFrom<NativeState> for StateRecord {
    type Error = NativeStateError;

    fn try_from(state: NativeState) -> Result<Self, Self::Error> {
        let visible = match state.visible {
            0 => false,
            1 => true,
            other => return Err(NativeStateError::InvalidVisible(other)),
        };

        let hex = state.spotlight_str()?;
        let spotlight = SpotlightPreset::from_hex(hex)
            .ok_or_else(|| NativeStateError::UnknownSpotlight(hex.to_string()))?;

        let inconsistent = || NativeStateError::InconsistentTexture {
            texture: state.texture,
            width: state.texture_width,
            height: state.texture_height,
        };
        let texture = if state.texture == 0 {
            if state.texture_width != 0 || state.texture_height != 0 {
                return Err(inconsistent());
            }
            None
        } else {
            let id = u32::try_from(state.texture).map_err(|_| inconsistent())?;
            let width = u32::try_from(state.texture_width).map_err(|_| inconsistent())?;
            let height = u32::try_from(state.texture_height).map_err(|_| inconsistent())?;
            Some(TextureHandle::new(id, width, height).ok_or_else(inconsistent)?)
        };

        Ok(Self {
            scale: state.scale,
            visible,
            spotlight,
            texture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured() -> StateRecord {
        StateRecord {
            scale: 2.5,
            visible: false,
            spotlight: SpotlightPreset::Warm,
            texture: TextureHandle::new(2, 1024, 512),
        }
    }

    #[test]
    fn encodes_fields_in_wire_order() {
        let native = NativeState::from(textured());
        let bytes = bytemuck::bytes_of(&native);

        assert_eq!(bytes.len(), size_of::<NativeState>());
        assert_eq!(&bytes[0..4], &2.5f32.to_ne_bytes());
        assert_eq!(bytes[4], 0);
        assert_eq!(&bytes[5..13], b"#ff9100\0");
        assert_eq!(&bytes[13..16], &[0, 0, 0]);
        assert_eq!(native.texture, 2);
        assert_eq!(native.texture_width, 1024);
        assert_eq!(native.texture_height, 512);
    }

    #[test]
    fn null_texture_has_zero_dimensions() {
        let native = NativeState::from(StateRecord::default());
        assert_eq!(native.texture, 0);
        assert_eq!((native.texture_width, native.texture_height), (0, 0));
        assert_eq!(native.spotlight_str(), Ok("#ffffff"));
        assert_eq!(native.visible, 1);
    }

    #[test]
    fn decodes_what_it_encodes() {
        for record in [StateRecord::default(), textured()] {
            let decoded = StateRecord::try_from(NativeState::from(record)).unwrap();
            assert_eq!(decoded, record);
        }
    }

    #[test]
    fn rejects_dimensions_without_texture() {
        let mut native = NativeState::from(StateRecord::default());
        native.texture_width = 16;
        assert!(matches!(
            StateRecord::try_from(native),
            Err(NativeStateError::InconsistentTexture { width: 16, .. })
        ));
    }

    #[test]
    fn rejects_texture_without_dimensions() {
        let mut native = NativeState::from(textured());
        native.texture_height = 0;
        assert!(matches!(
            StateRecord::try_from(native),
            Err(NativeStateError::InconsistentTexture { texture: 2, .. })
        ));
    }

    #[test]
    fn rejects_malformed_spotlight_and_visibility() {
        let mut native = NativeState::from(StateRecord::default());
        native.visible = 7;
        assert_eq!(
            StateRecord::try_from(native),
            Err(NativeStateError::InvalidVisible(7))
        );

        let mut native = NativeState::from(StateRecord::default());
        native.spotlight = *b"#abcdef\0";
        assert_eq!(
            StateRecord::try_from(native),
            Err(NativeStateError::UnknownSpotlight("#abcdef".into()))
        );

        native.spotlight = *b"#abcdefg";
        assert_eq!(
            StateRecord::try_from(native),
            Err(NativeStateError::UnterminatedSpotlight)
        );
    }

    #[test]
    fn zeroed_state_is_not_a_valid_record() {
        // An all-zero spotlight is an empty string, which is not a preset
        assert_eq!(
            StateRecord::try_from(NativeState::zeroed()),
            Err(NativeStateError::UnknownSpotlight(String::new()))
        );
    }
}
