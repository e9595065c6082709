//! Closed preset sets selectable from the host UI.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{CHECKERBOARD_ASSET, MARBLE_ASSET};

/// Spotlight colour temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotlightPreset {
    #[default]
    Neutral,
    Warm,
    Cool,
}

impl SpotlightPreset {
    pub const ALL: [SpotlightPreset; 3] = [Self::Neutral, Self::Warm, Self::Cool];

    /// HTML colour code sent to the engine.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Neutral => "#ffffff",
            Self::Warm => "#ff9100",
            Self::Cool => "#7dcfff",
        }
    }

    /// Look up a preset by its HTML colour code (case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.hex().eq_ignore_ascii_case(hex))
    }

    /// Light colour as linear 0..1 RGB.
    pub fn color(self) -> Vec3 {
        let rgb = self.rgb();
        Vec3::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0
    }

    /// Light colour as 8-bit RGB.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Neutral => [0xff, 0xff, 0xff],
            Self::Warm => [0xff, 0x91, 0x00],
            Self::Cool => [0x7d, 0xcf, 0xff],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Warm => "warm",
            Self::Cool => "cool",
        }
    }
}

impl fmt::Display for SpotlightPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a preset name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownPreset {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for SpotlightPreset {
    type Err = UnknownPreset;

    /// Accepts either the preset name or its colour code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .or_else(|| Self::from_hex(s))
            .ok_or_else(|| UnknownPreset {
                kind: "spotlight",
                value: s.to_string(),
            })
    }
}

/// Texture selection offered by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureChoice {
    /// Engine default material, no texture bound.
    #[default]
    None,
    Marble,
    Checkerboard,
}

impl TextureChoice {
    pub const ALL: [TextureChoice; 3] = [Self::None, Self::Marble, Self::Checkerboard];

    /// Name of the preloaded asset backing this choice, if any.
    pub const fn asset_name(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Marble => Some(MARBLE_ASSET),
            Self::Checkerboard => Some(CHECKERBOARD_ASSET),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Marble => "marble",
            Self::Checkerboard => "checkerboard",
        }
    }
}

impl fmt::Display for TextureChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextureChoice {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPreset {
                kind: "texture",
                value: s.to_string(),
            })
    }
}
