//! Headless scene that logs what a renderer would change

use glam::Vec3;
use nativestate_core::{ExternalTexture, SceneTarget};
use tracing::info;

/// Scene without a renderer.
///
/// The engine applies the full record every tick; only values that differ
/// from the previous tick are logged.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    visible: Option<bool>,
    scale: Option<Vec3>,
    light_color: Option<Vec3>,
    texture: Option<Option<ExternalTexture>>,
}

impl SceneTarget for HeadlessScene {
    fn set_visible(&mut self, visible: bool) {
        if self.visible.replace(visible) != Some(visible) {
            info!(visible, "scene: object visibility");
        }
    }

    fn set_scale(&mut self, scale: Vec3) {
        if self.scale.replace(scale) != Some(scale) {
            info!(scale = scale.x, "scene: object scale");
        }
    }

    fn set_light_color(&mut self, color: Vec3) {
        if self.light_color.replace(color) != Some(color) {
            info!(r = color.x, g = color.y, b = color.z, "scene: spotlight colour");
        }
    }

    fn bind_texture(&mut self, texture: Option<ExternalTexture>) {
        if self.texture.replace(texture) == Some(texture) {
            return;
        }
        match texture {
            Some(t) => info!(
                id = t.handle.id(),
                width = t.width,
                height = t.height,
                "scene: texture bound"
            ),
            None => info!("scene: default material"),
        }
    }
}
