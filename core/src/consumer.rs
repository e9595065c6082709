//! Engine-side state consumer
//!
//! Holds the most recent record received through the bridge and applies it
//! to the scene once per engine tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use glam::Vec3;
use nativestate_shared::{StateRecord, TextureHandle};
use tracing::trace;

use crate::bridge::StateSink;

/// Pixel layout of textures handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFormat {
    #[default]
    Bgra8,
}

/// Render-usable wrapper around an externally owned texture.
///
/// The engine binds it by id; the pixels stay with the asset preloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalTexture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

impl ExternalTexture {
    pub fn from_handle(handle: TextureHandle) -> Self {
        Self {
            handle,
            width: handle.width(),
            height: handle.height(),
            format: TextureFormat::Bgra8,
        }
    }
}

/// The scene objects a record drives.
pub trait SceneTarget {
    /// Toggle rendering of the target object.
    fn set_visible(&mut self, visible: bool);
    /// Set the target object's local scale.
    fn set_scale(&mut self, scale: Vec3);
    /// Set the spotlight colour (linear RGB, 0..1).
    fn set_light_color(&mut self, color: Vec3);
    /// Bind a texture to the target's material, or clear it with `None`.
    fn bind_texture(&mut self, texture: Option<ExternalTexture>);
}

/// Apply every field of `record` to `scene`.
pub fn apply_record<S: SceneTarget + ?Sized>(record: &StateRecord, scene: &mut S) {
    scene.set_visible(record.visible);
    scene.set_scale(Vec3::splat(record.scale));
    scene.set_light_color(record.spotlight.color());
    scene.bind_texture(record.texture.map(ExternalTexture::from_handle));
}

/// Consumer side of the channel.
///
/// The latest record is swapped as one unit under a lock, so a tick never
/// observes a half-written record.
#[derive(Debug, Default)]
pub struct StateConsumer {
    latest: Mutex<StateRecord>,
    received: AtomicU64,
}

impl StateConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent record, or the default record before the first push.
    pub fn current(&self) -> StateRecord {
        *self.lock()
    }

    /// Number of records received so far.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Acquire)
    }

    /// Apply the current record to `scene`. Called once per tick.
    pub fn apply<S: SceneTarget + ?Sized>(&self, scene: &mut S) -> StateRecord {
        let record = self.current();
        apply_record(&record, scene);
        record
    }

    fn lock(&self) -> MutexGuard<'_, StateRecord> {
        self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StateSink for StateConsumer {
    fn on_state_changed(&self, record: StateRecord) {
        *self.lock() = record;
        self.received.fetch_add(1, Ordering::Release);
        trace!(?record, "State record received");
    }
}
