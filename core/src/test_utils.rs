//! Shared test utilities for integration and unit tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec3;
use hashbrown::HashMap;
use nativestate_shared::{StateRecord, TextureHandle};

use crate::bridge::StateSink;
use crate::consumer::{ExternalTexture, SceneTarget};
use crate::error::PreloadError;
use crate::preloader::{AssetEntry, DecodedTexture, TextureSource};
use crate::producer::TextureLookup;

// ============================================================================
// Sinks
// ============================================================================

/// Sink that records every record it receives
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<StateRecord>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<StateRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl StateSink for RecordingSink {
    fn on_state_changed(&self, record: StateRecord) {
        self.records.lock().unwrap().push(record);
    }
}

// ============================================================================
// Scene
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    Visible(bool),
    Scale(Vec3),
    LightColor(Vec3),
    Texture(Option<ExternalTexture>),
}

/// Scene that keeps its current values plus a log of every call
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub visible: bool,
    pub scale: Vec3,
    pub light_color: Vec3,
    pub texture: Option<ExternalTexture>,
    pub events: Vec<SceneEvent>,
}

impl SceneTarget for RecordingScene {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.events.push(SceneEvent::Visible(visible));
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.events.push(SceneEvent::Scale(scale));
    }

    fn set_light_color(&mut self, color: Vec3) {
        self.light_color = color;
        self.events.push(SceneEvent::LightColor(color));
    }

    fn bind_texture(&mut self, texture: Option<ExternalTexture>) {
        self.texture = texture;
        self.events.push(SceneEvent::Texture(texture));
    }
}

/// Scene shared with the test thread while an engine thread drives it
#[derive(Clone, Default)]
pub struct SharedScene(pub Arc<Mutex<RecordingScene>>);

impl SharedScene {
    pub fn snapshot(&self) -> (bool, Vec3, Vec3, Option<ExternalTexture>) {
        let scene = self.0.lock().unwrap();
        (scene.visible, scene.scale, scene.light_color, scene.texture)
    }
}

impl SceneTarget for SharedScene {
    fn set_visible(&mut self, visible: bool) {
        self.0.lock().unwrap().set_visible(visible);
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.0.lock().unwrap().set_scale(scale);
    }

    fn set_light_color(&mut self, color: Vec3) {
        self.0.lock().unwrap().set_light_color(color);
    }

    fn bind_texture(&mut self, texture: Option<ExternalTexture>) {
        self.0.lock().unwrap().bind_texture(texture);
    }
}

// ============================================================================
// Textures
// ============================================================================

/// Lookup backed by a fixed map
pub struct FixedTextures(HashMap<String, TextureHandle>);

impl FixedTextures {
    pub fn new<const N: usize>(entries: [(&str, TextureHandle); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(name, handle)| (name.to_string(), handle))
                .collect(),
        )
    }
}

impl TextureLookup for FixedTextures {
    fn texture_handle(&self, asset: &str) -> Option<TextureHandle> {
        self.0.get(asset).copied()
    }
}

/// Texture source with canned results, optional per-asset delays, and load counters
#[derive(Default)]
pub struct ScriptedSource {
    sizes: HashMap<String, (u32, u32)>,
    delays: HashMap<String, Duration>,
    loads: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
    /// Set once the slowest scripted load has finished
    pub slow_finished: Arc<AtomicBool>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asset that loads successfully with the given dimensions
    pub fn with_texture(mut self, name: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(name.to_string(), (width, height));
        self
    }

    /// Delay the named asset's load
    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn load_count(&self, name: &str) -> usize {
        self.loads.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub fn total_loads(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl TextureSource for ScriptedSource {
    fn load(&self, entry: &AssetEntry) -> Result<DecodedTexture, PreloadError> {
        *self
            .loads
            .lock()
            .unwrap()
            .entry(entry.name.clone())
            .or_insert(0) += 1;
        self.total.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&entry.name) {
            thread::sleep(*delay);
            self.slow_finished.store(true, Ordering::SeqCst);
        }

        let Some(&(width, height)) = self.sizes.get(&entry.name) else {
            return Err(PreloadError::NotFound {
                name: entry.name.clone(),
                path: entry.path.clone(),
            });
        };
        Ok(DecodedTexture {
            width,
            height,
            pixels: vec![0x80; width as usize * height as usize * 4],
        })
    }
}

/// The two assets the host UI offers
pub fn demo_entries() -> Vec<AssetEntry> {
    vec![
        AssetEntry::new("marble", "marble.jpg"),
        AssetEntry::new("checkerboard", "checkerboard.png"),
    ]
}

// ============================================================================
// Timing
// ============================================================================

/// Poll `condition` until it holds or `timeout` elapses
pub fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    condition()
}
