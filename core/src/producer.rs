//! Host-side state producer
//!
//! Owns the presentation parameters the host UI exposes and pushes a full
//! snapshot through the bridge whenever one of them changes.

use std::sync::{Arc, Mutex, MutexGuard};

use nativestate_shared::{
    DEFAULT_SCALE, SpotlightPreset, StateRecord, TextureChoice, TextureHandle,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bridge::{Registration, SinkRegistry, StateBridge, StateSink};

/// The UI-observable fields, as selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationState {
    pub scale: f32,
    pub visible: bool,
    pub texture: TextureChoice,
    pub spotlight: SpotlightPreset,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            visible: true,
            texture: TextureChoice::None,
            spotlight: SpotlightPreset::Neutral,
        }
    }
}

/// Resolves preloaded asset names to texture handles.
pub trait TextureLookup: Send + Sync {
    /// `None` if the asset is unknown or has not loaded.
    fn texture_handle(&self, asset: &str) -> Option<TextureHandle>;
}

/// Lookup with no textures, every selection maps to "no texture".
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTextures;

impl TextureLookup for NoTextures {
    fn texture_handle(&self, _asset: &str) -> Option<TextureHandle> {
        None
    }
}

/// Producer side of the channel.
///
/// Field changes and registration may arrive from different threads; the
/// field lock is held while pushing so records reach the consumer in the
/// order the fields changed.
pub struct StateProducer {
    bridge: Arc<StateBridge>,
    textures: Arc<dyn TextureLookup>,
    fields: Mutex<PresentationState>,
}

impl StateProducer {
    pub fn new(bridge: Arc<StateBridge>, textures: Arc<dyn TextureLookup>) -> Self {
        Self::with_state(bridge, textures, PresentationState::default())
    }

    pub fn with_state(
        bridge: Arc<StateBridge>,
        textures: Arc<dyn TextureLookup>,
        initial: PresentationState,
    ) -> Self {
        Self {
            bridge,
            textures,
            fields: Mutex::new(initial),
        }
    }

    pub fn bridge(&self) -> &Arc<StateBridge> {
        &self.bridge
    }

    /// Current field values.
    pub fn fields(&self) -> PresentationState {
        *self.lock()
    }

    pub fn set_scale(&self, scale: f32) {
        self.update(|fields| fields.scale = scale);
    }

    pub fn set_visible(&self, visible: bool) {
        self.update(|fields| fields.visible = visible);
    }

    pub fn set_texture(&self, texture: TextureChoice) {
        self.update(|fields| fields.texture = texture);
    }

    pub fn set_spotlight(&self, spotlight: SpotlightPreset) {
        self.update(|fields| fields.spotlight = spotlight);
    }

    /// Replace every field at once, pushing a single snapshot if anything changed.
    pub fn set_all(&self, state: PresentationState) {
        self.update(|fields| *fields = state);
    }

    /// Build a record from the current fields.
    pub fn snapshot(&self) -> StateRecord {
        self.build(&self.lock())
    }

    /// Push the current snapshot unconditionally.
    ///
    /// Returns `false` if no consumer is registered yet.
    pub fn sync(&self) -> bool {
        let fields = self.lock();
        self.bridge.push(self.build(&fields))
    }

    /// Registration entry point for the consumer runtime.
    ///
    /// An accepted registration is followed immediately by a push of the
    /// current snapshot, so the consumer never waits for the next UI change.
    pub fn register(&self, sink: Arc<dyn StateSink>) -> Registration {
        let registration = self.bridge.register(sink);
        if registration.is_accepted() {
            debug!("Consumer registered, syncing current state");
            self.sync();
        }
        registration
    }

    fn update(&self, change: impl FnOnce(&mut PresentationState)) {
        let mut fields = self.lock();
        let before = *fields;
        change(&mut *fields);
        if *fields == before {
            return;
        }
        let record = self.build(&fields);
        trace!(?record, "Presentation state changed");
        self.bridge.push(record);
    }

    fn build(&self, fields: &PresentationState) -> StateRecord {
        StateRecord {
            scale: fields.scale,
            visible: fields.visible,
            spotlight: fields.spotlight,
            texture: fields
                .texture
                .asset_name()
                .and_then(|asset| self.textures.texture_handle(asset)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PresentationState> {
        self.fields.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SinkRegistry for StateProducer {
    fn register(&self, sink: Arc<dyn StateSink>) -> Registration {
        StateProducer::register(self, sink)
    }
}
