//! NativeState Core - state channel between a host UI shell and an embedded engine
//!
//! The host shell owns a handful of presentation parameters; the engine
//! renders a scene from them. This crate carries those parameters across as
//! whole-record snapshots.
//!
//! # Architecture
//!
//! - [`StateBridge`] - Registry holding the single consumer sink
//! - [`StateProducer`] - Host-side fields, pushed as a full record on change
//! - [`StateConsumer`] - Engine-side latest-record slot, applied once per tick
//! - [`AssetPreloader`] - Parallel texture preload producing [`TextureHandle`]s
//! - [`HostLifecycle`] - `Unloaded → Loading → Ready` around the engine
//! - [`EngineThread`] - The engine's own tick loop

pub mod bridge;
pub mod config;
pub mod consumer;
pub mod error;
pub mod ffi;
#[cfg(test)]
mod integration;
pub mod lifecycle;
pub mod preloader;
pub mod producer;
pub mod runtime;
#[cfg(test)]
pub mod test_utils;

pub use bridge::{Registration, SinkRegistry, StateBridge, StateSink};
pub use config::Config;
pub use consumer::{ExternalTexture, SceneTarget, StateConsumer, TextureFormat, apply_record};
pub use error::{ConfigError, LifecycleError, PreloadError};
pub use ffi::{CallbackSink, register_callback};
pub use lifecycle::{EngineRuntime, HostLifecycle, LifecycleState};
pub use preloader::{
    AssetEntry, AssetPreloader, DecodedTexture, ImageFileSource, PreloadReport, ResidentTexture,
    TextureSource,
};
pub use producer::{NoTextures, PresentationState, StateProducer, TextureLookup};
pub use runtime::{EngineHandle, EngineThread, RuntimeConfig, ThreadedEngine};

// Re-export shared types for convenience
pub use nativestate_shared::{
    NativeState, NativeStateCallback, NativeStateError, SpotlightPreset, StateRecord,
    TextureChoice, TextureHandle,
};
