//! [`EngineRuntime`] backed by an [`EngineThread`]

use std::sync::Arc;

use anyhow::{Context, bail};
use tracing::debug;

use super::{EngineHandle, EngineThread, RuntimeConfig};
use crate::bridge::SinkRegistry;
use crate::consumer::{SceneTarget, StateConsumer};
use crate::lifecycle::EngineRuntime;

/// Engine that runs on its own thread while loaded.
///
/// The consumer is created once and reused across restarts, so the engine
/// re-registers the same sink and resumes from the latest record.
pub struct ThreadedEngine<S> {
    registry: Arc<dyn SinkRegistry>,
    config: RuntimeConfig,
    consumer: Arc<StateConsumer>,
    make_scene: Arc<dyn Fn() -> S + Send + Sync>,
    handle: Option<EngineHandle>,
}

impl<S: SceneTarget + 'static> ThreadedEngine<S> {
    pub fn new(
        registry: Arc<dyn SinkRegistry>,
        config: RuntimeConfig,
        make_scene: impl Fn() -> S + Send + Sync + 'static,
    ) -> Self {
        Self {
            registry,
            config,
            consumer: Arc::new(StateConsumer::new()),
            make_scene: Arc::new(make_scene),
            handle: None,
        }
    }

    pub fn consumer(&self) -> &Arc<StateConsumer> {
        &self.consumer
    }

    /// The running engine thread, if loaded.
    pub fn handle(&self) -> Option<&EngineHandle> {
        self.handle.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(EngineHandle::is_alive)
    }
}

impl<S: SceneTarget + 'static> EngineRuntime for ThreadedEngine<S> {
    fn run_embedded(&mut self) -> anyhow::Result<()> {
        if self.handle.is_some() {
            bail!("engine is already running");
        }
        let make_scene = self.make_scene.clone();
        let handle = EngineThread::spawn_with(
            self.consumer.clone(),
            self.registry.clone(),
            self.config.clone(),
            move || make_scene(),
        )
        .context("failed to spawn engine thread")?;
        self.handle = Some(handle);
        Ok(())
    }

    fn unload(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.shutdown();
            debug!("Engine thread stopped");
        }
    }
}
