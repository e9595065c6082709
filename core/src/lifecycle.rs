//! Host-side engine lifecycle
//!
//! `Unloaded → Loading → Ready`, plus `stop` back to `Unloaded`. The host UI
//! polls [`HostLifecycle::state`] to decide what to show; `start` blocks and
//! belongs off any UI-critical thread.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::error::LifecycleError;
use crate::preloader::{AssetPreloader, PreloadReport};

/// Lifecycle state visible to the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Unloaded,
    Loading,
    Ready,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Ready => "ready",
        })
    }
}

/// The embedded engine, as seen by the host.
pub trait EngineRuntime {
    /// Construct the engine view and start the engine. Blocking.
    fn run_embedded(&mut self) -> anyhow::Result<()>;

    /// Tear the engine down. Blocking.
    fn unload(&mut self);
}

/// Drives the host lifecycle around an engine and the texture preload.
pub struct HostLifecycle {
    preloader: Arc<AssetPreloader>,
    state: Mutex<LifecycleState>,
}

impl HostLifecycle {
    pub fn new(preloader: Arc<AssetPreloader>) -> Self {
        Self {
            preloader,
            state: Mutex::new(LifecycleState::Unloaded),
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.lock()
    }

    /// Whether the engine view may be shown.
    pub fn view_available(&self) -> bool {
        self.state() == LifecycleState::Ready
    }

    pub fn preloader(&self) -> &Arc<AssetPreloader> {
        &self.preloader
    }

    /// Preload textures, then start the engine.
    ///
    /// `Ready` is entered only after every texture load has resolved and the
    /// engine has started. If the engine fails to start the lifecycle returns
    /// to `Unloaded`; textures that did load stay loaded.
    pub fn start(&self, engine: &mut dyn EngineRuntime) -> Result<PreloadReport, LifecycleError> {
        self.transition(LifecycleState::Unloaded, LifecycleState::Loading)
            .map_err(LifecycleError::NotUnloaded)?;
        info!("Starting engine");

        let report = self.preloader.preload();

        if let Err(e) = engine.run_embedded() {
            warn!("Engine failed to start: {e:#}");
            self.set(LifecycleState::Unloaded);
            return Err(LifecycleError::EngineStart(format!("{e:#}")));
        }

        self.set(LifecycleState::Ready);
        debug!("Engine ready");
        Ok(report)
    }

    /// Unload the engine.
    ///
    /// Preloaded textures are kept so handles stay valid across restarts.
    pub fn stop(&self, engine: &mut dyn EngineRuntime) -> Result<(), LifecycleError> {
        self.transition(LifecycleState::Ready, LifecycleState::Unloaded)
            .map_err(LifecycleError::NotReady)?;
        engine.unload();
        info!("Engine unloaded");
        Ok(())
    }

    /// Move from `from` to `to`, or return the current state if it isn't `from`.
    fn transition(&self, from: LifecycleState, to: LifecycleState) -> Result<(), LifecycleState> {
        let mut state = self.lock();
        if *state != from {
            return Err(*state);
        }
        *state = to;
        Ok(())
    }

    fn set(&self, to: LifecycleState) {
        *self.lock() = to;
    }

    fn lock(&self) -> MutexGuard<'_, LifecycleState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
