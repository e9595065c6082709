//! Engine-side runtime loop
//!
//! The consumer lives in its own scheduling domain: a dedicated thread that
//! registers a [`StateConsumer`] at startup and applies the latest record to
//! its scene once per tick.
//!
//! ```text
//! Host Thread                      Engine Thread
//!     │                                 │
//!     │                          [Register consumer]
//!     │◄────────(registry)──────────────┤
//! [Sync now]───(push)──────────────►[Slot]
//!     │                                 │
//! [UI change]──(push)──────────────►[Slot]
//!     │                          [Tick: apply slot → scene]
//!     │                          [Tick: apply slot → scene]
//! ```

mod config;
mod embedded;

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, warn};

use crate::bridge::{Registration, SinkRegistry};
use crate::consumer::{SceneTarget, StateConsumer};

pub use config::RuntimeConfig;
pub use embedded::ThreadedEngine;

const REGISTRATION_PENDING: u8 = 0;
const REGISTRATION_ACCEPTED: u8 = 1;
const REGISTRATION_IGNORED: u8 = 2;

/// State shared between the engine thread and its handle
#[derive(Default)]
struct EngineShared {
    stop: AtomicBool,
    frames: AtomicU64,
    registration: AtomicU8,
}

/// Spawns the engine loop.
pub struct EngineThread;

impl EngineThread {
    /// Spawn the engine thread with a fresh consumer.
    ///
    /// The scene is built on the engine thread by `make_scene`, so it does not
    /// need to be `Send`. Registration with `registry` happens on the engine
    /// thread after the scene exists, independently of the caller.
    pub fn spawn<S, F>(
        registry: Arc<dyn SinkRegistry>,
        config: RuntimeConfig,
        make_scene: F,
    ) -> std::io::Result<EngineHandle>
    where
        S: SceneTarget + 'static,
        F: FnOnce() -> S + Send + 'static,
    {
        Self::spawn_with(Arc::new(StateConsumer::new()), registry, config, make_scene)
    }

    /// Spawn the engine thread around an existing consumer.
    ///
    /// A restarted engine passes the consumer it registered before, so the
    /// registration is accepted again and the latest record carries over.
    pub fn spawn_with<S, F>(
        consumer: Arc<StateConsumer>,
        registry: Arc<dyn SinkRegistry>,
        config: RuntimeConfig,
        make_scene: F,
    ) -> std::io::Result<EngineHandle>
    where
        S: SceneTarget + 'static,
        F: FnOnce() -> S + Send + 'static,
    {
        let shared = Arc::new(EngineShared::default());

        let thread_consumer = consumer.clone();
        let thread_shared = shared.clone();
        let handle = thread::Builder::new()
            .name("engine".into())
            .spawn(move || {
                let mut scene = make_scene();

                let registration = registry.register(thread_consumer.clone());
                thread_shared.registration.store(
                    match registration {
                        Registration::Accepted => REGISTRATION_ACCEPTED,
                        Registration::Ignored => REGISTRATION_IGNORED,
                    },
                    Ordering::Release,
                );

                run(&config, &thread_shared, &thread_consumer, &mut scene);
            })?;

        Ok(EngineHandle {
            shared,
            consumer,
            handle: Some(handle),
        })
    }
}

/// Fixed-rate tick loop, runs until `stop` is set
fn run<S: SceneTarget>(
    config: &RuntimeConfig,
    shared: &EngineShared,
    consumer: &StateConsumer,
    scene: &mut S,
) {
    debug!(tick_rate = config.tick_rate, "Engine loop started");
    let tick = config.tick_duration();
    let mut next = Instant::now();

    while !shared.stop.load(Ordering::Acquire) {
        let tick_start = Instant::now();
        consumer.apply(scene);
        shared.frames.fetch_add(1, Ordering::Release);

        let tick_time = tick_start.elapsed();
        if tick_time > config.frame_budget {
            warn!(
                "Tick took {:?}, exceeds budget of {:?}",
                tick_time, config.frame_budget
            );
        }

        next += tick;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        } else {
            // Behind schedule: resume from now instead of bursting to catch up
            next = now;
        }
    }

    debug!("Engine loop finished");
}

/// Handle to a running engine thread
///
/// Dropping the handle stops the loop and joins the thread.
pub struct EngineHandle {
    shared: Arc<EngineShared>,
    consumer: Arc<StateConsumer>,
    handle: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// The engine's consumer, for inspection from the host side.
    pub fn consumer(&self) -> &Arc<StateConsumer> {
        &self.consumer
    }

    /// Ticks executed so far.
    pub fn frames(&self) -> u64 {
        self.shared.frames.load(Ordering::Acquire)
    }

    /// Outcome of the engine's registration, `None` while still pending.
    pub fn registration(&self) -> Option<Registration> {
        match self.shared.registration.load(Ordering::Acquire) {
            REGISTRATION_PENDING => None,
            REGISTRATION_ACCEPTED => Some(Registration::Accepted),
            _ => Some(Registration::Ignored),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.shared.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("Engine thread panicked");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
