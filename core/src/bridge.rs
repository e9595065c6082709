//! Single-slot handoff between the host shell and the engine runtime
//!
//! The bridge is a passthrough: it stores the consumer's sink once and
//! forwards every pushed record to it synchronously. It never stores records,
//! so a push made before any registration is simply lost.

use std::fmt;
use std::sync::{Arc, OnceLock};

use nativestate_shared::StateRecord;
use tracing::{debug, trace, warn};

/// Receiver of state records, implemented by whichever side consumes them.
///
/// Called on the pushing thread. Implementations must not call back into the
/// producer that pushed the record.
pub trait StateSink: Send + Sync {
    fn on_state_changed(&self, record: StateRecord);
}

impl<F> StateSink for F
where
    F: Fn(StateRecord) + Send + Sync,
{
    fn on_state_changed(&self, record: StateRecord) {
        self(record)
    }
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The sink now receives every push.
    Accepted,
    /// A sink was already registered; this one will never be called.
    Ignored,
}

impl Registration {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// Anything a consumer runtime can register its sink with.
pub trait SinkRegistry: Send + Sync {
    fn register(&self, sink: Arc<dyn StateSink>) -> Registration;
}

/// Process-lifetime registration slot, constructed once per consumer runtime.
///
/// The first registration wins. A consumer runtime that restarts keeps its
/// sink and registers that same sink again, which is accepted.
#[derive(Default)]
pub struct StateBridge {
    sink: OnceLock<Arc<dyn StateSink>>,
}

impl StateBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `sink` if no sink is registered yet.
    ///
    /// Registering the already stored sink again is accepted and changes
    /// nothing; any other sink is ignored.
    pub fn register(&self, sink: Arc<dyn StateSink>) -> Registration {
        let current = self.sink.get_or_init(|| {
            debug!("State sink registered");
            sink.clone()
        });
        if Arc::ptr_eq(current, &sink) {
            Registration::Accepted
        } else {
            warn!("State sink already registered, ignoring re-registration");
            Registration::Ignored
        }
    }

    /// Forward `record` to the registered sink.
    ///
    /// Returns `false` when nothing is registered and the record was dropped.
    pub fn push(&self, record: StateRecord) -> bool {
        match self.sink.get() {
            Some(sink) => {
                sink.on_state_changed(record);
                true
            }
            None => {
                trace!("No state sink registered, dropping push");
                false
            }
        }
    }

    pub fn is_registered(&self) -> bool {
        self.sink.get().is_some()
    }
}

impl SinkRegistry for StateBridge {
    fn register(&self, sink: Arc<dyn StateSink>) -> Registration {
        StateBridge::register(self, sink)
    }
}

impl fmt::Debug for StateBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateBridge")
            .field("registered", &self.is_registered())
            .finish()
    }
}
