//! C-ABI adapters for the state channel
//!
//! A consumer written against the C header registers a plain function
//! pointer; [`CallbackSink`] converts each record to [`NativeState`] before
//! calling it. In the other direction, [`StateConsumer::receive_native`]
//! validates a record that arrived in its C layout.

use std::sync::Arc;

use nativestate_shared::{NativeState, NativeStateCallback, NativeStateError, StateRecord};
use tracing::warn;

use crate::bridge::{Registration, SinkRegistry, StateSink};
use crate::consumer::StateConsumer;

/// Sink that forwards records to a C function pointer.
#[derive(Clone, Copy)]
pub struct CallbackSink {
    callback: NativeStateCallback,
}

impl CallbackSink {
    pub fn new(callback: NativeStateCallback) -> Self {
        Self { callback }
    }
}

impl StateSink for CallbackSink {
    fn on_state_changed(&self, record: StateRecord) {
        (self.callback)(NativeState::from(record));
    }
}

/// Register a C callback as the consumer.
pub fn register_callback(
    registry: &dyn SinkRegistry,
    callback: NativeStateCallback,
) -> Registration {
    registry.register(Arc::new(CallbackSink::new(callback)))
}

impl StateConsumer {
    /// Accept a record in its C layout.
    ///
    /// Invalid records are rejected and the previous record stays current.
    pub fn receive_native(&self, state: NativeState) -> Result<(), NativeStateError> {
        match StateRecord::try_from(state) {
            Ok(record) => {
                self.on_state_changed(record);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected native state: {e}");
                Err(e)
            }
        }
    }
}
