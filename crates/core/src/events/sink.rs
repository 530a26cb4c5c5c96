//! Store event sink trait and implementations.

use std::sync::{Arc, Mutex};

use log::warn;
use tokio::sync::mpsc;

use super::StoreEvent;

/// Trait for receiving store events.
///
/// `emit()` runs inline on the thread that mutated the store, after the
/// state lock was released but before any other writer may proceed, so
/// events arrive in mutation order even with writers on several threads.
/// It may read the store but must not mutate it, and it must be fast;
/// sinks that do real work should queue the event.
pub trait StoreEventSink: Send + Sync {
    /// Emit a single store event.
    fn emit(&self, event: StoreEvent);

    /// Emit multiple store events in order.
    fn emit_batch(&self, events: Vec<StoreEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Drops store events. Stands in for a view that polls the store instead
/// of reacting to changes.
#[derive(Clone, Default)]
pub struct NoOpStoreEventSink;

impl StoreEventSink for NoOpStoreEventSink {
    fn emit(&self, _event: StoreEvent) {}
}

/// Records store events in delivery order. Clones share one log, so a test
/// can subscribe one handle and inspect another.
#[derive(Clone, Default)]
pub struct MockStoreEventSink {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl MockStoreEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded events, oldest first.
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Forgets what was recorded, e.g. after arranging the store.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl StoreEventSink for MockStoreEventSink {
    fn emit(&self, event: StoreEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Forwards events into an unbounded channel so a listener task can
/// recompute its view off the mutation path.
#[derive(Clone)]
pub struct ChannelStoreEventSink {
    tx: mpsc::UnboundedSender<StoreEvent>,
}

impl ChannelStoreEventSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StoreEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl StoreEventSink for ChannelStoreEventSink {
    fn emit(&self, event: StoreEvent) {
        if let Err(e) = self.tx.send(event) {
            warn!("Store event dropped, listener is gone: {:?}", e.0);
        }
    }
}
