// crates/murmur-daemon/src/shared.rs
//
// Shared state handed to the gossip listener and the control server.
//
// The engine sits behind a single tokio mutex: every inbound message and
// every origination serializes its state transition through it, which is
// what keeps the round log, dedup store, and trust table consistent under
// concurrent connections. The lock is held only for the transition; sends
// and sink writes happen after it is released.

use std::sync::Arc;

use tokio::sync::Mutex;

use murmur_core::TrustSink;
use murmur_gossip::GossipEngine;

/// Shared node state, cloned into each server task.
#[derive(Clone)]
pub struct NodeShared {
    /// The gossip engine, serialized behind one mutex.
    pub engine: Arc<Mutex<GossipEngine>>,
    /// Sink for trust snapshots emitted on round closure.
    pub sink: Arc<dyn TrustSink>,
    /// Whether this node is configured to corrupt values.
    pub faulty: bool,
}

impl NodeShared {
    /// Create shared state from an engine and a sink.
    pub fn new(engine: GossipEngine, sink: Arc<dyn TrustSink>, faulty: bool) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            sink,
            faulty,
        }
    }
}
