// crates/murmur-core/src/traits.rs

use async_trait::async_trait;

use crate::error::MurmurError;
use crate::peer::PeerAddr;

/// A point-in-time copy of the full trust table, emitted every time a
/// round closes. Entries are sorted by peer address so output is stable.
#[derive(Debug, Clone, PartialEq)]
pub struct TrustSnapshot {
    /// (peer, score) pairs, sorted by peer address.
    pub scores: Vec<(PeerAddr, f64)>,
}

impl TrustSnapshot {
    /// Look up a peer's score in the snapshot.
    pub fn score(&self, peer: &PeerAddr) -> Option<f64> {
        self.scores
            .iter()
            .find(|(p, _)| p == peer)
            .map(|(_, s)| *s)
    }
}

/// Trait for durably recording trust snapshots.
///
/// Implemented by the daemon's append-only file sink. Sink failures are
/// reported to the caller but must never halt gossip.
#[async_trait]
pub trait TrustSink: Send + Sync {
    /// Record a snapshot of the trust table.
    async fn record(&self, snapshot: &TrustSnapshot) -> Result<(), MurmurError>;
}
