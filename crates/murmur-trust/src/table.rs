// crates/murmur-trust/src/table.rs
//
// Trust table: per-peer scores in [0.0, 1.0] for the Murmur network.
//
// Scores have single-round memory: one agreement with the majority
// restores full trust, one disagreement costs a fixed step. The peer set
// is fixed at configuration time; entries are never added or removed
// after construction.

use std::collections::HashMap;

use murmur_core::{PeerAddr, TrustSnapshot};

/// Score assigned to a peer whose report matched the round's majority.
pub const FULL_TRUST: f64 = 1.0;

/// Score deducted from a peer whose report disagreed with the majority.
pub const PENALTY_STEP: f64 = 0.2;

/// Per-peer trust scores, keyed by canonical peer address.
#[derive(Debug, Clone)]
pub struct TrustTable {
    scores: HashMap<PeerAddr, f64>,
}

impl TrustTable {
    /// Create a table with every configured peer at full trust.
    pub fn new(peers: &[PeerAddr]) -> Self {
        Self {
            scores: peers.iter().map(|p| (p.clone(), FULL_TRUST)).collect(),
        }
    }

    /// Current score for a peer, if it is known.
    pub fn score(&self, peer: &PeerAddr) -> Option<f64> {
        self.scores.get(peer).copied()
    }

    /// Whether the peer is in the table.
    pub fn contains(&self, peer: &PeerAddr) -> bool {
        self.scores.contains_key(peer)
    }

    /// Restore a known peer to full trust. Returns the new score, or
    /// `None` if the peer is unknown.
    pub fn reward(&mut self, peer: &PeerAddr) -> Option<f64> {
        let score = self.scores.get_mut(peer)?;
        *score = FULL_TRUST;
        Some(*score)
    }

    /// Deduct one penalty step from a known peer, flooring at 0.0 and
    /// rounding to one decimal digit. Returns the new score, or `None`
    /// if the peer is unknown.
    pub fn penalize(&mut self, peer: &PeerAddr) -> Option<f64> {
        let score = self.scores.get_mut(peer)?;
        *score = round1((*score - PENALTY_STEP).max(0.0));
        Some(*score)
    }

    /// A stable, sorted snapshot of the full table.
    pub fn snapshot(&self) -> TrustSnapshot {
        let mut scores: Vec<(PeerAddr, f64)> = self
            .scores
            .iter()
            .map(|(p, s)| (p.clone(), *s))
            .collect();
        scores.sort_by(|(a, _), (b, _)| a.cmp(b));
        TrustSnapshot { scores }
    }
}

/// Round to one decimal digit.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
