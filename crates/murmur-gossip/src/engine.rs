// crates/murmur-gossip/src/engine.rs
//
// The gossip engine: one state transition per inbound message or
// origination event.
//
// on_receive applies dedup, records the report into the open round, and
// plans the relay fan-out. A message whose origin is this node is never
// relayed further. The caller owns delivery; a planned outbound copy that
// fails to send has no effect on engine state.

use murmur_core::{
    DedupStore, GossipMessage, PeerAddr, ProcessedKey, TrustSnapshot, DEFAULT_DEDUP_CAPACITY,
};
use murmur_trust::{evaluate, RoundAggregator, TrustTable};

use crate::fault;

/// A planned outbound copy: which peer to send to, and what.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    /// Destination peer.
    pub to: PeerAddr,
    /// The message to deliver.
    pub msg: GossipMessage,
}

/// The outcome of one engine transition.
#[derive(Debug)]
pub struct Receipt {
    /// Whether the input was dropped as an already-seen duplicate.
    pub duplicate: bool,
    /// Outbound copies the caller must attempt to deliver.
    pub outbound: Vec<OutboundMessage>,
    /// Present when this transition closed a round.
    pub snapshot: Option<TrustSnapshot>,
}

impl Receipt {
    fn dropped() -> Self {
        Self {
            duplicate: true,
            outbound: Vec::new(),
            snapshot: None,
        }
    }
}

/// Node-local gossip state: dedup store, round aggregator, trust table.
#[derive(Debug)]
pub struct GossipEngine {
    self_id: i64,
    self_addr: PeerAddr,
    peers: Vec<PeerAddr>,
    faulty: bool,
    seen: DedupStore,
    rounds: RoundAggregator,
    trust: TrustTable,
}

impl GossipEngine {
    /// Create an engine for a node with the given identity and peer set.
    pub fn new(self_id: i64, self_addr: PeerAddr, peers: Vec<PeerAddr>, faulty: bool) -> Self {
        Self::with_dedup_capacity(self_id, self_addr, peers, faulty, DEFAULT_DEDUP_CAPACITY)
    }

    /// Create an engine with an explicit dedup-store capacity.
    pub fn with_dedup_capacity(
        self_id: i64,
        self_addr: PeerAddr,
        peers: Vec<PeerAddr>,
        faulty: bool,
        dedup_capacity: usize,
    ) -> Self {
        let trust = TrustTable::new(&peers);
        let rounds = RoundAggregator::new(peers.len());
        Self {
            self_id,
            self_addr,
            peers,
            faulty,
            seen: DedupStore::new(dedup_capacity),
            rounds,
            trust,
        }
    }

    /// Apply one inbound message.
    pub fn on_receive(&mut self, msg: &GossipMessage) -> Receipt {
        let sender = msg.sender_addr();
        let key = ProcessedKey::new(sender.clone(), msg.message_id.clone());
        if self.seen.seen(&key) {
            tracing::debug!("duplicate from {} for round {}, dropping", sender, msg.message_id);
            return Receipt::dropped();
        }
        self.seen.mark_seen(key);

        tracing::info!(
            "received from {} (origin {}): {}",
            sender,
            msg.origin_id,
            msg.amount
        );

        let snapshot = self
            .rounds
            .record(sender, msg.amount)
            .map(|entries| {
                tracing::info!("round complete, evaluating trust");
                evaluate(&entries, &mut self.trust)
            });

        // A message that started here has completed its loop.
        let outbound = if msg.origin_id == self.self_id {
            Vec::new()
        } else {
            self.plan_relay(msg.origin_id, msg.amount, &msg.message_id)
        };

        Receipt {
            duplicate: false,
            outbound,
            snapshot,
        }
    }

    /// Introduce a fresh value into the network.
    ///
    /// Marks the new round as locally seen so a copy looping back with
    /// this node as the attributed sender is dropped on arrival.
    pub fn originate(&mut self, amount: f64) -> Receipt {
        let message_id = GossipMessage::fresh_message_id();
        self.seen
            .mark_seen(ProcessedKey::new(self.self_addr.clone(), message_id.clone()));
        tracing::info!("originating amount {} as round {}", amount, message_id);

        Receipt {
            duplicate: false,
            outbound: self.plan_relay(self.self_id, amount, &message_id),
            snapshot: None,
        }
    }

    /// Plan one outbound copy per configured peer, rewriting the sender
    /// fields to this node. A faulty node perturbs each copy's amount
    /// independently.
    fn plan_relay(&self, origin_id: i64, amount: f64, message_id: &str) -> Vec<OutboundMessage> {
        self.peers
            .iter()
            .map(|peer| OutboundMessage {
                to: peer.clone(),
                msg: GossipMessage {
                    sender_id: self.self_id,
                    origin_id,
                    amount: if self.faulty {
                        fault::perturb(amount)
                    } else {
                        amount
                    },
                    message_id: message_id.to_string(),
                    sender_port: self.self_addr.port,
                    sender_address: self.self_addr.host.clone(),
                },
            })
            .collect()
    }

    /// Configured peers, in configuration order.
    pub fn peers(&self) -> &[PeerAddr] {
        &self.peers
    }

    /// A stable snapshot of the current trust table.
    pub fn trust_scores(&self) -> TrustSnapshot {
        self.trust.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(n: u8) -> PeerAddr {
        PeerAddr::new(format!("10.0.0.{}", n), 8000)
    }

    fn engine(peer_count: u8) -> GossipEngine {
        let peers = (1..=peer_count).map(peer).collect();
        GossipEngine::new(0, PeerAddr::new("10.0.0.100", 8000), peers, false)
    }

    fn msg_from(n: u8, origin_id: i64, amount: f64, message_id: &str) -> GossipMessage {
        GossipMessage {
            sender_id: n as i64,
            origin_id,
            amount,
            message_id: message_id.to_string(),
            sender_port: 8000,
            sender_address: format!("10.0.0.{}", n),
        }
    }

    #[test]
    fn duplicate_delivery_has_no_effect() {
        let mut eng = engine(3);
        let msg = msg_from(1, 7, 100.0, "round-1");

        let first = eng.on_receive(&msg);
        assert!(!first.duplicate);
        assert_eq!(first.outbound.len(), 3);

        let second = eng.on_receive(&msg);
        assert!(second.duplicate);
        assert!(second.outbound.is_empty());
        assert!(second.snapshot.is_none());

        // The duplicate did not count toward the round: two more distinct
        // senders are still needed to close it.
        assert!(eng.on_receive(&msg_from(2, 7, 100.0, "round-1")).snapshot.is_none());
        assert!(eng.on_receive(&msg_from(3, 7, 100.0, "round-1")).snapshot.is_some());
    }

    #[test]
    fn same_round_from_another_sender_is_recorded() {
        let mut eng = engine(3);
        eng.on_receive(&msg_from(1, 7, 100.0, "round-1"));
        let receipt = eng.on_receive(&msg_from(2, 7, 100.0, "round-1"));
        assert!(!receipt.duplicate);
        assert_eq!(receipt.outbound.len(), 3);
    }

    #[test]
    fn own_origin_is_never_relayed() {
        let mut eng = engine(3);
        let receipt = eng.on_receive(&msg_from(1, 0, 100.0, "round-1"));
        assert!(!receipt.duplicate);
        assert!(receipt.outbound.is_empty());
    }

    #[test]
    fn relay_rewrites_sender_and_preserves_origin() {
        let mut eng = engine(2);
        let receipt = eng.on_receive(&msg_from(1, 7, 100.0, "round-1"));
        assert_eq!(receipt.outbound.len(), 2);
        for (i, out) in receipt.outbound.iter().enumerate() {
            assert_eq!(out.to, peer(i as u8 + 1));
            assert_eq!(out.msg.sender_id, 0);
            assert_eq!(out.msg.sender_address, "10.0.0.100");
            assert_eq!(out.msg.sender_port, 8000);
            assert_eq!(out.msg.origin_id, 7);
            assert_eq!(out.msg.message_id, "round-1");
            assert_eq!(out.msg.amount, 100.0);
        }
    }

    #[test]
    fn originate_targets_every_peer_with_self_origin() {
        let mut eng = engine(3);
        let receipt = eng.originate(100.0);
        assert_eq!(receipt.outbound.len(), 3);
        let message_id = receipt.outbound[0].msg.message_id.clone();
        for out in &receipt.outbound {
            assert_eq!(out.msg.origin_id, 0);
            assert_eq!(out.msg.amount, 100.0);
            assert_eq!(out.msg.message_id, message_id);
        }
    }

    #[test]
    fn origination_loop_back_is_dropped() {
        let mut eng = engine(2);
        let receipt = eng.originate(100.0);
        let message_id = receipt.outbound[0].msg.message_id.clone();

        // A copy attributed to this node's own address comes back.
        let loop_back = GossipMessage {
            sender_id: 0,
            origin_id: 0,
            amount: 100.0,
            message_id,
            sender_port: 8000,
            sender_address: "10.0.0.100".to_string(),
        };
        assert!(eng.on_receive(&loop_back).duplicate);
    }

    #[test]
    fn faulty_relay_perturbs_each_copy_by_exactly_one_offset() {
        let peers = (1..=4).map(peer).collect();
        let mut eng = GossipEngine::new(0, PeerAddr::new("10.0.0.100", 8000), peers, true);
        let receipt = eng.on_receive(&msg_from(1, 7, 100.0, "round-1"));
        for out in &receipt.outbound {
            assert_eq!((out.msg.amount - 100.0).abs(), fault::CORRUPTION_OFFSET);
            assert_eq!(out.msg.origin_id, 7);
            assert_eq!(out.msg.message_id, "round-1");
        }
    }

    #[test]
    fn round_closure_updates_trust_once() {
        let mut eng = engine(3);
        assert!(eng.on_receive(&msg_from(1, 7, 100.0, "round-1")).snapshot.is_none());
        assert!(eng.on_receive(&msg_from(2, 7, 100.0, "round-1")).snapshot.is_none());
        let receipt = eng.on_receive(&msg_from(3, 7, 150.0, "round-1"));
        let snapshot = receipt.snapshot.expect("third report closes the round");
        assert_eq!(snapshot.score(&peer(1)), Some(1.0));
        assert_eq!(snapshot.score(&peer(2)), Some(1.0));
        assert_eq!(snapshot.score(&peer(3)), Some(0.8));
    }

    #[test]
    fn honest_observer_scores_faulty_peer_down_after_origination_round() {
        // This node originates 100; honest peers relay it back unchanged,
        // the faulty peer relays 150.
        let mut eng = engine(3);
        let receipt = eng.originate(100.0);
        let message_id = receipt.outbound[0].msg.message_id.clone();

        assert!(eng
            .on_receive(&msg_from(1, 0, 100.0, &message_id))
            .snapshot
            .is_none());
        assert!(eng
            .on_receive(&msg_from(2, 0, 100.0, &message_id))
            .snapshot
            .is_none());
        let receipt = eng.on_receive(&msg_from(3, 0, 150.0, &message_id));

        let snapshot = receipt.snapshot.expect("full round closes");
        assert_eq!(snapshot.score(&peer(1)), Some(1.0));
        assert_eq!(snapshot.score(&peer(2)), Some(1.0));
        assert_eq!(snapshot.score(&peer(3)), Some(0.8));
        assert_eq!(eng.trust_scores(), snapshot);
    }
}
