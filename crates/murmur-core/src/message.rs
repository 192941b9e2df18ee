// crates/murmur-core/src/message.rs
//
// Wire message for the Murmur gossip network.
//
// One UTF-8 JSON record per TCP connection, camelCase field names on the
// wire. The origin id and message id are fixed once by the originator and
// survive every relay unchanged; the sender fields are rewritten at each
// hop to identify the immediate relayer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MurmurError;
use crate::peer::PeerAddr;

/// A gossiped value report, immutable once sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GossipMessage {
    /// Numeric id of the immediate relayer.
    pub sender_id: i64,
    /// Numeric id of the node that first introduced the value.
    /// Constant across all relays of a round.
    pub origin_id: i64,
    /// The value being gossiped. A faulty relayer may perturb this.
    pub amount: f64,
    /// Unique per broadcast round, generated once by the originator.
    pub message_id: String,
    /// Gossip port of the immediate relayer.
    pub sender_port: u16,
    /// Host address of the immediate relayer.
    pub sender_address: String,
}

impl GossipMessage {
    /// The immediate sender's canonical identity.
    pub fn sender_addr(&self) -> PeerAddr {
        PeerAddr::new(self.sender_address.clone(), self.sender_port)
    }

    /// Generate a fresh message id for a new broadcast round.
    pub fn fresh_message_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Serialize to the wire encoding.
    pub fn encode(&self) -> Result<Vec<u8>, MurmurError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize from the wire encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self, MurmurError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
