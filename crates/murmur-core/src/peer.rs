// crates/murmur-core/src/peer.rs
//
// Canonical peer identity for the Murmur network.
//
// A peer is identified by its host:port pair everywhere: the dedup key,
// the round log, the trust table, and the trust log file all use the same
// canonical form. Messages attribute their immediate sender with separate
// address and port fields; `GossipMessage::sender_addr` folds them back
// into a `PeerAddr`.

use std::fmt;
use std::str::FromStr;

use crate::error::MurmurError;

/// A peer's canonical network identity: `host:port`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeerAddr {
    /// Host name or IP address.
    pub host: String,
    /// Gossip (TCP) port.
    pub port: u16,
}

impl PeerAddr {
    /// Create a new PeerAddr from host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for PeerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for PeerAddr {
    type Err = MurmurError;

    /// Parse a `host:port` string into a PeerAddr.
    ///
    /// The split is on the last colon so IPv6-style hosts with embedded
    /// colons still parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| MurmurError::Config(format!("peer address missing port: {}", s)))?;
        if host.is_empty() {
            return Err(MurmurError::Config(format!("peer address missing host: {}", s)));
        }
        let port: u16 = port
            .parse()
            .map_err(|_| MurmurError::Config(format!("invalid peer port: {}", s)))?;
        Ok(PeerAddr::new(host, port))
    }
}
