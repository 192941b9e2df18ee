// crates/murmur-daemon/src/config.rs
//
// Runtime configuration for the Murmur node daemon.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;

use murmur_core::{MurmurError, PeerAddr, DEFAULT_DEDUP_CAPACITY};

/// Runtime configuration for the daemon. Immutable after startup.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// Numeric node id, used as the origin id in gossip messages.
    #[serde(default)]
    pub node_id: i64,

    /// Host address advertised in outbound messages.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port for peer gossip.
    #[serde(default = "default_gossip_port")]
    pub gossip_port: u16,

    /// HTTP port for the control surface (/send, /metrics).
    #[serde(default = "default_control_port")]
    pub control_port: u16,

    /// Whether this node corrupts the values it relays or originates.
    #[serde(default)]
    pub faulty: bool,

    /// Peer addresses as "host:port" strings.
    #[serde(default)]
    pub peers: Vec<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory the trust score log is written to.
    #[serde(default = "default_trust_log_dir")]
    pub trust_log_dir: String,

    /// Maximum number of dedup keys retained before eviction.
    #[serde(default = "default_dedup_capacity")]
    pub dedup_capacity: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gossip_port() -> u16 {
    8000
}

fn default_control_port() -> u16 {
    9000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_trust_log_dir() -> String {
    ".".to_string()
}

fn default_dedup_capacity() -> usize {
    DEFAULT_DEDUP_CAPACITY
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: 0,
            host: default_host(),
            gossip_port: default_gossip_port(),
            control_port: default_control_port(),
            faulty: false,
            peers: Vec::new(),
            log_level: default_log_level(),
            trust_log_dir: default_trust_log_dir(),
            dedup_capacity: default_dedup_capacity(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, MurmurError> {
        let contents = fs::read_to_string(path)?;
        let config: NodeConfig =
            toml::from_str(&contents).map_err(|e| MurmurError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Parse the configured peer strings into canonical addresses.
    pub fn peer_addrs(&self) -> Result<Vec<PeerAddr>, MurmurError> {
        self.peers.iter().map(|s| s.parse()).collect()
    }

    /// This node's own canonical address.
    pub fn self_addr(&self) -> PeerAddr {
        PeerAddr::new(self.host.clone(), self.gossip_port)
    }

    /// Path of this node's trust score log file.
    pub fn trust_log_path(&self) -> String {
        format!("{}/trust_scores_node_{}.log", self.trust_log_dir, self.node_id)
    }
}
