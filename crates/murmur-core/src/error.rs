use thiserror::Error;

/// Protocol-wide error types for the Murmur gossip network.
#[derive(Debug, Error)]
pub enum MurmurError {
    /// Configuration error (bad peer address, unreadable config file).
    #[error("Config error: {0}")]
    Config(String),

    /// Wire codec error (malformed JSON payload).
    #[error("Codec error: {0}")]
    Codec(String),

    /// Network error (peer unreachable, send timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Filesystem error (trust log append failed).
    #[error("I/O error: {0}")]
    Io(String),

    /// A round entry referenced a peer that is not in the trust table.
    #[error("Unknown peer: {0}")]
    UnknownPeer(String),
}

impl From<serde_json::Error> for MurmurError {
    fn from(e: serde_json::Error) -> Self {
        MurmurError::Codec(e.to_string())
    }
}

impl From<std::io::Error> for MurmurError {
    fn from(e: std::io::Error) -> Self {
        MurmurError::Io(e.to_string())
    }
}
