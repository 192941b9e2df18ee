// crates/murmur-core/src/lib.rs
//
// murmur-core: Core types for the Murmur gossip network.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the wire message and its codec, the canonical peer identity,
// the deduplication store, the error type, and the sink trait used to
// persist trust snapshots.

pub mod dedup;
pub mod error;
pub mod message;
pub mod peer;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use murmur_core::GossipMessage;`

pub use dedup::{DedupStore, ProcessedKey, DEFAULT_DEDUP_CAPACITY};
pub use error::MurmurError;
pub use message::GossipMessage;
pub use peer::PeerAddr;
pub use traits::{TrustSink, TrustSnapshot};
