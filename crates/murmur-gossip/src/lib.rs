// crates/murmur-gossip/src/lib.rs
//
// murmur-gossip: The gossip engine for the Murmur network.
//
// The engine is a synchronous state machine over the dedup store, the
// round aggregator, and the trust table. It plans outbound relays rather
// than performing them: the daemon holds the engine behind a single mutex,
// applies each inbound message or origination as one state transition,
// then performs the planned sends and sink writes outside the lock.

pub mod engine;
pub mod fault;

pub use engine::{GossipEngine, OutboundMessage, Receipt};
pub use fault::{perturb, perturb_with, CORRUPTION_OFFSET};
