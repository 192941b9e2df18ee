// crates/murmur-gossip/src/fault.rs
//
// Faulty-node value corruption.
//
// A faulty node perturbs the amount of every outbound copy by a fixed
// offset, direction chosen by an unbiased coin flip per copy. Copies of
// the same relay sent to different peers may therefore disagree with each
// other; the trust mechanism has to tolerate inconsistent lying.

/// Fixed perturbation applied by a faulty node.
pub const CORRUPTION_OFFSET: f64 = 50.0;

/// Perturb an amount in a coin-flipped direction.
pub fn perturb(amount: f64) -> f64 {
    perturb_with(amount, rand::random::<bool>())
}

/// Perturb an amount upward (`true`) or downward (`false`).
pub fn perturb_with(amount: f64, up: bool) -> f64 {
    if up {
        amount + CORRUPTION_OFFSET
    } else {
        amount - CORRUPTION_OFFSET
    }
}
