// crates/murmur-trust/src/evaluate.rs
//
// Trust evaluation for a completed round.
//
// The majority value is the amount with the highest occurrence count
// across the round's entries. Ties break to the first value (in round
// insertion order) to reach the maximum count, which keeps evaluation
// deterministic for any entry ordering the aggregator produces.

use murmur_core::TrustSnapshot;

use crate::round::RoundEntry;
use crate::table::TrustTable;

/// The round's majority-agreed amount, or `None` for an empty round.
///
/// Amounts are compared exactly: values pass through the JSON codec
/// unchanged, so reports that agree are bit-identical.
pub fn majority_value(entries: &[RoundEntry]) -> Option<f64> {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(v, _)| *v == entry.amount) {
            Some((_, n)) => *n += 1,
            None => counts.push((entry.amount, 1)),
        }
    }
    let max = counts.iter().map(|(_, n)| *n).max()?;
    counts.iter().find(|(_, n)| *n == max).map(|(v, _)| *v)
}

/// Score every reporting peer against the round's majority value and
/// return a snapshot of the updated table.
///
/// Agreement restores full trust; disagreement costs one penalty step.
/// An entry from a peer outside the table is reported and skipped;
/// it must never abort the remaining updates.
pub fn evaluate(entries: &[RoundEntry], table: &mut TrustTable) -> TrustSnapshot {
    if let Some(majority) = majority_value(entries) {
        for entry in entries {
            if !table.contains(&entry.sender) {
                tracing::warn!("trust entry for unknown peer {}, skipping", entry.sender);
                continue;
            }
            if entry.amount == majority {
                table.reward(&entry.sender);
            } else if let Some(score) = table.penalize(&entry.sender) {
                tracing::info!("lowering trust in {} to {:.1}", entry.sender, score);
            }
        }
    }
    table.snapshot()
}
