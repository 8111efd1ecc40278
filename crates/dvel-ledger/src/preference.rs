//! Local preferred-tip selection (non-consensus).
//!
//! Deterministic argmax over the current tips. Preference never touches
//! validity: a quarantined or zero-scored tip is still an accepted event.

use std::collections::HashSet;

use dvel_core::{AuthorId, EventHash};

use crate::ledger::Ledger;

/// Stateless weighting policy for chain scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipPolicy {
    /// Every accepted event on the chain contributes 1.
    Unit,
    /// Only each author's first event encountered (scanning tip → genesis)
    /// contributes 1.
    LatestPerAuthorUnit,
}

/// Walk `prev_hash` links from a tip, collecting at most `max_steps` hashes
/// in tip-first order. Stops at genesis, at an unknown parent, or at the
/// bound.
pub fn ancestor_chain(ledger: &Ledger, tip: &EventHash, max_steps: usize) -> Vec<EventHash> {
    let mut chain = Vec::new();
    let mut cursor = *tip;

    for _ in 0..max_steps {
        let Some(event) = ledger.get_event(&cursor) else {
            break;
        };
        chain.push(cursor);
        if event.prev_hash.is_zero() || event.prev_hash == cursor {
            break;
        }
        cursor = event.prev_hash;
    }

    chain
}

fn chain_score(ledger: &Ledger, chain: &[EventHash], policy: TipPolicy) -> u64 {
    match policy {
        TipPolicy::Unit => chain.len() as u64,
        TipPolicy::LatestPerAuthorUnit => {
            let mut seen: HashSet<AuthorId> = HashSet::new();
            let mut score: u64 = 0;
            for hash in chain {
                if let Some(event) = ledger.get_event(hash) {
                    if seen.insert(event.author) {
                        score = score.saturating_add(1);
                    }
                }
            }
            score
        }
    }
}

/// Select the preferred tip under a stateless policy.
///
/// Returns `(tip, score)`, or `None` iff the ledger is empty. Ties break to
/// the lexicographically smallest tip hash; tips are visited in ascending
/// hash order, so a strict improvement is required to displace the current
/// best.
pub fn select_preferred_tip(
    ledger: &Ledger,
    policy: TipPolicy,
    max_steps: usize,
) -> Option<(EventHash, u64)> {
    let mut best: Option<(EventHash, u64)> = None;

    for tip in ledger.tips() {
        let chain = ancestor_chain(ledger, tip, max_steps);
        let score = chain_score(ledger, &chain, policy);

        match best {
            None => best = Some((*tip, score)),
            Some((_, best_score)) if score > best_score => best = Some((*tip, score)),
            Some(_) => {}
        }
    }

    best
}
