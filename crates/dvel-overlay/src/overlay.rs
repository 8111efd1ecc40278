//! Sybil overlay: latest-per-author tracking, warmup ramp, and
//! equivocation quarantine driven by the ledger's ancestor predicate.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Weak};

use serde::{Deserialize, Serialize};

use dvel_core::{AuthorId, EventHash};
use dvel_ledger::{ancestor_chain, Ledger};

use crate::trace::{TraceRecorder, TraceRow};

/// Overlay tuning. All arithmetic downstream is integer fixed-point at
/// `fixed_point_scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SybilConfig {
    /// Ticks from first observation until an author reaches full weight.
    pub warmup_ticks: u64,
    /// Ticks an equivocating author's weight is forced to zero.
    pub quarantine_ticks: u64,
    /// Fixed-point scale: full weight is exactly this value.
    pub fixed_point_scale: u64,
    /// Hop bound for the ancestor walks behind equivocation checks and
    /// sybil tip scoring.
    pub max_link_walk: usize,
}

impl Default for SybilConfig {
    fn default() -> Self {
        Self {
            warmup_ticks: 8,
            quarantine_ticks: 16,
            fixed_point_scale: 1000,
            max_link_walk: 4096,
        }
    }
}

/// Per-author overlay state.
#[derive(Debug, Clone, Copy)]
struct AuthorRecord {
    /// Most recent accepted event hash observed for this author.
    latest_tip: Option<EventHash>,
    /// Tick of the first observation; anchors the warmup ramp.
    first_seen_tick: u64,
    /// Exclusive upper bound of the quarantine window.
    quarantined_until: u64,
}

impl AuthorRecord {
    fn first_seen(tick: u64) -> Self {
        Self {
            latest_tip: None,
            first_seen_tick: tick,
            quarantined_until: 0,
        }
    }
}

/// Observer-scoped sybil state. One instance per observer; never shared
/// across observers and never consulted by the ledger.
#[derive(Debug, Clone, Default)]
pub struct SybilOverlay {
    config: SybilConfig,
    authors: HashMap<AuthorId, AuthorRecord>,
    /// Non-owning link to an attached recorder; a dead link silently
    /// disables recording.
    trace: Option<Weak<Mutex<TraceRecorder>>>,
}

impl SybilOverlay {
    pub fn new(config: SybilConfig) -> Self {
        Self {
            config,
            authors: HashMap::new(),
            trace: None,
        }
    }

    pub fn config(&self) -> &SybilConfig {
        &self.config
    }

    /// Replace the config in place. Weights computed after this call use
    /// the new scale/windows; recorded history is not rewritten.
    pub fn set_config(&mut self, config: SybilConfig) {
        self.config = config;
    }

    /// Attach a trace recorder. The overlay keeps only a weak link; the
    /// caller retains ownership and should detach before dropping it.
    pub fn attach_trace_recorder(&mut self, recorder: &Arc<Mutex<TraceRecorder>>) {
        self.trace = Some(Arc::downgrade(recorder));
    }

    pub fn detach_trace_recorder(&mut self) {
        self.trace = None;
    }

    /// Observe an event that the ledger has already accepted.
    ///
    /// Observing a hash the ledger does not hold is a caller error and is
    /// ignored without touching state. Otherwise: the author's previous tip
    /// and the new event are tested for relatedness in either direction
    /// within the walk bound; unrelated tips mean the author equivocated
    /// and the quarantine window is extended. The author's latest tip
    /// always advances to the observed hash, and one trace row is appended
    /// if a recorder is attached.
    ///
    /// `observer_node` identifies the observing node in multi-observer
    /// harnesses; it does not influence overlay state.
    pub fn observe_event(
        &mut self,
        ledger: &Ledger,
        tick: u64,
        observer_node: u32,
        hash: EventHash,
    ) {
        let _ = observer_node;
        let Some(event) = ledger.get_event(&hash) else {
            return;
        };
        let author = event.author;
        let quarantine_ticks = self.config.quarantine_ticks;
        let max_walk = self.config.max_link_walk;

        let record = self
            .authors
            .entry(author)
            .or_insert_with(|| AuthorRecord::first_seen(tick));
        let quarantined_before = record.quarantined_until;

        let ancestor_check = match record.latest_tip {
            None => true,
            Some(prev_tip) => {
                prev_tip == hash
                    || ledger.is_ancestor(&prev_tip, &hash, max_walk)
                    || ledger.is_ancestor(&hash, &prev_tip, max_walk)
            }
        };

        if !ancestor_check {
            record.quarantined_until = record
                .quarantined_until
                .max(tick.saturating_add(quarantine_ticks));
            tracing::warn!(
                author = %author,
                tick,
                until = record.quarantined_until,
                "equivocation observed, author quarantined"
            );
        }

        record.latest_tip = Some(hash);
        let quarantined_after = record.quarantined_until;

        let Some(recorder) = self.trace.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let row = TraceRow {
            prev_hash: event.prev_hash,
            author,
            timestamp: event.timestamp,
            payload_hash: event.payload_hash,
            signature: event.signature,
            parent_present: event.is_genesis() || ledger.contains(&event.prev_hash),
            ancestor_check,
            quarantined_until_before: quarantined_before,
            quarantined_until_after: quarantined_after,
            merkle_root: ledger.merkle_root(),
            preferred_tip: select_preferred_tip_sybil(ledger, self, tick, max_walk)
                .map(|(tip, _)| tip),
            author_weight_fp: self.author_weight_fp(tick, author),
        };
        recorder.lock().unwrap().push(row);
    }

    /// Fixed-point author weight at a tick.
    ///
    /// Zero for unknown or quarantined authors; otherwise a linear integer
    /// ramp from first observation to `fixed_point_scale` over
    /// `warmup_ticks`.
    pub fn author_weight_fp(&self, tick: u64, author: AuthorId) -> u64 {
        let Some(record) = self.authors.get(&author) else {
            return 0;
        };
        if tick < record.quarantined_until {
            return 0;
        }

        let age = tick.saturating_sub(record.first_seen_tick);
        let scale = self.config.fixed_point_scale;
        if age >= self.config.warmup_ticks {
            return scale;
        }
        ((scale as u128 * age as u128) / self.config.warmup_ticks as u128) as u64
    }

    /// True iff the author is inside a quarantine window at `tick`.
    pub fn is_quarantined(&self, tick: u64, author: AuthorId) -> bool {
        self.authors
            .get(&author)
            .map_or(false, |r| tick < r.quarantined_until)
    }

    /// Exclusive quarantine upper bound, if the author has been observed.
    pub fn quarantined_until(&self, author: AuthorId) -> Option<u64> {
        self.authors.get(&author).map(|r| r.quarantined_until)
    }

    /// Most recent accepted hash observed for the author.
    pub fn latest_tip(&self, author: AuthorId) -> Option<EventHash> {
        self.authors.get(&author).and_then(|r| r.latest_tip)
    }
}

/// Select the preferred tip under the sybil-aware latest-per-author policy.
///
/// A tip's score sums `author_weight_fp(tick, author)` over the distinct
/// authors encountered on the bounded tip→genesis walk, counting each
/// author's current contribution at most once (first hit wins, scanning
/// from the tip). Ties break to the lexicographically smallest tip hash;
/// `None` iff the ledger is empty.
pub fn select_preferred_tip_sybil(
    ledger: &Ledger,
    overlay: &SybilOverlay,
    tick: u64,
    max_steps: usize,
) -> Option<(EventHash, u64)> {
    let mut best: Option<(EventHash, u64)> = None;

    for tip in ledger.tips() {
        let mut seen: HashSet<AuthorId> = HashSet::new();
        let mut score: u64 = 0;
        for hash in ancestor_chain(ledger, tip, max_steps) {
            if let Some(event) = ledger.get_event(&hash) {
                if seen.insert(event.author) {
                    score = score.saturating_add(overlay.author_weight_fp(tick, event.author));
                }
            }
        }

        match best {
            None => best = Some((*tip, score)),
            Some((_, best_score)) if score > best_score => best = Some((*tip, score)),
            Some(_) => {}
        }
    }

    best
}
