//! Trace recorder: one deterministic row per observed accept.
//!
//! Rows carry enough of the pre/post overlay state and ledger commitments to
//! rebuild every quarantine and preference decision externally (proof
//! tooling, replay checkers). Rows are appended in `observe_event` call
//! order and never reordered.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use dvel_core::{AuthorId, EventHash, EventSignature};

/// One row per observed accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRow {
    pub prev_hash: EventHash,
    pub author: AuthorId,
    pub timestamp: u64,
    pub payload_hash: EventHash,
    pub signature: EventSignature,
    /// True iff the event was genesis or its parent was accepted at
    /// observation time.
    pub parent_present: bool,
    /// False iff the author's previous tip and this event were unrelated
    /// within the walk bound (the equivocation verdict).
    pub ancestor_check: bool,
    pub quarantined_until_before: u64,
    pub quarantined_until_after: u64,
    /// Ledger commitment at observation time. Nullable by contract;
    /// consumers must not depend on presence.
    pub merkle_root: Option<EventHash>,
    /// Preferred tip under the sybil policy at this tick. Nullable by
    /// contract.
    pub preferred_tip: Option<EventHash>,
    /// The observed author's fixed-point weight after this observation.
    pub author_weight_fp: u64,
}

/// Append-only sequence of trace rows.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    rows: Vec<TraceRow>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// New recorder behind the shared handle an overlay attaches to.
    pub fn shared() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn push(&mut self, row: TraceRow) {
        self.rows.push(row);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TraceRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }
}
