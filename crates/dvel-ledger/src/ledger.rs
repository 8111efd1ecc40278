//! Linkage-aware ledger (single-parent, fork-legal).

use std::collections::{BTreeSet, HashMap};

use dvel_core::{Event, EventHash};

/// Outcome of a linkage-aware insert. `Duplicate` and `MissingParent` are
/// outcomes, not failures: callers treat the former as a no-op and may queue
/// and retry the latter once the parent arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Event accepted; carries the ledger-computed identity hash.
    Linked(EventHash),
    /// Event already accepted; ledger unchanged.
    Duplicate,
    /// Non-genesis parent not accepted; ledger unchanged.
    MissingParent,
}

impl LinkOutcome {
    /// The accepted hash, if this outcome accepted anything.
    pub fn linked(&self) -> Option<EventHash> {
        match self {
            LinkOutcome::Linked(h) => Some(*h),
            _ => None,
        }
    }
}

/// Append-only store of accepted events plus the indexes derived from them.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    events: HashMap<EventHash, Event>,
    /// Parent hash -> accepted children, in acceptance order.
    children: HashMap<EventHash, Vec<EventHash>>,
    /// Accepted hashes with no accepted child. Ordered so enumeration is
    /// deterministic.
    tips: BTreeSet<EventHash>,
    /// Hashes in acceptance order.
    order: Vec<EventHash>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linkage-aware add:
    /// - rejects a duplicate hash
    /// - rejects a missing parent unless genesis
    /// - updates the tip set on success
    ///
    /// The returned hash is the event's canonical identity; collaborators
    /// must treat it as authoritative.
    pub fn link_event(&mut self, event: &Event) -> LinkOutcome {
        let hash = event.identity();

        if self.events.contains_key(&hash) {
            return LinkOutcome::Duplicate;
        }
        if !event.prev_hash.is_zero() && !self.events.contains_key(&event.prev_hash) {
            return LinkOutcome::MissingParent;
        }

        self.insert(hash, event.clone());
        LinkOutcome::Linked(hash)
    }

    /// Unchecked add: inserts without duplicate/parent tests. For callers
    /// that separately proved validity; the tip set stays consistent even
    /// when events arrive out of parent order.
    pub fn add_event_unchecked(&mut self, event: &Event) -> EventHash {
        let hash = event.identity();
        if self.events.contains_key(&hash) {
            return hash;
        }
        self.insert(hash, event.clone());
        hash
    }

    fn insert(&mut self, hash: EventHash, event: Event) {
        if !event.prev_hash.is_zero() {
            self.children.entry(event.prev_hash).or_default().push(hash);
            self.tips.remove(&event.prev_hash);
        }
        // A hash is a tip iff nothing accepted so far claims it as parent.
        if self.children.get(&hash).map_or(true, Vec::is_empty) {
            self.tips.insert(hash);
        }
        self.order.push(hash);
        self.events.insert(hash, event);
    }

    /// Look up an accepted event.
    pub fn get_event(&self, hash: &EventHash) -> Option<&Event> {
        self.events.get(hash)
    }

    /// True iff the hash has been accepted.
    pub fn contains(&self, hash: &EventHash) -> bool {
        self.events.contains_key(hash)
    }

    /// Number of accepted events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Current tips, ordered lexicographically.
    pub fn tips(&self) -> &BTreeSet<EventHash> {
        &self.tips
    }

    /// Accepted children of a parent, in acceptance order.
    pub fn children_of(&self, parent: &EventHash) -> &[EventHash] {
        self.children.get(parent).map_or(&[], Vec::as_slice)
    }

    /// Accepted hashes in acceptance order.
    pub fn accepted_order(&self) -> &[EventHash] {
        &self.order
    }

    /// Deterministic Merkle root over all accepted hashes.
    ///
    /// Leaves are the hashes sorted lexicographically; each level folds
    /// pairwise with `sha256(left ‖ right)`, duplicating the last node on
    /// odd length. `None` iff the ledger is empty; a single leaf is its own
    /// root. Depends only on the accepted-hash set, not insertion order.
    pub fn merkle_root(&self) -> Option<EventHash> {
        if self.events.is_empty() {
            return None;
        }

        let mut level: Vec<EventHash> = self.events.keys().copied().collect();
        level.sort_unstable();

        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut i = 0;
            while i < level.len() {
                let left = level[i];
                let right = if i + 1 < level.len() { level[i + 1] } else { left };
                let mut material = [0u8; 64];
                material[..32].copy_from_slice(left.as_bytes());
                material[32..].copy_from_slice(right.as_bytes());
                next.push(EventHash::digest(&material));
                i += 2;
            }
            level = next;
        }

        level.first().copied()
    }

    /// Bounded ancestor test: walk `prev_hash` links from `descendant` for
    /// at most `max_steps` hops, returning true iff `ancestor` is reached.
    ///
    /// The zero hash is never an ancestor. Equal hashes are trivially
    /// related. Exceeding the bound or reaching genesis yields false; that
    /// is a verdict, not an error.
    pub fn is_ancestor(
        &self,
        ancestor: &EventHash,
        descendant: &EventHash,
        max_steps: usize,
    ) -> bool {
        if ancestor.is_zero() {
            return false;
        }
        if ancestor == descendant {
            return true;
        }

        let mut cursor = *descendant;
        for _ in 0..max_steps {
            let Some(event) = self.events.get(&cursor) else {
                return false;
            };
            let prev = event.prev_hash;
            if prev == *ancestor {
                return true;
            }
            // Genesis or (theoretically impossible) self-loop ends the walk.
            if prev.is_zero() || prev == cursor {
                return false;
            }
            cursor = prev;
        }
        false
    }
}
