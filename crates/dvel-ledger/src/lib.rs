//! # DVEL Ledger
//!
//! Append-only single-parent DAG of accepted events.
//!
//! The ledger separates validity from linkage: events reach it already
//! validated (see `dvel-core`), and this crate only enforces duplicate and
//! parent-existence rules, derives the tip set, and exposes the commitments
//! the rest of the stack reads (Merkle root, bounded ancestor walks).
//!
//! ## Core Invariants
//!
//! 1. **Append-only**: an accepted hash never leaves the ledger.
//! 2. **Linkage**: every accepted non-genesis event's parent is accepted.
//! 3. **Tips**: the tip set is exactly the accepted hashes with no accepted
//!    child.
//! 4. **Determinism**: every output is a function of the accepted-hash set
//!    and the call sequence; unordered map iteration never leaks out.

pub mod ledger;
pub mod preference;

pub use ledger::{Ledger, LinkOutcome};
pub use preference::{ancestor_chain, select_preferred_tip, TipPolicy};
