//! # DVEL
//!
//! Reference engine for a Decentralized Verifiable Event Ledger: a
//! single-parent DAG of signed events with deterministic identity,
//! equivocation-aware local preference, and a proof-friendly execution
//! trace.
//!
//! ## Core Invariants
//!
//! 1. **Canonical identity**: `event_hash = sha256(canonical_bytes ‖ sig)`,
//!    computed once by the ledger on accept.
//! 2. **Append-only**: accepted hashes never leave the ledger.
//! 3. **Linkage**: every accepted non-genesis event has an accepted parent.
//! 4. **Preference ≠ validity**: the sybil overlay only weights tips; it
//!    never invalidates events or mutates the ledger.
//! 5. **Determinism**: no clock, no RNG, no unordered-iteration leakage;
//!    every output is a function of the call sequence.
//!
//! ## Example
//!
//! ```
//! use dvel::{Engine, EngineConfig, EventBuilder, EventHash, Keypair, LinkOutcome};
//!
//! let keypair = Keypair::from_seed(&[7; 32]);
//! let mut engine = Engine::with_signer(EngineConfig::default(), keypair.clone());
//!
//! let genesis = EventBuilder::new(keypair.author())
//!     .timestamp(1)
//!     .payload_hash(EventHash::digest(b"payload"))
//!     .sign(&keypair);
//!
//! let hash = match engine.submit(&genesis).unwrap() {
//!     LinkOutcome::Linked(h) => h,
//!     other => panic!("unexpected: {other:?}"),
//! };
//! engine.observe_event(1, 0, hash);
//! assert_eq!(engine.merkle_root(), Some(hash));
//! ```

mod engine;
mod error;

pub use engine::{Engine, EngineConfig};
pub use error::{EngineError, Result};

pub use dvel_core::{
    validate_event, AuthorId, Event, EventBuilder, EventHash, EventSignature, Keypair,
    ValidationConfig, ValidationContext, ValidationError, CANONICAL_LEN, ENCODED_LEN,
    EVENT_VERSION,
};
pub use dvel_ledger::{ancestor_chain, select_preferred_tip, Ledger, LinkOutcome, TipPolicy};
pub use dvel_overlay::{
    select_preferred_tip_sybil, SybilConfig, SybilOverlay, TraceRecorder, TraceRow,
};
