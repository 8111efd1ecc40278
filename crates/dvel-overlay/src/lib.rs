//! # DVEL Sybil Overlay
//!
//! Sybil-aware preference state layered over the ledger: per-author warmup,
//! equivocation quarantine, integer fixed-point weights, and an optional
//! deterministic trace of every observed accept.
//!
//! The overlay is purely a preference input. It never invalidates events
//! and never mutates the ledger; quarantining an author only zeroes that
//! author's weight in tip selection.

pub mod overlay;
pub mod trace;

pub use overlay::{select_preferred_tip_sybil, SybilConfig, SybilOverlay};
pub use trace::{TraceRecorder, TraceRow};
