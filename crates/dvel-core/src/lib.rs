//! # DVEL Core
//!
//! Pure primitives for the Decentralized Verifiable Event Ledger: events,
//! canonical byte encoding, crypto wrappers, and per-author validation.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`Event`] - The atomic unit of the ledger: a signed, single-parent record
//! - [`EventHash`] - 32-byte SHA-256 identity / parent reference
//! - [`AuthorId`] - Ed25519 public key of an event producer
//! - [`ValidationContext`] - Per-author monotonic timestamp state
//!
//! ## Canonicalization
//!
//! Events encode to a fixed 105-byte layout (`version ‖ prev_hash ‖ author ‖
//! timestamp LE ‖ payload_hash`); identity is SHA-256 over those bytes
//! followed by the 64-byte signature. See [`event`].

pub mod crypto;
pub mod error;
pub mod event;
pub mod validation;

pub use crypto::{AuthorId, EventHash, EventSignature, Keypair};
pub use error::{CoreError, ValidationError};
pub use event::{Event, EventBuilder, CANONICAL_LEN, ENCODED_LEN, EVENT_VERSION};
pub use validation::{validate_event, ValidationConfig, ValidationContext};
