//! Event: the atomic unit of the ledger.
//!
//! An event is an immutable, signed record with a single parent hash. Once
//! created it cannot be edited; history grows by appending children.
//!
//! Canonical layout (hash/sign input), little-endian, no padding:
//!
//! ```text
//! version(1) ‖ prev_hash(32) ‖ author(32) ‖ timestamp(8 LE) ‖ payload_hash(32)
//! ```
//!
//! Identity is `SHA256(canonical_bytes ‖ signature)`. The ledger computes the
//! identity exactly once on accept; [`Event::identity`] exists so producers
//! and provers can recompute the same bytes, but the ledger's returned hash
//! is the authoritative one.

use serde::{Deserialize, Serialize};

use crate::crypto::{AuthorId, EventHash, EventSignature, Keypair};
use crate::error::CoreError;

/// The current event schema version.
pub const EVENT_VERSION: u8 = 1;

/// Length of the canonical (signed) encoding: 1 + 32 + 32 + 8 + 32.
pub const CANONICAL_LEN: usize = 105;

/// Length of the full wire encoding: canonical bytes plus the signature.
pub const ENCODED_LEN: usize = CANONICAL_LEN + 64;

/// A complete event: header fields + signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Schema version (currently 1).
    pub version: u8,

    /// Hash of the parent event; [`EventHash::ZERO`] marks genesis.
    pub prev_hash: EventHash,

    /// The author's public key.
    pub author: AuthorId,

    /// Producer-claimed tick. Opaque to the core; validation only bounds
    /// backward skew per author.
    pub timestamp: u64,

    /// Hash of the (external) payload.
    pub payload_hash: EventHash,

    /// Ed25519 signature over the canonical bytes.
    pub signature: EventSignature,
}

impl Event {
    /// Construct from raw fields (e.g. network/replay); no validation
    /// performed.
    pub fn from_parts(
        version: u8,
        prev_hash: EventHash,
        author: AuthorId,
        timestamp: u64,
        payload_hash: EventHash,
        signature: EventSignature,
    ) -> Self {
        Self {
            version,
            prev_hash,
            author,
            timestamp,
            payload_hash,
            signature,
        }
    }

    /// True iff this event has no parent.
    pub fn is_genesis(&self) -> bool {
        self.prev_hash.is_zero()
    }

    /// Canonical byte encoding (hash/sign input). Excludes the signature.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CANONICAL_LEN);
        out.push(self.version);
        out.extend_from_slice(self.prev_hash.as_bytes());
        out.extend_from_slice(self.author.as_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(self.payload_hash.as_bytes());
        out
    }

    /// Identity material: canonical bytes followed by the signature.
    pub fn identity_material(&self) -> Vec<u8> {
        let mut out = self.canonical_bytes();
        out.extend_from_slice(self.signature.as_bytes());
        out
    }

    /// Identity hash: `SHA256(canonical_bytes ‖ signature)`.
    ///
    /// Off-ledger recomputation; the hash the ledger returns on accept is
    /// the canonical one.
    pub fn identity(&self) -> EventHash {
        EventHash::digest(&self.identity_material())
    }

    /// Encode to the fixed wire form (canonical bytes + signature).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.identity_material()
    }

    /// Decode from the fixed wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != ENCODED_LEN {
            return Err(CoreError::MalformedEvent(format!(
                "expected {} bytes, got {}",
                ENCODED_LEN,
                bytes.len()
            )));
        }

        let field = |range: std::ops::Range<usize>| -> Result<[u8; 32], CoreError> {
            bytes[range]
                .try_into()
                .map_err(|_| CoreError::MalformedEvent("truncated field".into()))
        };

        let version = bytes[0];
        let prev_hash = EventHash::from_bytes(field(1..33)?);
        let author = AuthorId::from_bytes(field(33..65)?);
        let timestamp = u64::from_le_bytes(
            bytes[65..73]
                .try_into()
                .map_err(|_| CoreError::MalformedEvent("truncated timestamp".into()))?,
        );
        let payload_hash = EventHash::from_bytes(field(73..105)?);
        let signature = EventSignature::from_bytes(
            bytes[105..169]
                .try_into()
                .map_err(|_| CoreError::MalformedEvent("truncated signature".into()))?,
        );

        Ok(Self {
            version,
            prev_hash,
            author,
            timestamp,
            payload_hash,
            signature,
        })
    }

    /// Sign in place with the given keypair, replacing any prior signature.
    pub fn sign(&mut self, keypair: &Keypair) {
        self.signature = keypair.sign(&self.canonical_bytes());
    }
}

/// Builder for creating events.
pub struct EventBuilder {
    prev_hash: EventHash,
    author: AuthorId,
    timestamp: u64,
    payload_hash: EventHash,
}

impl EventBuilder {
    /// Start building an event for the given author. Defaults: genesis
    /// parent, timestamp 0, zero payload hash.
    pub fn new(author: AuthorId) -> Self {
        Self {
            prev_hash: EventHash::ZERO,
            author,
            timestamp: 0,
            payload_hash: EventHash::ZERO,
        }
    }

    /// Set the parent hash.
    pub fn prev(mut self, prev: EventHash) -> Self {
        self.prev_hash = prev;
        self
    }

    /// Set the timestamp tick.
    pub fn timestamp(mut self, ts: u64) -> Self {
        self.timestamp = ts;
        self
    }

    /// Set the payload hash.
    pub fn payload_hash(mut self, h: EventHash) -> Self {
        self.payload_hash = h;
        self
    }

    /// Build and sign the event. The keypair's public key must match the
    /// builder's author for the result to validate.
    pub fn sign(self, keypair: &Keypair) -> Event {
        let mut event = Event {
            version: EVENT_VERSION,
            prev_hash: self.prev_hash,
            author: self.author,
            timestamp: self.timestamp,
            payload_hash: self.payload_hash,
            signature: EventSignature::ZERO,
        };
        event.signature = keypair.sign(&event.canonical_bytes());
        event
    }

    /// Build without signing; the signature stays zeroed.
    pub fn unsigned(self) -> Event {
        Event {
            version: EVENT_VERSION,
            prev_hash: self.prev_hash,
            author: self.author,
            timestamp: self.timestamp,
            payload_hash: self.payload_hash,
            signature: EventSignature::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keypair() -> Keypair {
        Keypair::from_seed(&[0x42; 32])
    }

    #[test]
    fn test_canonical_layout() {
        let keypair = make_keypair();
        let event = EventBuilder::new(keypair.author())
            .prev(EventHash::from_bytes([0x01; 32]))
            .timestamp(0x0102030405060708)
            .payload_hash(EventHash::from_bytes([0x02; 32]))
            .sign(&keypair);

        let bytes = event.canonical_bytes();
        assert_eq!(bytes.len(), CANONICAL_LEN);
        assert_eq!(bytes[0], EVENT_VERSION);
        assert_eq!(&bytes[1..33], &[0x01; 32]);
        assert_eq!(&bytes[33..65], keypair.author().as_bytes());
        // little-endian timestamp
        assert_eq!(&bytes[65..73], &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[73..105], &[0x02; 32]);
    }

    #[test]
    fn test_identity_covers_signature() {
        let keypair = make_keypair();
        let event = EventBuilder::new(keypair.author())
            .timestamp(7)
            .sign(&keypair);

        let mut material = event.canonical_bytes();
        material.extend_from_slice(event.signature.as_bytes());
        assert_eq!(material.len(), ENCODED_LEN);
        assert_eq!(event.identity(), EventHash::digest(&material));
    }

    #[test]
    fn test_identity_changes_with_signature() {
        let keypair = make_keypair();
        let mut a = EventBuilder::new(keypair.author()).timestamp(1).sign(&keypair);
        let b = a.clone();

        a.signature = EventSignature::from_bytes([0x99; 64]);
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn test_wire_roundtrip() {
        let keypair = make_keypair();
        let event = EventBuilder::new(keypair.author())
            .prev(EventHash::from_bytes([0xaa; 32]))
            .timestamp(42)
            .payload_hash(EventHash::from_bytes([0xbb; 32]))
            .sign(&keypair);

        let bytes = event.to_bytes();
        assert_eq!(bytes.len(), ENCODED_LEN);

        let decoded = Event::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, event);
        assert_eq!(decoded.identity(), event.identity());
    }

    #[test]
    fn test_wire_rejects_wrong_length() {
        assert!(Event::from_bytes(&[0u8; ENCODED_LEN - 1]).is_err());
        assert!(Event::from_bytes(&[0u8; ENCODED_LEN + 1]).is_err());
        assert!(Event::from_bytes(&[]).is_err());
    }

    #[test]
    fn test_genesis_detection() {
        let keypair = make_keypair();
        let genesis = EventBuilder::new(keypair.author()).timestamp(1).sign(&keypair);
        assert!(genesis.is_genesis());

        let child = EventBuilder::new(keypair.author())
            .prev(genesis.identity())
            .timestamp(2)
            .sign(&keypair);
        assert!(!child.is_genesis());
    }

    #[test]
    fn test_builder_signature_verifies() {
        let keypair = make_keypair();
        let event = EventBuilder::new(keypair.author())
            .timestamp(3)
            .payload_hash(EventHash::digest(b"payload"))
            .sign(&keypair);

        assert!(keypair
            .author()
            .verify(&event.canonical_bytes(), &event.signature)
            .is_ok());
    }
}
