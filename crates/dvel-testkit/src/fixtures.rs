//! Test fixtures and helpers.
//!
//! Common setup code for deterministic scenarios: all fixtures use seeded
//! keypairs and caller-chosen ticks, never the clock.

use dvel_core::{Event, EventBuilder, EventHash, Keypair};
use dvel_ledger::Ledger;

/// A test fixture with a deterministic keypair.
pub struct TestFixture {
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a fixture with a fixed default seed.
    pub fn new() -> Self {
        Self::with_seed([0x42; 32])
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    /// The fixture's author id.
    pub fn author(&self) -> dvel_core::AuthorId {
        self.keypair.author()
    }

    /// Create a signed genesis event. The payload hash is derived from the
    /// timestamp so distinct ticks give distinct identities.
    pub fn make_genesis(&self, timestamp: u64) -> Event {
        EventBuilder::new(self.keypair.author())
            .timestamp(timestamp)
            .payload_hash(EventHash::digest(&timestamp.to_le_bytes()))
            .sign(&self.keypair)
    }

    /// Create a signed child of `prev`.
    pub fn make_child(&self, prev: EventHash, timestamp: u64) -> Event {
        EventBuilder::new(self.keypair.author())
            .prev(prev)
            .timestamp(timestamp)
            .payload_hash(EventHash::digest(&timestamp.to_le_bytes()))
            .sign(&self.keypair)
    }

    /// Link a chain of `len` events into the ledger starting from genesis
    /// at `start_ts`, one tick apart. Returns the accepted hashes in chain
    /// order.
    pub fn link_chain(&self, ledger: &mut Ledger, start_ts: u64, len: usize) -> Vec<EventHash> {
        let mut hashes = Vec::with_capacity(len);
        let mut prev = EventHash::ZERO;
        for i in 0..len {
            let event = if prev.is_zero() {
                self.make_genesis(start_ts + i as u64)
            } else {
                self.make_child(prev, start_ts + i as u64)
            };
            let hash = ledger
                .link_event(&event)
                .linked()
                .expect("fixture chain must link");
            hashes.push(hash);
            prev = hash;
        }
        hashes
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple fixtures with distinct deterministic keys.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0xd5;
            TestFixture::with_seed(seed)
        })
        .collect()
}
