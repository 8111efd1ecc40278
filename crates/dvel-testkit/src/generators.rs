//! Proptest generators for property-based testing.

use proptest::prelude::*;

use dvel_core::{AuthorId, Event, EventBuilder, EventHash, Keypair};

/// Generate a deterministic keypair from an arbitrary seed.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random event hash.
pub fn event_hash() -> impl Strategy<Value = EventHash> {
    any::<[u8; 32]>().prop_map(EventHash::from_bytes)
}

/// Generate a random author id (derived from a real keypair so signatures
/// can verify).
pub fn author_id() -> impl Strategy<Value = AuthorId> {
    keypair().prop_map(|kp| kp.author())
}

/// Generate a timestamp away from the u64 edges.
pub fn timestamp() -> impl Strategy<Value = u64> {
    0u64..=u64::MAX / 2
}

/// Parameters for generating a signed event.
#[derive(Debug, Clone)]
pub struct EventParams {
    pub seed: [u8; 32],
    pub prev: Option<[u8; 32]>,
    pub timestamp: u64,
    pub payload_hash: [u8; 32],
}

impl Arbitrary for EventParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(),
            any::<Option<[u8; 32]>>(),
            0u64..=1_000_000u64,
            any::<[u8; 32]>(),
        )
            .prop_map(|(seed, prev, timestamp, payload_hash)| EventParams {
                seed,
                prev,
                timestamp,
                payload_hash,
            })
            .boxed()
    }
}

/// Build a signed event from parameters. A `prev` of `None` (or the all-zero
/// array) produces a genesis event.
pub fn event_from_params(params: &EventParams) -> Event {
    let keypair = Keypair::from_seed(&params.seed);
    let mut builder = EventBuilder::new(keypair.author())
        .timestamp(params.timestamp)
        .payload_hash(EventHash::from_bytes(params.payload_hash));
    if let Some(prev) = params.prev {
        builder = builder.prev(EventHash::from_bytes(prev));
    }
    builder.sign(&keypair)
}
