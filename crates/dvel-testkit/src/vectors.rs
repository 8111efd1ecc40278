//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the event format must produce identical:
//! - canonical bytes (105-byte fixed layout)
//! - signature (deterministic Ed25519 over the canonical bytes)
//! - identity hash (SHA-256 over canonical bytes ‖ signature)
//!
//! The expected hex below was generated against RFC 8032 Ed25519 and
//! SHA-256 reference implementations.

use dvel_core::{Event, EventBuilder, EventHash, Keypair};

/// A single golden test vector: inputs plus expected derived hex.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    pub name: &'static str,
    pub description: &'static str,

    // Inputs
    pub seed: [u8; 32],
    pub prev: [u8; 32],
    pub timestamp: u64,
    pub payload_hash: [u8; 32],

    // Expected derived outputs (hex)
    pub author: &'static str,
    pub canonical_bytes: &'static str,
    pub signature: &'static str,
    pub identity: &'static str,
}

impl GoldenVector {
    /// Build and sign the event this vector describes.
    pub fn build_event(&self) -> Event {
        let keypair = Keypair::from_seed(&self.seed);
        EventBuilder::new(keypair.author())
            .prev(EventHash::from_bytes(self.prev))
            .timestamp(self.timestamp)
            .payload_hash(EventHash::from_bytes(self.payload_hash))
            .sign(&keypair)
    }
}

/// Identity of the `genesis_min` vector, usable as the parent input of
/// `chain_child`.
const GENESIS_MIN_IDENTITY: [u8; 32] = [
    0x00, 0xf0, 0xb0, 0x74, 0x5b, 0xc2, 0x77, 0x89, 0xa4, 0x0d, 0x3d, 0xcc, 0xb0, 0xbb, 0xc4,
    0x9e, 0x8e, 0x72, 0xb9, 0xb1, 0x8b, 0x4e, 0x2c, 0x91, 0xb1, 0x37, 0x97, 0x9e, 0x4b, 0x2d,
    0xb2, 0x7d,
];

/// All golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis_min",
            description: "Minimal genesis event: zero parent, tick 1",
            seed: [0x11; 32],
            prev: [0x00; 32],
            timestamp: 1,
            payload_hash: [0xaa; 32],
            author: "d04ab232742bb4ab3a1368bd4615e4e6d0224ab71a016baf8520a332c9778737",
            canonical_bytes: "010000000000000000000000000000000000000000000000000000000000000000d04ab232742bb4ab3a1368bd4615e4e6d0224ab71a016baf8520a332c97787370100000000000000aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            signature: "5836e0611979523457b5a01579b2126bfa4846f0361f83b2d111d5b69afa968aea737ea9f558ce0c30d8cf9b5581657935ef841b436270b4243f44421c516b04",
            identity: "00f0b0745bc27789a40d3dccb0bbc49e8e72b9b18b4e2c91b137979e4b2db27d",
        },
        GoldenVector {
            name: "chain_child",
            description: "Child of genesis_min by the same author",
            seed: [0x11; 32],
            prev: GENESIS_MIN_IDENTITY,
            timestamp: 2,
            payload_hash: [0xbb; 32],
            author: "d04ab232742bb4ab3a1368bd4615e4e6d0224ab71a016baf8520a332c9778737",
            canonical_bytes: "0100f0b0745bc27789a40d3dccb0bbc49e8e72b9b18b4e2c91b137979e4b2db27dd04ab232742bb4ab3a1368bd4615e4e6d0224ab71a016baf8520a332c97787370200000000000000bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
            signature: "e9f99068487f2c5609de69ff9ebbe9f8bf6642956856d46826d3e25c6c8d44b78ab828d74939de03dc344a1cd97f16e8de443cc70d8dc40f563bbabdac1cf709",
            identity: "a8b5b4fe63ca2fba7ee4e6c35828b8b10dbd7bf31cfa7bd50c9f98b0791a8d94",
        },
        GoldenVector {
            name: "second_author",
            description: "Independent genesis by a second author",
            seed: [0x22; 32],
            prev: [0x00; 32],
            timestamp: 5,
            payload_hash: [0xcc; 32],
            author: "a09aa5f47a6759802ff955f8dc2d2a14a5c99d23be97f864127ff9383455a4f0",
            canonical_bytes: "010000000000000000000000000000000000000000000000000000000000000000a09aa5f47a6759802ff955f8dc2d2a14a5c99d23be97f864127ff9383455a4f00500000000000000cccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccc",
            signature: "c8ab5f44dbf16fdd11a57bf1c809ca688ad63c4d20d420214e5f3a838d6b0b7031387961265cec921aa93b72f197e9781258ce43fe4d96517e9aeadff84c1201",
            identity: "179614a52fe3b8660c8eb92ce38de919101b7731539c07f39748197701c20ee8",
        },
        GoldenVector {
            name: "wide_timestamp",
            description: "Genesis with a multi-byte timestamp, little-endian on the wire",
            seed: [0x33; 32],
            prev: [0x00; 32],
            timestamp: 0xDEAD_BEEF,
            payload_hash: [0x00; 32],
            author: "17cb79fb2b4120f2b1ec65e4198d6e08b28e813feb01e4a400839b85e18080ce",
            canonical_bytes: "01000000000000000000000000000000000000000000000000000000000000000017cb79fb2b4120f2b1ec65e4198d6e08b28e813feb01e4a400839b85e18080ceefbeadde000000000000000000000000000000000000000000000000000000000000000000000000",
            signature: "5a2fcbaec3d17b7b894208cc2a14f6e3bcc51112d2fef1be9f97d969ae8c304b652abd8cefc1c0bdfdf6475c0437f61a4de034f35d542eacb6374068967dfb0d",
            identity: "ab845e0e56987288f7efd10bfe331f78d157978d97d419b73d8d1a74ceb02549",
        },
    ]
}
