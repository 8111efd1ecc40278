//! # DVEL Testkit
//!
//! Testing utilities for the DVEL crates.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: seeded keypairs and chain builders for deterministic
//!   test scenarios
//! - **Generators**: proptest strategies for property-based testing
//! - **Golden vectors**: known inputs with hard-coded canonical bytes,
//!   signatures, and identity hashes for cross-platform verification
//!
//! ## Golden Vectors
//!
//! ```
//! use dvel_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     let event = vector.build_event();
//!     assert_eq!(event.identity().to_hex(), vector.identity);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use dvel_testkit::generators::{event_from_params, EventParams};
//!
//! proptest! {
//!     #[test]
//!     fn identity_is_deterministic(params: EventParams) {
//!         let e1 = event_from_params(&params);
//!         let e2 = event_from_params(&params);
//!         prop_assert_eq!(e1.identity(), e2.identity());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{event_from_params, EventParams};
pub use vectors::{all_vectors, GoldenVector};
