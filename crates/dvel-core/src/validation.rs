//! Event validation: version, signature, and bounded timestamp skew.
//!
//! Validation never consults ledger linkage; parent existence is the
//! ledger's concern. The context tracks one author's timestamp watermark
//! and must be fed that author's events in acceptance order.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::event::{Event, EVENT_VERSION};

/// Default maximum backward skew, sized for adversarial delivery in the
/// simulation harnesses.
pub const DEFAULT_MAX_BACKWARD_SKEW: u64 = 1_000_000;

/// Validation settings, fixed at construction. Replaces the process-wide
/// mutable skew of earlier prototypes; create a new config instead of
/// mutating one mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// How far a timestamp may fall behind the author's watermark before
    /// the event is rejected. Clamped to at least 1 so equal timestamps
    /// always pass.
    pub max_backward_skew: u64,
}

impl ValidationConfig {
    /// Create a config with the given skew (clamped to >= 1).
    pub fn new(max_backward_skew: u64) -> Self {
        Self {
            max_backward_skew: max_backward_skew.max(1),
        }
    }

    fn skew(&self) -> u64 {
        self.max_backward_skew.max(1)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_backward_skew: DEFAULT_MAX_BACKWARD_SKEW,
        }
    }
}

/// Per-author validation state: the highest timestamp accepted so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    pub last_timestamp: u64,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self { last_timestamp: 0 }
    }
}

/// Validate an event against a per-author context.
///
/// Checks, in order: version, signature over the canonical bytes, bounded
/// backward skew against the context watermark. On success the watermark is
/// raised to `max(watermark, event.timestamp)`; on failure the context is
/// unchanged.
pub fn validate_event(
    event: &Event,
    ctx: &mut ValidationContext,
    config: &ValidationConfig,
) -> Result<(), ValidationError> {
    if event.version != EVENT_VERSION {
        return Err(ValidationError::InvalidVersion(event.version));
    }

    event
        .author
        .verify(&event.canonical_bytes(), &event.signature)
        .map_err(|_| ValidationError::InvalidSignature)?;

    let skew = config.skew();
    if ctx.last_timestamp > 0 && event.timestamp.saturating_add(skew) < ctx.last_timestamp {
        return Err(ValidationError::TimestampNonMonotonic {
            last_timestamp: ctx.last_timestamp,
            timestamp: event.timestamp,
        });
    }

    if event.timestamp > ctx.last_timestamp {
        ctx.last_timestamp = event.timestamp;
    }

    Ok(())
}
