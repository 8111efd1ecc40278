//! The Engine: unified capability surface over the DVEL stack.
//!
//! Bundles the ledger, the sybil overlay, per-author validation contexts,
//! and an optional signing keypair into one handle for collaborators
//! (simulators, attack harnesses, provers). Every method is synchronous,
//! bounded, and deterministic; a single engine instance is not thread-safe
//! by contract.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use dvel_core::{
    validate_event, AuthorId, Event, EventBuilder, EventHash, Keypair, ValidationConfig,
    ValidationContext,
};
use dvel_ledger::{select_preferred_tip, Ledger, LinkOutcome, TipPolicy};
use dvel_overlay::{select_preferred_tip_sybil, SybilConfig, SybilOverlay, TraceRecorder};

use crate::error::{EngineError, Result};

/// Configuration for the engine, fixed at construction. There is no mid-run
/// mutation surface; build a new engine to change settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub validation: ValidationConfig,
    pub sybil: SybilConfig,
}

/// The main engine handle.
pub struct Engine {
    config: EngineConfig,
    ledger: Ledger,
    overlay: SybilOverlay,
    /// One validation context per author, created on first sight.
    contexts: HashMap<AuthorId, ValidationContext>,
    /// Optional signer for locally produced events.
    signer: Option<Keypair>,
}

impl Engine {
    /// Create an engine without a signing key. Locally produced events must
    /// be signed by the caller.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ledger: Ledger::new(),
            overlay: SybilOverlay::new(config.sybil),
            contexts: HashMap::new(),
            signer: None,
        }
    }

    /// Create an engine that signs its own events.
    pub fn with_signer(config: EngineConfig, keypair: Keypair) -> Self {
        let mut engine = Self::new(config);
        engine.signer = Some(keypair);
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The signing author, if a keypair is configured.
    pub fn author(&self) -> Option<AuthorId> {
        self.signer.as_ref().map(Keypair::author)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn overlay(&self) -> &SybilOverlay {
        &self.overlay
    }

    // ─────────────────────────────────────────────────────────────────────
    // Producing events
    // ─────────────────────────────────────────────────────────────────────

    /// Build and sign an event with the engine's keypair.
    pub fn build_event(
        &self,
        prev: EventHash,
        timestamp: u64,
        payload_hash: EventHash,
    ) -> Result<Event> {
        let keypair = self.signer.as_ref().ok_or(EngineError::NoSigningKey)?;
        Ok(EventBuilder::new(keypair.author())
            .prev(prev)
            .timestamp(timestamp)
            .payload_hash(payload_hash)
            .sign(keypair))
    }

    /// Sign an event in place with the engine's keypair.
    pub fn sign_event(&self, event: &mut Event) -> Result<()> {
        let keypair = self.signer.as_ref().ok_or(EngineError::NoSigningKey)?;
        event.sign(keypair);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Validation and linkage
    // ─────────────────────────────────────────────────────────────────────

    /// Validate an event against its author's context. An `Ok` result
    /// advances that author's timestamp watermark.
    pub fn validate_event(
        &mut self,
        event: &Event,
    ) -> std::result::Result<(), dvel_core::ValidationError> {
        let ctx = self.contexts.entry(event.author).or_default();
        validate_event(event, ctx, &self.config.validation)
    }

    /// Validate then link. Validation failures surface as errors; linkage
    /// outcomes (`Linked`, `Duplicate`, `MissingParent`) are returned
    /// as-is since they are not failures.
    pub fn submit(&mut self, event: &Event) -> Result<LinkOutcome> {
        self.validate_event(event)?;
        let outcome = self.ledger.link_event(event);
        if let LinkOutcome::Linked(hash) = outcome {
            tracing::debug!(event = %hash, "event linked");
        }
        Ok(outcome)
    }

    /// Linkage-aware insert without validation.
    pub fn link_event(&mut self, event: &Event) -> LinkOutcome {
        self.ledger.link_event(event)
    }

    /// Unchecked insert for events the caller separately proved valid.
    pub fn add_event_unchecked(&mut self, event: &Event) -> EventHash {
        self.ledger.add_event_unchecked(event)
    }

    pub fn get_event(&self, hash: &EventHash) -> Option<&Event> {
        self.ledger.get_event(hash)
    }

    pub fn tips(&self) -> &BTreeSet<EventHash> {
        self.ledger.tips()
    }

    pub fn merkle_root(&self) -> Option<EventHash> {
        self.ledger.merkle_root()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Overlay and preference
    // ─────────────────────────────────────────────────────────────────────

    /// Feed an accepted hash to the sybil overlay at an observer tick.
    pub fn observe_event(&mut self, tick: u64, observer_node: u32, hash: EventHash) {
        self.overlay
            .observe_event(&self.ledger, tick, observer_node, hash);
    }

    pub fn author_weight_fp(&self, tick: u64, author: AuthorId) -> u64 {
        self.overlay.author_weight_fp(tick, author)
    }

    /// Preferred tip under a stateless policy.
    pub fn preferred_tip(&self, policy: TipPolicy, max_steps: usize) -> Option<(EventHash, u64)> {
        select_preferred_tip(&self.ledger, policy, max_steps)
    }

    /// Preferred tip under the sybil-aware latest-per-author policy.
    pub fn preferred_tip_sybil(&self, tick: u64, max_steps: usize) -> Option<(EventHash, u64)> {
        select_preferred_tip_sybil(&self.ledger, &self.overlay, tick, max_steps)
    }

    /// Attach a caller-owned trace recorder to the overlay.
    pub fn attach_trace_recorder(&mut self, recorder: &Arc<Mutex<TraceRecorder>>) {
        self.overlay.attach_trace_recorder(recorder);
    }

    pub fn detach_trace_recorder(&mut self) {
        self.overlay.detach_trace_recorder();
    }
}
