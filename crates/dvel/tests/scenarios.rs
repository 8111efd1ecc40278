//! End-to-end scenarios exercising the full engine surface.

use dvel::{
    Engine, EngineConfig, EventHash, Keypair, LinkOutcome, SybilConfig, TipPolicy, TraceRecorder,
    ValidationConfig,
};
use dvel_testkit::TestFixture;

fn engine() -> Engine {
    Engine::new(EngineConfig::default())
}

#[test]
fn test_genesis_link() {
    let fixture = TestFixture::new();
    let mut engine = engine();

    let genesis = fixture.make_genesis(1);
    engine.validate_event(&genesis).unwrap();
    let h0 = match engine.link_event(&genesis) {
        LinkOutcome::Linked(h) => h,
        other => panic!("unexpected outcome: {other:?}"),
    };

    assert_eq!(engine.tips().iter().copied().collect::<Vec<_>>(), vec![h0]);
    // A single leaf folds to itself.
    assert_eq!(engine.merkle_root(), Some(h0));
}

#[test]
fn test_duplicate_rejection() {
    let fixture = TestFixture::new();
    let mut engine = engine();

    let genesis = fixture.make_genesis(1);
    engine.link_event(&genesis).linked().unwrap();
    assert_eq!(engine.link_event(&genesis), LinkOutcome::Duplicate);
    assert_eq!(engine.ledger().len(), 1);
}

#[test]
fn test_missing_parent_leaves_state_unchanged() {
    let fixture = TestFixture::new();
    let mut engine = engine();

    let orphan = fixture.make_child(EventHash::from_bytes([0x5a; 32]), 1);
    assert_eq!(engine.link_event(&orphan), LinkOutcome::MissingParent);
    assert!(engine.ledger().is_empty());
    assert_eq!(engine.merkle_root(), None);

    // The orphan links fine once its parent exists.
    let parent = fixture.make_genesis(1);
    let hp = engine.link_event(&parent).linked().unwrap();
    let child = fixture.make_child(hp, 2);
    engine.link_event(&child).linked().unwrap();
    assert_eq!(engine.ledger().len(), 2);
}

#[test]
fn test_equivocation_triggers_quarantine() {
    let fixture = TestFixture::new();
    let mut engine = engine();
    let quarantine = engine.config().sybil.quarantine_ticks;
    let author = fixture.author();

    // Two genesis events by the same author: unrelated histories.
    let ea = fixture.make_genesis(1);
    let eb = fixture.make_genesis(2);
    let ha = engine.link_event(&ea).linked().unwrap();
    let hb = engine.link_event(&eb).linked().unwrap();
    assert_ne!(ha, hb, "distinct forks must hash differently");

    let tick = 30;
    engine.observe_event(tick, 0, ha);
    engine.observe_event(tick, 0, hb);

    assert_eq!(engine.overlay().quarantined_until(author), Some(tick + quarantine));
    assert_eq!(engine.author_weight_fp(tick, author), 0);
    assert_eq!(engine.author_weight_fp(tick + quarantine - 1, author), 0);

    // Once the window closes, the warmup ramp (anchored at first sight)
    // governs again; with default config the author is past warmup.
    assert_eq!(
        engine.author_weight_fp(tick + quarantine, author),
        engine.config().sybil.fixed_point_scale
    );
}

#[test]
fn test_warmup_ramp() {
    let fixture = TestFixture::new();
    let config = EngineConfig {
        sybil: SybilConfig {
            warmup_ticks: 4,
            fixed_point_scale: 1000,
            ..SybilConfig::default()
        },
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config);

    let h0 = engine.link_event(&fixture.make_genesis(1)).linked().unwrap();
    engine.observe_event(10, 0, h0);

    let author = fixture.author();
    let expected = [(10, 0), (11, 250), (12, 500), (13, 750), (14, 1000)];
    for (tick, weight) in expected {
        assert_eq!(engine.author_weight_fp(tick, author), weight, "tick {tick}");
    }
}

#[test]
fn test_merkle_independence_across_histories() {
    let fixture = TestFixture::new();

    let genesis = fixture.make_genesis(1);
    let a = fixture.make_child(genesis.identity(), 2);
    let b = fixture.make_child(genesis.identity(), 3);

    let mut forward = engine();
    forward.link_event(&genesis);
    forward.link_event(&a);
    forward.link_event(&b);

    let mut reverse = engine();
    reverse.link_event(&genesis);
    reverse.link_event(&b);
    reverse.link_event(&a);

    assert_eq!(forward.merkle_root(), reverse.merkle_root());
    assert!(forward.merkle_root().is_some());
}

#[test]
fn test_unit_and_sybil_policies_disagree_under_attack() {
    // A sybil author spams a long chain; an honest author has a short one.
    // Unit preference follows the long chain, sybil-aware preference does
    // not once the spammer equivocates.
    let honest = TestFixture::with_seed([1; 32]);
    let sybil = TestFixture::with_seed([2; 32]);
    let config = EngineConfig {
        sybil: SybilConfig {
            warmup_ticks: 1,
            ..SybilConfig::default()
        },
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config);

    // Sybil chain of length 4 plus a second unrelated genesis (equivocation).
    let mut prev = EventHash::ZERO;
    let mut sybil_hashes = Vec::new();
    for ts in 1..=4 {
        let event = if prev.is_zero() {
            sybil.make_genesis(ts)
        } else {
            sybil.make_child(prev, ts)
        };
        prev = engine.link_event(&event).linked().unwrap();
        sybil_hashes.push(prev);
    }
    let equiv = engine.link_event(&sybil.make_genesis(99)).linked().unwrap();

    let honest_tip = engine.link_event(&honest.make_genesis(1)).linked().unwrap();

    for (tick, hash) in sybil_hashes.iter().enumerate() {
        engine.observe_event(tick as u64, 0, *hash);
    }
    engine.observe_event(4, 0, equiv);
    engine.observe_event(0, 0, honest_tip);

    let (unit_tip, _) = engine.preferred_tip(TipPolicy::Unit, 64).unwrap();
    assert_eq!(unit_tip, sybil_hashes[3], "unit policy follows chain length");

    let (sybil_tip, score) = engine.preferred_tip_sybil(10, 64).unwrap();
    assert_eq!(sybil_tip, honest_tip, "quarantined author loses preference");
    assert_eq!(score, engine.config().sybil.fixed_point_scale);
}

#[test]
fn test_validation_gate_before_linking() {
    let keypair = Keypair::from_seed(&[3; 32]);
    let config = EngineConfig {
        validation: ValidationConfig::new(2),
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_signer(config, keypair.clone());

    let genesis = engine
        .build_event(EventHash::ZERO, 100, EventHash::digest(b"a"))
        .unwrap();
    let h0 = engine.submit(&genesis).unwrap().linked().unwrap();

    // Rewinding beyond the skew fails validation and never reaches linkage.
    let stale = engine.build_event(h0, 90, EventHash::digest(b"b")).unwrap();
    assert!(engine.submit(&stale).is_err());
    assert_eq!(engine.ledger().len(), 1);

    // Within the skew it is accepted.
    let close = engine.build_event(h0, 98, EventHash::digest(b"c")).unwrap();
    engine.submit(&close).unwrap().linked().unwrap();
    assert_eq!(engine.ledger().len(), 2);
}

#[test]
fn test_trace_records_full_run() {
    let fixture = TestFixture::new();
    let mut engine = engine();

    let recorder = TraceRecorder::shared();
    engine.attach_trace_recorder(&recorder);

    let h0 = engine.link_event(&fixture.make_genesis(1)).linked().unwrap();
    let h1 = engine.link_event(&fixture.make_child(h0, 2)).linked().unwrap();
    engine.observe_event(1, 0, h0);
    engine.observe_event(2, 0, h1);

    // Unknown hash: ignored, no row.
    engine.observe_event(3, 0, EventHash::from_bytes([0x77; 32]));

    engine.detach_trace_recorder();

    let rows = recorder.lock().unwrap();
    assert_eq!(rows.len(), 2);
    let first = rows.get(0).unwrap();
    assert_eq!(first.prev_hash, EventHash::ZERO);
    assert!(first.ancestor_check);
    let second = rows.get(1).unwrap();
    assert_eq!(second.prev_hash, h0);
    assert!(second.ancestor_check);
    assert!(second.parent_present);
    assert_eq!(second.merkle_root, engine.merkle_root());
}

#[test]
fn test_independent_engines_do_not_share_state() {
    let fixture = TestFixture::new();
    let mut a = engine();
    let mut b = engine();

    let genesis = fixture.make_genesis(1);
    a.link_event(&genesis).linked().unwrap();

    assert!(b.ledger().is_empty());
    assert_eq!(b.link_event(&fixture.make_child(genesis.identity(), 2)), LinkOutcome::MissingParent);
}
