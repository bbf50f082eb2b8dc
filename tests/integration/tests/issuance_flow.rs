//! Integration test: role-path issuance lifecycle across crates.
//!
//! Exercises the class registry, access control, mint windows, and pause
//! semantics of the engine end to end.

use chrono::{DateTime, TimeZone, Utc};

use tessera_core::{Address, CallContext, ClassId, EngineConfig};
use tessera_crypto::KeyPair;
use tessera_engine::{EngineError, SoulboundEngine};

fn addr(b: u8) -> Address {
    Address::new([b; 32])
}

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

const OWNER: u8 = 1;
const MINTER: u8 = 2;
const ALICE: u8 = 10;
const BOB: u8 = 11;

/// Engine with role-path minting, owned by OWNER, treasury at 99.
fn new_engine() -> SoulboundEngine {
    let signer = KeyPair::from_seed(&[42; 32]);
    SoulboundEngine::new(
        EngineConfig::default(),
        addr(OWNER),
        signer.public_key(),
        addr(99),
    )
}

// =========================================================================
// End-to-end scenario: two classes, one windowed
// =========================================================================

#[test]
fn test_end_to_end_windowed_issuance() {
    init_tracing();
    let mut engine = new_engine();
    let owner = CallContext::new(addr(OWNER)).at(ts(0));
    let t = 1_000;

    // Class 0: always open. Class 1: window [T, T+100).
    let c0 = engine
        .create_class(owner, "genesis", "always open", ts(0), None, 0)
        .unwrap()
        .class_id;
    let c1 = engine
        .create_class(owner, "season-1", "windowed", ts(t), Some(ts(t + 100)), 0)
        .unwrap()
        .class_id;
    assert_eq!(c0, ClassId(0));
    assert_eq!(c1, ClassId(1));

    engine.add_minter(owner, addr(MINTER)).unwrap();

    // Before the window opens: "not started".
    let err = engine
        .mint(
            CallContext::new(addr(MINTER)).at(ts(t - 1)),
            addr(ALICE),
            c1,
            None,
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::MintNotStarted(_)));

    // Inside the window: success.
    engine
        .mint(
            CallContext::new(addr(MINTER)).at(ts(t + 50)),
            addr(ALICE),
            c1,
            None,
        )
        .unwrap();
    assert_eq!(engine.balance_of(addr(ALICE), c1), 1);

    // After the window closes: "ended".
    let err = engine
        .mint(
            CallContext::new(addr(MINTER)).at(ts(t + 150)),
            addr(BOB),
            c1,
            None,
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::MintEnded(_)));

    // The unbounded class still mints long after.
    engine
        .mint(
            CallContext::new(addr(MINTER)).at(ts(t + 1_000_000)),
            addr(BOB),
            c0,
            None,
        )
        .unwrap();
    assert_eq!(engine.balance_of(addr(BOB), c0), 1);
}

// =========================================================================
// Balance conservation
// =========================================================================

#[test]
fn test_untouched_balances_stay_zero() {
    let mut engine = new_engine();
    let owner = CallContext::new(addr(OWNER)).at(ts(0));
    let c0 = engine
        .create_class(owner, "a", "", ts(0), None, 0)
        .unwrap()
        .class_id;
    let c1 = engine
        .create_class(owner, "b", "", ts(0), None, 0)
        .unwrap()
        .class_id;
    engine.add_minter(owner, addr(MINTER)).unwrap();

    engine
        .mint(
            CallContext::new(addr(MINTER)).at(ts(10)),
            addr(ALICE),
            c0,
            None,
        )
        .unwrap();

    // Exactly one (holder, class) cell changed.
    assert_eq!(engine.balance_of(addr(ALICE), c0), 1);
    assert_eq!(engine.balance_of(addr(ALICE), c1), 0);
    assert_eq!(engine.balance_of(addr(BOB), c0), 0);
    assert_eq!(engine.balance_of(addr(BOB), c1), 0);
    assert_eq!(engine.total_supply(c0), 1);
    assert_eq!(engine.total_supply(c1), 0);
}

// =========================================================================
// Pause semantics
// =========================================================================

#[test]
fn test_pause_blocks_admin_and_mint_but_not_burn() {
    let mut engine = new_engine();
    let owner = CallContext::new(addr(OWNER)).at(ts(0));
    let c0 = engine
        .create_class(owner, "a", "", ts(0), None, 0)
        .unwrap()
        .class_id;
    engine.add_minter(owner, addr(MINTER)).unwrap();
    engine
        .mint(
            CallContext::new(addr(MINTER)).at(ts(10)),
            addr(ALICE),
            c0,
            None,
        )
        .unwrap();

    engine.pause(owner).unwrap();

    assert!(matches!(
        engine.create_class(owner, "b", "", ts(0), None, 0),
        Err(EngineError::Paused)
    ));
    assert!(matches!(
        engine.add_minter(owner, addr(3)),
        Err(EngineError::Paused)
    ));
    assert!(matches!(
        engine.mint(
            CallContext::new(addr(MINTER)).at(ts(20)),
            addr(BOB),
            c0,
            None
        ),
        Err(EngineError::Paused)
    ));

    // Burning stays available to holders while paused.
    engine
        .burn(CallContext::new(addr(ALICE)), addr(ALICE), c0, 1)
        .unwrap();
    assert_eq!(engine.balance_of(addr(ALICE), c0), 0);

    // Unpause restores the gated operations.
    engine.unpause(owner).unwrap();
    engine
        .mint(
            CallContext::new(addr(MINTER)).at(ts(30)),
            addr(BOB),
            c0,
            None,
        )
        .unwrap();
}

// =========================================================================
// Ownership and metadata
// =========================================================================

#[test]
fn test_ownership_transfer_moves_authority() {
    let mut engine = new_engine();
    let owner = CallContext::new(addr(OWNER)).at(ts(0));
    engine.transfer_ownership(owner, addr(5)).unwrap();

    // The old owner can no longer register classes; the new one can.
    assert!(matches!(
        engine.create_class(owner, "x", "", ts(0), None, 0),
        Err(EngineError::NotOwner(_))
    ));
    engine
        .create_class(CallContext::new(addr(5)).at(ts(0)), "x", "", ts(0), None, 0)
        .unwrap();
}

#[test]
fn test_class_metadata_and_uri() {
    let mut engine = new_engine();
    let owner = CallContext::new(addr(OWNER)).at(ts(500));
    let c0 = engine
        .create_class(owner, "residency", "proof of residency", ts(0), None, 0)
        .unwrap()
        .class_id;

    let class = engine.class(c0).unwrap();
    assert_eq!(class.name, "residency");
    assert_eq!(class.creator, addr(OWNER));
    assert_eq!(class.registered_at, ts(500));

    assert_eq!(engine.class_uri(c0).unwrap(), "");
    engine
        .set_base_uri(owner, "https://creds.tessera.network/")
        .unwrap();
    assert_eq!(
        engine.class_uri(c0).unwrap(),
        "https://creds.tessera.network/0"
    );
    assert!(engine.class_uri(ClassId(9)).is_err());
}

#[test]
fn test_minter_set_edits_are_checked() {
    let mut engine = new_engine();
    let owner = CallContext::new(addr(OWNER)).at(ts(0));
    engine.add_minter(owner, addr(MINTER)).unwrap();
    assert!(engine.is_minter(addr(MINTER)));

    assert!(matches!(
        engine.add_minter(owner, addr(MINTER)),
        Err(EngineError::MinterAlreadyPresent(_))
    ));
    engine.remove_minter(owner, addr(MINTER)).unwrap();
    assert!(matches!(
        engine.remove_minter(owner, addr(MINTER)),
        Err(EngineError::MinterNotPresent(_))
    ));
}
