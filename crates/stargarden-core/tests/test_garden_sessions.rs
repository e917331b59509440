//! Integration tests for full play sessions across save/load boundaries.
//!
//! Exercises: GardenEngine → KvStore persistence → a second engine resumed
//! from the same store, including consent gating, offline catch-up, and
//! research effects surviving a reload.

use stargarden_core::engine::GardenEngine;
use stargarden_core::persistence::{ConsentState, KvStore, MemoryStore, SAVE_KEY};
use stargarden_core::state::GAME_VERSION;
use stargarden_logic::environment::EnvironmentAxis;

// ── Helpers ────────────────────────────────────────────────────────────

/// Engine with consent accepted, ready to save.
fn consenting_engine(store: &mut MemoryStore, now_ms: u64) -> GardenEngine {
    let mut engine = GardenEngine::from_store(store, now_ms).expect("engine must start");
    engine
        .set_consent(store, ConsentState::Accepted)
        .expect("memory store cannot fail");
    engine
}

// ── Save / load roundtrip ──────────────────────────────────────────────

#[test]
fn session_survives_save_and_reload() {
    let mut store = MemoryStore::default();
    let mut engine = consenting_engine(&mut store, 0);

    engine.plant(0, "cosmo_bloom").unwrap();
    engine.plant(1, "cosmo_bloom").unwrap();
    engine.tick(60_000);
    engine.harvest(0).unwrap();
    engine.set_environment(EnvironmentAxis::Gravity, 70);
    assert!(engine.save(&mut store, 60_000).unwrap());

    // Reload within the offline threshold: nothing moves.
    let resumed = GardenEngine::from_store(&store, 62_000).expect("load must succeed");
    assert_eq!(resumed.state().resources, engine.state().resources);
    assert_eq!(resumed.environment().gravity, 70);
    assert!(resumed.plot(0).unwrap().is_empty());
    assert_eq!(resumed.plot(0).unwrap().harvested, 1);
    assert_eq!(resumed.plot(1).unwrap().growth_progress, 100.0);
    assert_eq!(resumed.state().version, GAME_VERSION);
    assert_eq!(resumed.discovered_plants(), engine.discovered_plants());
}

#[test]
fn reload_past_threshold_applies_offline_progress() {
    let mut store = MemoryStore::default();
    let mut engine = consenting_engine(&mut store, 0);
    engine.plant(0, "cosmo_bloom").unwrap();
    engine.save(&mut store, 0).unwrap();
    let energy_at_save = engine.state().resources.energy;

    // Ten minutes later the plot has crossed maturity once: lump sum at
    // half efficiency, progress clamped at 100, plant still in the ground.
    let resumed = GardenEngine::from_store(&store, 600_000).expect("load must succeed");
    assert_eq!(resumed.plot(0).unwrap().growth_progress, 100.0);
    assert!(!resumed.plot(0).unwrap().is_empty());
    assert_eq!(resumed.state().resources.energy, energy_at_save + 5.0);
}

#[test]
fn research_scaling_survives_reload() {
    let mut store = MemoryStore::default();
    let mut engine = consenting_engine(&mut store, 0);
    engine.complete_research("basic_cultivation").unwrap();
    assert_eq!(
        engine.catalog().plant("cosmo_bloom").unwrap().growth_time_secs,
        54
    );
    engine.save(&mut store, 0).unwrap();

    let resumed = GardenEngine::from_store(&store, 1_000).expect("load must succeed");
    assert!(resumed.state().has_completed("basic_cultivation"));
    assert!(resumed.state().has_discovered("stellar_fern"));
    assert_eq!(
        resumed.catalog().plant("cosmo_bloom").unwrap().growth_time_secs,
        54
    );
}

// ── Consent gating ─────────────────────────────────────────────────────

#[test]
fn save_is_suppressed_until_consent_accepted() {
    let mut store = MemoryStore::default();
    let mut engine = GardenEngine::from_store(&store, 0).expect("engine must start");

    // Unset: no write.
    assert!(!engine.save(&mut store, 0).unwrap());
    assert!(store.get(SAVE_KEY).is_none());

    // Declined: still no write, and the decision itself is stored.
    engine.set_consent(&mut store, ConsentState::Declined).unwrap();
    assert!(!engine.save(&mut store, 0).unwrap());
    assert!(store.get(SAVE_KEY).is_none());

    let next_session = GardenEngine::from_store(&store, 1_000).expect("engine must start");
    assert_eq!(next_session.consent(), ConsentState::Declined);

    // Accepting later enables the save path.
    engine.set_consent(&mut store, ConsentState::Accepted).unwrap();
    assert!(engine.save(&mut store, 0).unwrap());
    assert!(store.get(SAVE_KEY).is_some());
}

// ── Corrupt and partial saves ──────────────────────────────────────────

#[test]
fn corrupt_save_starts_fresh() {
    let mut store = MemoryStore::default();
    store.set(SAVE_KEY, "{not json").unwrap();

    let engine = GardenEngine::from_store(&store, 0).expect("engine must start");
    assert_eq!(engine.state().resources.seeds, 200.0);
    assert_eq!(engine.discovered_plants(), ["cosmo_bloom".to_string()]);
}

#[test]
fn partial_save_merges_over_defaults() {
    let mut store = MemoryStore::default();
    store
        .set(
            SAVE_KEY,
            r#"{"resources":{"energy":999.0,"minerals":30.0,"seeds":200.0,"research":200.0}}"#,
        )
        .unwrap();

    let engine = GardenEngine::from_store(&store, 0).expect("engine must start");
    assert_eq!(engine.state().resources.energy, 999.0);
    assert_eq!(engine.plots().len(), 8);
    assert_eq!(engine.state().player.name, "Gardener");
}

// ── Reset ──────────────────────────────────────────────────────────────

#[test]
fn reset_clears_save_and_catalog_scaling() {
    let mut store = MemoryStore::default();
    let mut engine = consenting_engine(&mut store, 0);
    engine.complete_research("basic_cultivation").unwrap();
    engine.save(&mut store, 0).unwrap();
    assert!(store.get(SAVE_KEY).is_some());

    engine.reset(&mut store, 1_000).unwrap();
    assert!(store.get(SAVE_KEY).is_none());
    assert!(engine.completed_research().is_empty());
    assert_eq!(
        engine.catalog().plant("cosmo_bloom").unwrap().growth_time_secs,
        60
    );
    // Consent outlives the reset.
    assert_eq!(engine.consent(), ConsentState::Accepted);
}
