//! Stargarden Headless Simulation Harness
//!
//! Validates game data and the full simulation loop without a frontend.
//! Runs entirely in-process — no storage backend, no rendering.
//!
//! Usage:
//!   cargo run -p stargarden-simtest
//!   cargo run -p stargarden-simtest -- --verbose

use stargarden_core::catalog::{Catalog, Rarity};
use stargarden_core::effects::{effects_for, ResearchEffect};
use stargarden_core::engine::GardenEngine;
use stargarden_core::persistence::{ConsentState, KvStore, MemoryStore, SAVE_KEY};
use stargarden_logic::constants::{MIN_MULTIPLIER, PLOT_COUNT};
use stargarden_logic::environment::{
    environment_multiplier, Environment, EnvironmentAxis, OptimalConditions,
};
use stargarden_logic::growth;
use stargarden_logic::research::prerequisites_met;
use stargarden_logic::resources::ResourceKind;

use serde::Deserialize;

// ── Raw data files (same JSON the catalog embeds) ───────────────────────
const PLANTS_JSON: &str = include_str!("../../../data/plants.json");
const RESEARCH_JSON: &str = include_str!("../../../data/research.json");
const ACHIEVEMENTS_JSON: &str = include_str!("../../../data/achievements.json");

#[derive(Debug, Deserialize)]
struct IdRecord {
    id: String,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Stargarden Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Raw data file validation
    results.extend(validate_data_files(verbose));

    // 2. Catalog data validation
    results.extend(validate_catalog(verbose));

    // 3. Environment multiplier sweep
    results.extend(validate_environment_multiplier(verbose));

    // 4. Growth model scenarios
    results.extend(validate_growth_model(verbose));

    // 5. Research graph consistency
    results.extend(validate_research_graph(verbose));

    // 6. Full engine session
    results.extend(validate_engine_session(verbose));

    // 7. Offline catch-up boundary
    results.extend(validate_offline_boundary(verbose));

    // 8. Persistence loop
    results.extend(validate_persistence(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Raw data files ───────────────────────────────────────────────────

fn validate_data_files(_verbose: bool) -> Vec<TestResult> {
    println!("--- Data Files ---");
    let mut results = Vec::new();

    for (name, json) in [
        ("plants", PLANTS_JSON),
        ("research", RESEARCH_JSON),
        ("achievements", ACHIEVEMENTS_JSON),
    ] {
        match serde_json::from_str::<Vec<IdRecord>>(json) {
            Ok(records) => {
                let mut ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
                let total = ids.len();
                ids.sort_unstable();
                ids.dedup();
                results.push(TestResult::new(
                    &format!("data_{}_unique_ids", name),
                    ids.len() == total && total > 0,
                    format!("{} records, {} distinct ids", total, ids.len()),
                ));
            }
            Err(e) => {
                results.push(TestResult::new(
                    &format!("data_{}_parse", name),
                    false,
                    format!("JSON parse error: {}", e),
                ));
            }
        }
    }

    results
}

// ── 2. Catalog data ─────────────────────────────────────────────────────

fn validate_catalog(_verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog Data ---");
    let mut results = Vec::new();

    let catalog = match Catalog::load() {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::new(
                "catalog_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };

    results.push(TestResult::new(
        "catalog_plant_count",
        catalog.plant_count() == 6,
        format!("{} plant species loaded", catalog.plant_count()),
    ));

    // Every plant must be viable: positive growth time, affordable cost,
    // some yield, sane tolerance.
    let mut bad_plants = Vec::new();
    for plant in catalog.plants() {
        let total_yield: u32 = ResourceKind::ALL
            .iter()
            .map(|&k| plant.yield_amounts.get(k))
            .sum();
        if plant.growth_time_secs == 0
            || plant.seed_cost == 0
            || total_yield == 0
            || plant.tolerance == 0
            || plant.tolerance > 100
            || plant.stages.is_empty()
        {
            bad_plants.push(plant.id.clone());
        }
    }
    results.push(TestResult::new(
        "catalog_plants_viable",
        bad_plants.is_empty(),
        if bad_plants.is_empty() {
            "all plants have positive growth time, cost, yield".to_string()
        } else {
            format!("non-viable plants: {}", bad_plants.join(", "))
        },
    ));

    // Optimal conditions must sit on the 0-100 axes.
    let bad_conditions: Vec<_> = catalog
        .plants()
        .filter(|p| {
            p.optimal_conditions.radiation > 100
                || p.optimal_conditions.gravity > 100
                || p.optimal_conditions.atmosphere > 100
        })
        .map(|p| p.id.clone())
        .collect();
    results.push(TestResult::new(
        "catalog_conditions_in_range",
        bad_conditions.is_empty(),
        if bad_conditions.is_empty() {
            "all optimal conditions within 0-100".to_string()
        } else {
            format!("out-of-range conditions: {}", bad_conditions.join(", "))
        },
    ));

    // Rare-plant balance pass: void_orchid ships at seed_cost 25 and is
    // scaled by 1.2 at load.
    let orchid = catalog.plant("void_orchid");
    results.push(TestResult::new(
        "catalog_rare_balance",
        orchid.is_some_and(|p| {
            p.rarity == Rarity::Rare
                && p.seed_cost == 30
                && p.yield_amounts.get(ResourceKind::Research) == 18
        }),
        match orchid {
            Some(p) => format!(
                "void_orchid cost {} research yield {}",
                p.seed_cost,
                p.yield_amounts.get(ResourceKind::Research)
            ),
            None => "void_orchid missing".to_string(),
        },
    ));

    // Research effects must point at real plants.
    let mut dangling = Vec::new();
    for node in catalog.research_nodes() {
        for effect in effects_for(&node.id) {
            if let ResearchEffect::DiscoverPlant(plant_id) = effect {
                if catalog.plant(plant_id).is_none() {
                    dangling.push(format!("{} -> {}", node.id, plant_id));
                }
            }
        }
    }
    results.push(TestResult::new(
        "catalog_effect_targets_exist",
        dangling.is_empty(),
        if dangling.is_empty() {
            "all discovery effects target known plants".to_string()
        } else {
            format!("dangling effects: {}", dangling.join(", "))
        },
    ));

    results.push(TestResult::new(
        "catalog_achievements",
        catalog.achievements().count() == 5,
        format!("{} achievements loaded", catalog.achievements().count()),
    ));

    results
}

// ── 3. Environment multiplier ───────────────────────────────────────────

fn validate_environment_multiplier(verbose: bool) -> Vec<TestResult> {
    println!("--- Environment Multiplier ---");
    let mut results = Vec::new();

    let optimal = OptimalConditions {
        radiation: 50,
        gravity: 50,
        atmosphere: 50,
    };
    let tolerance = 30;

    // At the optimum the multiplier is exactly 1.0.
    let at_optimum = environment_multiplier(&optimal, tolerance, &Environment::default());
    results.push(TestResult::new(
        "multiplier_optimal_is_one",
        at_optimum == 1.0,
        format!("multiplier at optimum = {}", at_optimum),
    ));

    // Full axis sweep: bounded to [0.2, 1.0] and monotone non-increasing
    // as the radiation deviation grows.
    let mut bounded = true;
    let mut monotone = true;
    let mut last = f64::INFINITY;
    for radiation in 50..=100u8 {
        let env = Environment {
            radiation,
            gravity: 50,
            atmosphere: 50,
        };
        let m = environment_multiplier(&optimal, tolerance, &env);
        if !(MIN_MULTIPLIER..=1.0).contains(&m) {
            bounded = false;
        }
        if m > last {
            monotone = false;
        }
        last = m;
        if verbose {
            println!("    radiation {:>3} -> multiplier {:.3}", radiation, m);
        }
    }
    results.push(TestResult::new(
        "multiplier_bounded",
        bounded,
        "sweep stays within [0.2, 1.0]",
    ));
    results.push(TestResult::new(
        "multiplier_monotone",
        monotone,
        "sweep is non-increasing away from optimum",
    ));

    // Worst case (every axis pinned opposite the optimum) floors at 0.2.
    let worst = environment_multiplier(
        &OptimalConditions {
            radiation: 0,
            gravity: 0,
            atmosphere: 0,
        },
        10,
        &Environment {
            radiation: 100,
            gravity: 100,
            atmosphere: 100,
        },
    );
    results.push(TestResult::new(
        "multiplier_floor",
        worst == MIN_MULTIPLIER,
        format!("worst case multiplier = {}", worst),
    ));

    // Edge of tolerance from either side meets at 0.8.
    let at_edge = environment_multiplier(
        &optimal,
        tolerance,
        &Environment {
            radiation: 80,
            gravity: 50,
            atmosphere: 50,
        },
    );
    results.push(TestResult::new(
        "multiplier_tolerance_edge",
        (at_edge - 0.9333333).abs() < 1e-4,
        format!("one axis at tolerance edge = {:.4}", at_edge),
    ));

    results
}

// ── 4. Growth model ─────────────────────────────────────────────────────

fn validate_growth_model(_verbose: bool) -> Vec<TestResult> {
    println!("--- Growth Model ---");
    let mut results = Vec::new();

    // 60 one-second steps at multiplier 1.0 land exactly on 100.
    let mut progress = 0.0;
    for _ in 0..60 {
        progress = growth::advance(progress, growth::growth_increment(1.0, 60, 1.0));
    }
    results.push(TestResult::new(
        "growth_exact_completion",
        progress == 100.0,
        format!("60x 1s steps on a 60s plant -> {}", progress),
    ));

    // Progress clamps at 100 regardless of overshoot.
    let overshoot = growth::advance(99.0, growth::growth_increment(1000.0, 60, 1.0));
    results.push(TestResult::new(
        "growth_clamped",
        overshoot == 100.0,
        format!("overshoot clamps to {}", overshoot),
    ));

    // Environment multiplier scales the step linearly.
    let half = growth::growth_increment(1.0, 60, 0.5);
    let full = growth::growth_increment(1.0, 60, 1.0);
    results.push(TestResult::new(
        "growth_scales_with_multiplier",
        (half * 2.0 - full).abs() < 1e-12,
        format!("half-multiplier step {} vs full {}", half, full),
    ));

    // Offline increment ignores the environment entirely.
    let offline = growth::offline_increment(30.0, 60);
    results.push(TestResult::new(
        "growth_offline_unscaled",
        (offline - 50.0).abs() < 1e-12,
        format!("30s offline on a 60s plant -> +{}", offline),
    ));

    results
}

// ── 5. Research graph ───────────────────────────────────────────────────

fn validate_research_graph(_verbose: bool) -> Vec<TestResult> {
    println!("--- Research Graph ---");
    let mut results = Vec::new();

    let catalog = match Catalog::load() {
        Ok(c) => c,
        Err(e) => {
            return vec![TestResult::new(
                "research_parse",
                false,
                format!("JSON parse error: {}", e),
            )]
        }
    };

    // Every prerequisite id must exist.
    let mut dangling = Vec::new();
    for node in catalog.research_nodes() {
        for prereq in &node.requires {
            if catalog.research(prereq).is_none() {
                dangling.push(format!("{} -> {}", node.id, prereq));
            }
        }
    }
    results.push(TestResult::new(
        "research_prereqs_exist",
        dangling.is_empty(),
        if dangling.is_empty() {
            "all prerequisite ids resolve".to_string()
        } else {
            format!("dangling prereqs: {}", dangling.join(", "))
        },
    ));

    // The whole graph must be completable: repeatedly take any unlocked
    // node until none remain (also proves acyclicity).
    let mut completed: Vec<String> = Vec::new();
    let total = catalog.research_nodes().count();
    loop {
        let next = catalog.research_nodes().find(|n| {
            !completed.contains(&n.id) && prerequisites_met(&n.requires, &completed)
        });
        match next {
            Some(node) => completed.push(node.id.clone()),
            None => break,
        }
    }
    results.push(TestResult::new(
        "research_graph_completable",
        completed.len() == total,
        format!("{}/{} nodes reachable from the root", completed.len(), total),
    ));

    // Exactly one root node.
    let roots = catalog
        .research_nodes()
        .filter(|n| n.requires.is_empty())
        .count();
    results.push(TestResult::new(
        "research_single_root",
        roots == 1,
        format!("{} root node(s)", roots),
    ));

    results
}

// ── 6. Full engine session ──────────────────────────────────────────────

fn validate_engine_session(_verbose: bool) -> Vec<TestResult> {
    println!("--- Engine Session ---");
    let mut results = Vec::new();

    let mut engine = match GardenEngine::new(0) {
        Ok(e) => e,
        Err(e) => {
            return vec![TestResult::new(
                "engine_start",
                false,
                format!("engine failed to start: {}", e),
            )]
        }
    };

    results.push(TestResult::new(
        "engine_starting_garden",
        engine.plots().len() == PLOT_COUNT && engine.plots().iter().all(|p| p.is_empty()),
        format!("{} empty plots", engine.plots().len()),
    ));

    // Plant, run a minute of ticks, harvest.
    let plant_ok = engine.plant(0, "cosmo_bloom").is_ok();
    for second in 1..=60u64 {
        engine.tick(second * 1000);
    }
    let mature = engine.plot(0).map(|p| p.is_mature()).unwrap_or(false);
    results.push(TestResult::new(
        "engine_plant_matures_in_60s",
        plant_ok && mature,
        format!(
            "progress after 60 ticks = {:?}",
            engine.plot(0).map(|p| p.growth_progress)
        ),
    ));

    let harvested = engine.harvest(0);
    results.push(TestResult::new(
        "engine_harvest_yield",
        harvested
            .as_ref()
            .map(|d| d.energy == 10 && d.minerals == 5 && d.seeds == 2 && d.research == 1)
            .unwrap_or(false),
        format!("harvest result: {:?}", harvested),
    ));

    // Premature harvest must change nothing.
    engine.plant(1, "cosmo_bloom").ok();
    let seeds_before = engine.state().resources.seeds;
    let rejected = engine.harvest(1).is_err();
    results.push(TestResult::new(
        "engine_premature_harvest_rejected",
        rejected && engine.state().resources.seeds == seeds_before,
        "immature plot rejected without side effects",
    ));

    // Research chain to the end of the graph. The 200 starting points do
    // not cover every node, so a full garden of mature cosmo_bloom funds
    // the rest through its research production rate.
    let mut chain_engine = GardenEngine::new(0).expect("engine start");
    let mut clock_ms = 0u64;
    for plot_index in 0..PLOT_COUNT {
        chain_engine.plant(plot_index, "cosmo_bloom").ok();
    }
    clock_ms += 70_000;
    chain_engine.tick(clock_ms);

    let mut chain_ok = true;
    'chain: loop {
        let next = chain_engine
            .available_research()
            .first()
            .map(|d| d.id.clone());
        let Some(id) = next else { break };
        // Accrue from the mature garden until the node is affordable.
        for _ in 0..100 {
            if chain_engine.complete_research(&id).is_ok() {
                continue 'chain;
            }
            clock_ms += 60_000;
            chain_engine.tick(clock_ms);
        }
        chain_ok = false;
        break;
    }
    results.push(TestResult::new(
        "engine_research_chain",
        chain_ok && chain_engine.completed_research().len() == 5,
        format!(
            "{} research nodes completed from 200 starting points",
            chain_engine.completed_research().len()
        ),
    ));
    results.push(TestResult::new(
        "engine_research_discovers_all",
        chain_engine.discovered_plants().len() == 6,
        format!(
            "{} species discovered after full research",
            chain_engine.discovered_plants().len()
        ),
    ));

    results
}

// ── 7. Offline catch-up boundary ────────────────────────────────────────

fn validate_offline_boundary(_verbose: bool) -> Vec<TestResult> {
    println!("--- Offline Catch-up ---");
    let mut results = Vec::new();

    // Exactly at the threshold: treated as live-adjacent, no catch-up.
    let mut engine = GardenEngine::new(0).expect("engine start");
    engine.plant(0, "cosmo_bloom").ok();
    engine.pause();
    engine.resume(5_000);
    let at_threshold = engine.plot(0).map(|p| p.growth_progress).unwrap_or(-1.0);
    results.push(TestResult::new(
        "offline_threshold_exclusive",
        at_threshold == 0.0,
        format!("gap of exactly 5000ms leaves progress at {}", at_threshold),
    ));

    // One millisecond past it: catch-up runs.
    let mut engine = GardenEngine::new(0).expect("engine start");
    engine.plant(0, "cosmo_bloom").ok();
    engine.pause();
    engine.resume(5_001);
    let past_threshold = engine.plot(0).map(|p| p.growth_progress).unwrap_or(-1.0);
    results.push(TestResult::new(
        "offline_threshold_crossed",
        past_threshold > 8.0 && past_threshold < 9.0,
        format!("gap of 5001ms advances progress to {:.3}", past_threshold),
    ));

    // A long gap matures the plot once and credits the half-efficiency lump.
    let mut engine = GardenEngine::new(0).expect("engine start");
    engine.plant(0, "cosmo_bloom").ok();
    let energy_before = engine.state().resources.energy;
    engine.pause();
    engine.resume(3_600_000);
    let plot = engine.plot(0).expect("plot must exist");
    results.push(TestResult::new(
        "offline_lump_sum",
        plot.growth_progress == 100.0
            && !plot.is_empty()
            && engine.state().resources.energy == energy_before + 5.0,
        format!(
            "1h offline: progress {} energy +{}",
            plot.growth_progress,
            engine.state().resources.energy - energy_before
        ),
    ));

    results
}

// ── 8. Persistence loop ─────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut store = MemoryStore::default();
    let mut engine = GardenEngine::from_store(&store, 0).expect("engine start");

    // No consent: save is a refusal, not an error.
    let unsaved = engine.save(&mut store, 0);
    results.push(TestResult::new(
        "persist_consent_gate",
        matches!(unsaved, Ok(false)) && store.get(SAVE_KEY).is_none(),
        format!("save without consent -> {:?}", unsaved),
    ));

    // Accept, mutate, save, reload.
    engine
        .set_consent(&mut store, ConsentState::Accepted)
        .expect("memory store");
    engine.plant(0, "cosmo_bloom").ok();
    engine.set_environment(EnvironmentAxis::Atmosphere, 80);
    engine.tick(10_000);
    let saved = engine.save(&mut store, 10_000);
    results.push(TestResult::new(
        "persist_save_with_consent",
        matches!(saved, Ok(true)) && store.get(SAVE_KEY).is_some(),
        format!("save with consent -> {:?}", saved),
    ));

    let resumed = GardenEngine::from_store(&store, 11_000).expect("reload");
    results.push(TestResult::new(
        "persist_roundtrip",
        resumed.environment().atmosphere == 80
            && resumed.plot(0).map(|p| !p.is_empty()).unwrap_or(false)
            && resumed.consent() == ConsentState::Accepted,
        "environment, garden, and consent survive reload",
    ));

    // Corrupt blob falls back to a fresh game.
    let mut broken = MemoryStore::default();
    broken.set(SAVE_KEY, "not json at all").expect("memory store");
    let fresh = GardenEngine::from_store(&broken, 0).expect("fallback start");
    results.push(TestResult::new(
        "persist_corrupt_fallback",
        fresh.state().resources.seeds == 200.0 && fresh.plots().iter().all(|p| p.is_empty()),
        "corrupt save yields a fresh game",
    ));

    results
}
