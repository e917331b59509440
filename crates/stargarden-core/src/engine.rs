//! Garden simulation engine - main entry point for running the simulation.
//!
//! `GardenEngine` owns the game state, the (mutable-by-research) catalog, the
//! notification queue, and the pause flag. All mutation happens synchronously
//! inside `tick` or the discrete action methods; the host drives `tick` from
//! its 1 Hz timer and calls `pause`/`resume` on visibility changes.

use std::collections::HashSet;

use stargarden_logic::constants::{MATURE_PROGRESS, OFFLINE_THRESHOLD_MS};
use stargarden_logic::environment::{
    environment_multiplier, Compatibility, Environment, EnvironmentAxis,
};
use stargarden_logic::growth;
use stargarden_logic::harvest::{harvest_yield, offline_yield, production_rates};
use stargarden_logic::research::prerequisites_met;
use stargarden_logic::resources::{ResourceDelta, ResourceKind, ResourceRates};

use crate::achievements::{self, ids};
use crate::catalog::{Catalog, PlantDef, ResearchDef};
use crate::effects::{effects_for, ResearchEffect};
use crate::errors::ActionError;
use crate::notify::{Notification, NotificationQueue};
use crate::persistence::{self, ConsentState, KvStore, SaveError};
use crate::state::{GameState, Plot, Settings};

pub struct GardenEngine {
    state: GameState,
    catalog: Catalog,
    notifications: NotificationQueue,
    /// Session-scoped; intentionally absent from the persisted blob.
    unlocked_achievements: HashSet<String>,
    consent: ConsentState,
    paused: bool,
}

impl GardenEngine {
    /// Fresh game starting at `now_ms`.
    pub fn new(now_ms: u64) -> Result<Self, SaveError> {
        let mut engine = Self {
            state: GameState::new_game(now_ms),
            catalog: Catalog::load()?,
            notifications: NotificationQueue::default(),
            unlocked_achievements: HashSet::new(),
            consent: ConsentState::Unset,
            paused: false,
        };
        engine.discover("cosmo_bloom");
        Ok(engine)
    }

    /// Resume from a store: loads the save blob if one parses, otherwise
    /// starts fresh. A loaded game re-applies completed research to the
    /// catalog and runs offline catch-up for the elapsed wall-clock gap.
    pub fn from_store(store: &dyn KvStore, now_ms: u64) -> Result<Self, SaveError> {
        let consent = persistence::load_consent(store);
        match persistence::load_game(store) {
            Some(state) => {
                let mut engine = Self {
                    state,
                    catalog: Catalog::load()?,
                    notifications: NotificationQueue::default(),
                    unlocked_achievements: HashSet::new(),
                    consent,
                    paused: false,
                };
                engine.reapply_completed_research();

                let gap_ms = now_ms.saturating_sub(engine.state.last_update_ms);
                if gap_ms > OFFLINE_THRESHOLD_MS {
                    engine.offline_catch_up(gap_ms);
                }
                engine.state.last_update_ms = now_ms;
                engine.notifications.success("Game loaded successfully");
                Ok(engine)
            }
            None => {
                let mut engine = Self::new(now_ms)?;
                engine.consent = consent;
                Ok(engine)
            }
        }
    }

    // ── Live tick ───────────────────────────────────────────────────────

    /// Advance the simulation to `now_ms`. No-op while paused.
    ///
    /// Order per update: growth advances on every occupied plot, the pool
    /// accrues `rates * Δt` from the current rate table, then the rates are
    /// rebuilt from scratch by rescanning mature plots.
    pub fn tick(&mut self, now_ms: u64) {
        if self.paused {
            return;
        }
        let delta_secs = now_ms.saturating_sub(self.state.last_update_ms) as f64 / 1000.0;
        self.state.last_update_ms = now_ms;

        self.advance_growth(delta_secs);
        self.state
            .resources
            .accrue(&self.state.resource_rates, delta_secs);
        self.recompute_rates();
        self.check_garden_master();
    }

    fn advance_growth(&mut self, delta_secs: f64) {
        let env = self.state.environment;
        for plot in self.state.garden.iter_mut() {
            let Some(plant_id) = &plot.plant_id else {
                continue;
            };
            let Some(plant) = self.catalog.plant(plant_id) else {
                continue;
            };
            let em = environment_multiplier(&plant.optimal_conditions, plant.tolerance, &env);
            let increment = growth::growth_increment(delta_secs, plant.growth_time_secs, em);
            plot.growth_progress = growth::advance(plot.growth_progress, increment);
        }
    }

    /// Rebuild the per-second rate table from every mature plot. Rates are
    /// derived state; recomputing keeps them consistent with the current
    /// environment and catalog.
    fn recompute_rates(&mut self) {
        let env = self.state.environment;
        let mut rates = ResourceRates::default();
        for plot in &self.state.garden {
            if !plot.is_mature() {
                continue;
            }
            let Some(plant_id) = &plot.plant_id else {
                continue;
            };
            let Some(plant) = self.catalog.plant(plant_id) else {
                continue;
            };
            let em = environment_multiplier(&plant.optimal_conditions, plant.tolerance, &env);
            rates.add(&production_rates(
                &plant.yield_amounts,
                plant.yield_multiplier,
                em,
            ));
        }
        self.state.resource_rates = rates;
    }

    // ── Pause / resume / offline catch-up ───────────────────────────────

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Clear the pause flag; a gap beyond the offline threshold is settled
    /// with a single lump-sum catch-up instead of the missed ticks.
    pub fn resume(&mut self, now_ms: u64) {
        self.paused = false;
        let gap_ms = now_ms.saturating_sub(self.state.last_update_ms);
        if gap_ms > OFFLINE_THRESHOLD_MS {
            self.offline_catch_up(gap_ms);
        }
        self.state.last_update_ms = now_ms;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// One-shot simulation of elapsed offline time. Growth advances on raw
    /// elapsed seconds (no environment scaling); a plot that crosses 100
    /// during this step yields a lump sum at half efficiency, using the
    /// multiplier at the moment of catch-up.
    fn offline_catch_up(&mut self, offline_ms: u64) {
        let offline_secs = offline_ms as f64 / 1000.0;
        let env = self.state.environment;
        let mut lump = ResourceRates::default();

        for plot in self.state.garden.iter_mut() {
            let Some(plant_id) = &plot.plant_id else {
                continue;
            };
            let Some(plant) = self.catalog.plant(plant_id) else {
                continue;
            };
            let before = plot.growth_progress;
            let next = before + growth::offline_increment(offline_secs, plant.growth_time_secs);
            if next >= MATURE_PROGRESS {
                plot.growth_progress = MATURE_PROGRESS;
                if before < MATURE_PROGRESS {
                    let em =
                        environment_multiplier(&plant.optimal_conditions, plant.tolerance, &env);
                    lump.add(&offline_yield(
                        &plant.yield_amounts,
                        plant.yield_multiplier,
                        em,
                    ));
                }
            } else {
                plot.growth_progress = next;
            }
        }

        let credited = lump.floored();
        if !credited.is_zero() {
            self.state.resources.credit(&credited);
            let mut parts = Vec::new();
            for kind in ResourceKind::ALL {
                let amount = credited.get(kind);
                if amount > 0 {
                    parts.push(format!("+{} {}", amount, kind.name()));
                }
            }
            self.notifications
                .success(format!("While you were away: {}", parts.join(", ")));
        }
        self.recompute_rates();
        log::info!(
            "offline catch-up over {:.1}s credited {:?}",
            offline_secs,
            credited
        );
    }

    // ── Player actions ──────────────────────────────────────────────────

    /// Plant a seed in an empty plot. Deducts exactly `seed_cost` seeds;
    /// fails atomically with no deduction.
    pub fn plant(&mut self, plot_index: usize, plant_id: &str) -> Result<(), ActionError> {
        let Some(plant) = self.catalog.plant(plant_id) else {
            return Err(self.reject(ActionError::UnknownPlant(plant_id.to_string())));
        };
        let seed_cost = plant.seed_cost;
        let plant_name = plant.name.clone();

        if plot_index >= self.state.garden.len() {
            return Err(self.reject(ActionError::PlotOutOfRange(plot_index)));
        }
        if !self.state.resources.can_afford(ResourceKind::Seeds, seed_cost) {
            return Err(self.reject(ActionError::InsufficientSeeds { needed: seed_cost }));
        }
        if !self.state.garden[plot_index].is_empty() {
            return Err(self.reject(ActionError::PlotOccupied));
        }

        self.state.resources.spend(ResourceKind::Seeds, seed_cost);
        let planted_at = self.state.last_update_ms;
        let plot = &mut self.state.garden[plot_index];
        plot.plant_id = Some(plant_id.to_string());
        plot.growth_progress = 0.0;
        plot.planted_at_ms = Some(planted_at);

        self.discover(plant_id);
        self.unlock_achievement(ids::FIRST_PLANT);
        self.notifications.success(format!("Planted {}", plant_name));
        log::debug!("planted {} in plot {}", plant_id, plot_index);
        Ok(())
    }

    /// Harvest a mature plot: credits `floor(yield * ym * em)` per resource,
    /// clears the slot, and bumps its harvest counter.
    pub fn harvest(&mut self, plot_index: usize) -> Result<ResourceDelta, ActionError> {
        if plot_index >= self.state.garden.len() {
            return Err(self.reject(ActionError::PlotOutOfRange(plot_index)));
        }
        let Some(plant_id) = self.state.garden[plot_index].plant_id.clone() else {
            return Err(self.reject(ActionError::PlotEmpty));
        };
        if self.state.garden[plot_index].growth_progress < MATURE_PROGRESS {
            return Err(self.reject(ActionError::NotReady));
        }
        let Some(plant) = self.catalog.plant(&plant_id) else {
            return Err(self.reject(ActionError::UnknownPlant(plant_id)));
        };

        let em = environment_multiplier(
            &plant.optimal_conditions,
            plant.tolerance,
            &self.state.environment,
        );
        let credited = harvest_yield(&plant.yield_amounts, plant.yield_multiplier, em);
        let plant_name = plant.name.clone();

        self.state.resources.credit(&credited);
        let plot = &mut self.state.garden[plot_index];
        plot.plant_id = None;
        plot.growth_progress = 0.0;
        plot.planted_at_ms = None;
        plot.harvested += 1;

        self.recompute_rates();
        self.unlock_achievement(ids::FIRST_HARVEST);

        let mut parts = Vec::new();
        for kind in ResourceKind::ALL {
            let amount = credited.get(kind);
            if amount > 0 {
                parts.push(format!("+{} {}", amount, kind.name()));
            }
        }
        let message = if parts.is_empty() {
            format!("Harvested {}", plant_name)
        } else {
            format!("Harvested {}: {}", plant_name, parts.join(", "))
        };
        self.notifications.success(message);
        log::debug!("harvested plot {} for {:?}", plot_index, credited);
        Ok(credited)
    }

    /// Move one environment slider (clamped 0-100) and rebuild the rate
    /// table so mature plots immediately produce at the new multiplier.
    pub fn set_environment(&mut self, axis: EnvironmentAxis, value: u8) {
        self.state.environment.set(axis, value);
        self.recompute_rates();
    }

    /// Complete an unlocked research node: spends research points and applies
    /// the node's fixed effects (plant discovery, stat scaling).
    pub fn complete_research(&mut self, research_id: &str) -> Result<(), ActionError> {
        let Some(def) = self.catalog.research(research_id) else {
            return Err(self.reject(ActionError::UnknownResearch(research_id.to_string())));
        };
        let cost = def.cost;
        let name = def.name.clone();
        let benefits = def.benefits.join(", ");
        let requires = def.requires.clone();

        if self.state.has_completed(research_id) {
            return Err(self.reject(ActionError::ResearchAlreadyCompleted));
        }
        if !prerequisites_met(&requires, &self.state.completed_research) {
            return Err(self.reject(ActionError::ResearchLocked));
        }
        if !self.state.resources.can_afford(ResourceKind::Research, cost) {
            return Err(self.reject(ActionError::InsufficientResearch { needed: cost }));
        }

        self.state.resources.spend(ResourceKind::Research, cost);
        self.state.completed_research.push(research_id.to_string());
        self.apply_effects(research_id);
        self.recompute_rates();
        self.unlock_achievement(ids::RESEARCHER);

        self.notifications
            .success(format!("Completed research: {}", name));
        if !benefits.is_empty() {
            self.notifications
                .success(format!("Research benefits applied: {}", benefits));
        }
        log::info!("research completed: {}", research_id);
        Ok(())
    }

    /// Update player name and settings from the settings form. A blank name
    /// falls back to the default.
    pub fn update_settings(&mut self, player_name: &str, settings: Settings) {
        let trimmed = player_name.trim();
        self.state.player.name = if trimmed.is_empty() {
            "Cosmic Gardener".to_string()
        } else {
            trimmed.to_string()
        };
        self.state.settings = settings;
        self.notifications.success("Settings saved successfully");
    }

    // ── Persistence ─────────────────────────────────────────────────────

    pub fn consent(&self) -> ConsentState {
        self.consent
    }

    /// Record the player's persistence decision, both here and in the store.
    pub fn set_consent(
        &mut self,
        store: &mut dyn KvStore,
        consent: ConsentState,
    ) -> Result<(), SaveError> {
        persistence::store_consent(store, consent)?;
        self.consent = consent;
        match consent {
            ConsentState::Accepted => self
                .notifications
                .success("Consent accepted. Your game progress will be saved."),
            ConsentState::Declined => self
                .notifications
                .warning("Consent declined. Your game progress will not be saved."),
            ConsentState::Unset => {}
        }
        Ok(())
    }

    /// Write the whole state as one JSON blob. Returns `Ok(false)` when
    /// consent suppresses the write.
    pub fn save(&mut self, store: &mut dyn KvStore, now_ms: u64) -> Result<bool, SaveError> {
        self.state.last_save_ms = now_ms;
        match persistence::save_game(store, &self.state, self.consent) {
            Ok(saved) => Ok(saved),
            Err(err) => {
                self.notifications.error("Failed to save game");
                Err(err)
            }
        }
    }

    /// Wipe the save and start over. Consent is kept; the catalog is reloaded
    /// so research-scaled stats return to their data-file values.
    pub fn reset(&mut self, store: &mut dyn KvStore, now_ms: u64) -> Result<(), SaveError> {
        persistence::clear_save(store);
        self.catalog = Catalog::load()?;
        self.state = GameState::new_game(now_ms);
        self.unlocked_achievements.clear();
        self.paused = false;
        self.discover("cosmo_bloom");
        self.notifications.success("Game has been reset");
        Ok(())
    }

    // ── Read access for the presentation boundary ───────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn plots(&self) -> &[Plot] {
        &self.state.garden
    }

    pub fn plot(&self, index: usize) -> Option<&Plot> {
        self.state.garden.get(index)
    }

    pub fn environment(&self) -> &Environment {
        &self.state.environment
    }

    pub fn resource_rates(&self) -> &ResourceRates {
        &self.state.resource_rates
    }

    pub fn discovered_plants(&self) -> &[String] {
        &self.state.discovered_plants
    }

    pub fn completed_research(&self) -> &[String] {
        &self.state.completed_research
    }

    /// Environment multiplier for the plant in a plot, if any.
    pub fn plot_multiplier(&self, index: usize) -> Option<f64> {
        let plot = self.state.garden.get(index)?;
        let plant = self.catalog.plant(plot.plant_id.as_deref()?)?;
        Some(environment_multiplier(
            &plant.optimal_conditions,
            plant.tolerance,
            &self.state.environment,
        ))
    }

    /// Coarse compatibility cue for a plot, for the garden display.
    pub fn plot_compatibility(&self, index: usize) -> Option<Compatibility> {
        self.plot_multiplier(index).map(Compatibility::from_multiplier)
    }

    /// Current growth-stage name for a plot's plant.
    pub fn plot_stage(&self, index: usize) -> Option<&str> {
        let plot = self.state.garden.get(index)?;
        let plant = self.catalog.plant(plot.plant_id.as_deref()?)?;
        let stage = growth::stage_index(plot.growth_progress, plant.stages.len());
        plant.stages.get(stage).map(String::as_str)
    }

    /// A node is unlocked once all its prerequisites are completed.
    pub fn research_unlocked(&self, research_id: &str) -> bool {
        self.catalog
            .research(research_id)
            .is_some_and(|def| prerequisites_met(&def.requires, &self.state.completed_research))
    }

    /// Unlocked-but-not-completed nodes, cheapest first.
    pub fn available_research(&self) -> Vec<&ResearchDef> {
        let mut nodes: Vec<&ResearchDef> = self
            .catalog
            .research_nodes()
            .filter(|def| {
                !self.state.has_completed(&def.id)
                    && prerequisites_met(&def.requires, &self.state.completed_research)
            })
            .collect();
        nodes.sort_by_key(|def| def.cost);
        nodes
    }

    /// Discovered plants the player can currently afford to plant.
    pub fn plantable(&self) -> Vec<&PlantDef> {
        let mut plants: Vec<&PlantDef> = self
            .catalog
            .plants()
            .filter(|p| {
                self.state.has_discovered(&p.id)
                    && self.state.resources.can_afford(ResourceKind::Seeds, p.seed_cost)
            })
            .collect();
        plants.sort_by_key(|p| p.seed_cost);
        plants
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.unlocked_achievements.contains(id)
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Push the user-facing rejection and hand the error back unchanged.
    fn reject(&mut self, err: ActionError) -> ActionError {
        let message = err.to_string();
        match err {
            ActionError::NotReady
            | ActionError::PlotEmpty
            | ActionError::ResearchAlreadyCompleted => self.notifications.warning(message),
            _ => self.notifications.error(message),
        }
        err
    }

    fn discover(&mut self, plant_id: &str) {
        if self.state.has_discovered(plant_id) {
            return;
        }
        self.state.discovered_plants.push(plant_id.to_string());
        if let Some(plant) = self.catalog.plant(plant_id) {
            self.notifications
                .success(format!("New plant discovered: {}", plant.name));
        }
        if self.state.discovered_plants.len() >= achievements::COLLECTOR_THRESHOLD {
            self.unlock_achievement(ids::PLANT_COLLECTOR);
        }
    }

    fn unlock_achievement(&mut self, id: &str) {
        if self.unlocked_achievements.contains(id) {
            return;
        }
        let Some(def) = self.catalog.achievement(id) else {
            return;
        };
        let name = def.name.clone();
        self.unlocked_achievements.insert(id.to_string());
        self.notifications
            .success(format!("Achievement unlocked: {}", name));
    }

    fn check_garden_master(&mut self) {
        if self.state.garden.iter().all(|plot| !plot.is_empty()) {
            self.unlock_achievement(ids::GARDEN_MASTER);
        }
    }

    fn apply_effects(&mut self, research_id: &str) {
        for effect in effects_for(research_id) {
            match effect {
                ResearchEffect::DiscoverPlant(plant_id) => self.discover(plant_id),
                ResearchEffect::ScaleGrowthTimes(factor) => {
                    self.catalog.scale_growth_times(*factor)
                }
                ResearchEffect::ScaleYields(kind, factor) => {
                    self.catalog.scale_yields(*kind, *factor)
                }
            }
        }
    }

    /// The catalog resets to data-file values on every launch, so completed
    /// research must be re-applied for its stat scaling to persist across
    /// sessions. Discovery effects are no-ops here (already in the save).
    fn reapply_completed_research(&mut self) {
        let completed = self.state.completed_research.clone();
        for research_id in &completed {
            self.apply_effects(research_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GardenEngine {
        GardenEngine::new(0).expect("catalog must load")
    }

    /// Plant cosmo_bloom (optimal at the default 50/50/50 environment) in
    /// plot 0 and drain the setup notifications.
    fn engine_with_cosmo() -> GardenEngine {
        let mut e = engine();
        e.plant(0, "cosmo_bloom").unwrap();
        e.drain_notifications();
        e
    }

    #[test]
    fn test_new_game_discovers_cosmo_bloom() {
        let e = engine();
        assert_eq!(e.discovered_plants(), ["cosmo_bloom".to_string()]);
    }

    #[test]
    fn test_plant_deducts_exact_seed_cost() {
        let mut e = engine();
        let before = e.state().resources.seeds;
        e.plant(0, "cosmo_bloom").unwrap();
        assert_eq!(e.state().resources.seeds, before - 5.0);
    }

    #[test]
    fn test_plant_rejects_occupied_plot() {
        let mut e = engine_with_cosmo();
        let seeds_before = e.state().resources.seeds;
        let err = e.plant(0, "cosmo_bloom").unwrap_err();
        assert_eq!(err, ActionError::PlotOccupied);
        assert_eq!(e.state().resources.seeds, seeds_before);
    }

    #[test]
    fn test_plant_insufficient_seeds_is_atomic() {
        let mut e = engine();
        e.state.resources.seeds = 4.0;
        let err = e.plant(0, "cosmo_bloom").unwrap_err();
        assert_eq!(err, ActionError::InsufficientSeeds { needed: 5 });
        assert_eq!(e.state().resources.seeds, 4.0);
        assert!(e.plot(0).unwrap().is_empty());
    }

    #[test]
    fn test_plant_unknown_id_rejected() {
        let mut e = engine();
        assert!(matches!(
            e.plant(0, "space_kudzu"),
            Err(ActionError::UnknownPlant(_))
        ));
    }

    #[test]
    fn test_growth_reaches_exactly_100_at_optimal() {
        // growth_time 60s, optimal environment, one 60s delta.
        let mut e = engine_with_cosmo();
        e.tick(60_000);
        assert_eq!(e.plot(0).unwrap().growth_progress, 100.0);
    }

    #[test]
    fn test_growth_is_monotone_and_clamped() {
        let mut e = engine_with_cosmo();
        let mut last = 0.0;
        for second in 1..=90u64 {
            e.tick(second * 1000);
            let progress = e.plot(0).unwrap().growth_progress;
            assert!(progress >= last);
            assert!(progress <= 100.0);
            last = progress;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn test_harvest_rejected_below_100() {
        let mut e = engine_with_cosmo();
        // 59.94s of growth: progress 99.9
        e.tick(59_940);
        let progress = e.plot(0).unwrap().growth_progress;
        assert!(progress < 100.0);

        let resources_before = e.state().resources;
        let err = e.harvest(0).unwrap_err();
        assert_eq!(err, ActionError::NotReady);
        assert_eq!(e.plot(0).unwrap().growth_progress, progress);
        // Only rate accrual may differ; harvest credited nothing.
        assert_eq!(e.state().resources, resources_before);
    }

    #[test]
    fn test_harvest_empty_plot_rejected() {
        let mut e = engine();
        assert_eq!(e.harvest(3).unwrap_err(), ActionError::PlotEmpty);
    }

    #[test]
    fn test_harvest_credits_floor_of_scaled_yield() {
        // Optimal environment: multiplier 1.0, yieldMultiplier 1.0, so the
        // cosmo_bloom base yield is credited exactly.
        let mut e = engine_with_cosmo();
        e.tick(60_000);
        let energy_before = e.state().resources.energy;

        let credited = e.harvest(0).unwrap();
        assert_eq!(credited.energy, 10);
        assert_eq!(credited.minerals, 5);
        assert_eq!(credited.seeds, 2);
        assert_eq!(credited.research, 1);
        assert_eq!(e.state().resources.energy, energy_before + 10.0);

        let plot = e.plot(0).unwrap();
        assert!(plot.is_empty());
        assert_eq!(plot.growth_progress, 0.0);
        assert_eq!(plot.harvested, 1);
    }

    #[test]
    fn test_mature_plot_produces_rate_until_harvested() {
        let mut e = engine_with_cosmo();
        e.tick(60_000);
        // Rates rebuilt at maturity: 10/60 energy per second.
        assert!((e.resource_rates().energy - 10.0 / 60.0).abs() < 1e-9);

        let energy_before = e.state().resources.energy;
        e.tick(66_000);
        assert!((e.state().resources.energy - energy_before - 1.0).abs() < 1e-9);

        e.harvest(0).unwrap();
        assert_eq!(e.resource_rates().energy, 0.0);
    }

    #[test]
    fn test_environment_change_recomputes_rates() {
        let mut e = engine_with_cosmo();
        e.tick(60_000);
        let optimal_rate = e.resource_rates().energy;

        e.set_environment(EnvironmentAxis::Radiation, 100);
        assert!(e.resource_rates().energy < optimal_rate);
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut e = engine_with_cosmo();
        e.pause();
        e.tick(30_000);
        assert_eq!(e.plot(0).unwrap().growth_progress, 0.0);
    }

    #[test]
    fn test_resume_at_threshold_skips_catch_up() {
        let mut e = engine_with_cosmo();
        e.tick(60_000); // mature
        e.pause();
        // Exactly 5000ms gap: no catch-up, no lump credit.
        let energy_before = e.state().resources.energy;
        e.resume(65_000);
        assert_eq!(e.state().resources.energy, energy_before);
    }

    #[test]
    fn test_resume_past_threshold_runs_catch_up() {
        let mut e = engine_with_cosmo();
        e.pause();
        // 5001ms past a fresh planting: progress advances but nothing matures.
        e.resume(5_001);
        let progress = e.plot(0).unwrap().growth_progress;
        assert!((progress - (5.001 / 60.0) * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_offline_crossing_credits_half_yield() {
        let mut e = engine_with_cosmo();
        e.pause();
        let energy_before = e.state().resources.energy;
        // 120s offline: cosmo_bloom (60s) crosses 100 once.
        e.resume(120_000);

        let plot = e.plot(0).unwrap();
        assert_eq!(plot.growth_progress, 100.0);
        assert!(!plot.is_empty());
        // Lump at 50% efficiency: floor(10 * 0.5) = 5 energy.
        assert_eq!(e.state().resources.energy, energy_before + 5.0);
    }

    #[test]
    fn test_offline_already_mature_plot_does_not_recredit() {
        let mut e = engine_with_cosmo();
        e.tick(60_000);
        assert!(e.plot(0).unwrap().is_mature());
        let energy_before = e.state().resources.energy;

        e.pause();
        e.resume(180_000);
        // Already at 100 before the gap: no second lump.
        assert_eq!(e.state().resources.energy, energy_before);
    }

    #[test]
    fn test_research_requires_both_prerequisites() {
        let mut e = engine();
        e.state.resources.research = 10_000.0;
        // gravitic_manipulation requires mineral_extraction AND
        // radiation_harnessing.
        assert!(!e.research_unlocked("gravitic_manipulation"));

        e.complete_research("basic_cultivation").unwrap();
        e.complete_research("mineral_extraction").unwrap();
        assert!(!e.research_unlocked("gravitic_manipulation"));
        assert_eq!(
            e.complete_research("gravitic_manipulation").unwrap_err(),
            ActionError::ResearchLocked
        );

        e.complete_research("atmospheric_control").unwrap();
        e.complete_research("radiation_harnessing").unwrap();
        assert!(e.research_unlocked("gravitic_manipulation"));
        e.complete_research("gravitic_manipulation").unwrap();
    }

    #[test]
    fn test_research_deducts_cost_and_applies_effects() {
        let mut e = engine();
        let research_before = e.state().resources.research;
        let growth_before = e.catalog().plant("cosmo_bloom").unwrap().growth_time_secs;

        e.complete_research("basic_cultivation").unwrap();

        assert_eq!(e.state().resources.research, research_before - 10.0);
        assert!(e.state().has_discovered("stellar_fern"));
        assert_eq!(
            e.catalog().plant("cosmo_bloom").unwrap().growth_time_secs,
            (growth_before as f64 * 0.9).round() as u32
        );
    }

    #[test]
    fn test_research_rejects_repeat_and_insufficient_funds() {
        let mut e = engine();
        e.complete_research("basic_cultivation").unwrap();
        assert_eq!(
            e.complete_research("basic_cultivation").unwrap_err(),
            ActionError::ResearchAlreadyCompleted
        );

        e.state.resources.research = 0.0;
        assert_eq!(
            e.complete_research("mineral_extraction").unwrap_err(),
            ActionError::InsufficientResearch { needed: 25 }
        );
        assert!(!e.state().has_completed("mineral_extraction"));
    }

    #[test]
    fn test_available_research_orders_by_cost() {
        let e = engine();
        let available = e.available_research();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, "basic_cultivation");
    }

    #[test]
    fn test_achievements_fire_once() {
        let mut e = engine();
        e.plant(0, "cosmo_bloom").unwrap();
        assert!(e.has_achievement(ids::FIRST_PLANT));

        let before = e.drain_notifications().len();
        assert!(before > 0);
        e.plant(1, "cosmo_bloom").unwrap();
        let messages: Vec<String> = e
            .drain_notifications()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert!(!messages.iter().any(|m| m.contains("Achievement")));
    }

    #[test]
    fn test_garden_master_when_all_plots_filled() {
        let mut e = engine();
        e.state.resources.seeds = 1_000.0;
        for plot_index in 0..8 {
            e.plant(plot_index, "cosmo_bloom").unwrap();
        }
        assert!(!e.has_achievement(ids::GARDEN_MASTER));
        e.tick(1_000);
        assert!(e.has_achievement(ids::GARDEN_MASTER));
    }

    #[test]
    fn test_plant_collector_at_three_species() {
        let mut e = engine();
        e.state.resources.research = 1_000.0;
        e.complete_research("basic_cultivation").unwrap();
        assert!(!e.has_achievement(ids::PLANT_COLLECTOR));
        e.complete_research("mineral_extraction").unwrap();
        assert!(e.has_achievement(ids::PLANT_COLLECTOR));
    }

    #[test]
    fn test_plot_stage_follows_progress() {
        let mut e = engine_with_cosmo();
        assert_eq!(e.plot_stage(0), Some("seed"));
        e.tick(30_000);
        assert_eq!(e.plot_stage(0), Some("growth"));
        e.tick(60_000);
        assert_eq!(e.plot_stage(0), Some("bloom"));
    }

    #[test]
    fn test_plot_compatibility_cue() {
        let mut e = engine_with_cosmo();
        assert_eq!(e.plot_compatibility(0), Some(Compatibility::Excellent));
        e.set_environment(EnvironmentAxis::Radiation, 0);
        e.set_environment(EnvironmentAxis::Gravity, 100);
        assert!(e.plot_compatibility(0).is_some());
        assert_ne!(e.plot_compatibility(0), Some(Compatibility::Excellent));
    }

    #[test]
    fn test_update_settings_blank_name_falls_back() {
        let mut e = engine();
        e.update_settings("   ", Settings::default());
        assert_eq!(e.state().player.name, "Cosmic Gardener");
        e.update_settings("  Nova  ", Settings::default());
        assert_eq!(e.state().player.name, "Nova");
    }
}
