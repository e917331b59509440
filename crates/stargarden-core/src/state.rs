//! The flat game-state record — the single persisted blob.
//!
//! Every field carries a serde default so a partial or older save shallow-
//! merges onto a fresh state instead of failing to load.

use serde::{Deserialize, Serialize};
use stargarden_logic::constants::{MIN_SEEDS, PLOT_COUNT};
use stargarden_logic::environment::Environment;
use stargarden_logic::growth;
use stargarden_logic::resources::{ResourcePool, ResourceRates};

/// Bumped when the persisted layout changes. A mismatch on load is only
/// logged; no migration transform is applied.
pub const GAME_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInfo {
    pub name: String,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
}

impl Default for PlayerInfo {
    fn default() -> Self {
        Self {
            name: "Gardener".to_string(),
            level: 1,
            experience: 0,
            experience_to_next_level: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            notifications_enabled: true,
            debug_mode: false,
        }
    }
}

/// One of the eight fixed garden slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plot {
    pub plant_id: Option<String>,
    /// 0-100 percentage toward maturity.
    pub growth_progress: f64,
    pub planted_at_ms: Option<u64>,
    /// Harvests completed from this slot.
    pub harvested: u32,
}

impl Plot {
    pub fn is_empty(&self) -> bool {
        self.plant_id.is_none()
    }

    /// Occupied and fully grown: producing at a continuous rate, waiting for
    /// an explicit harvest.
    pub fn is_mature(&self) -> bool {
        self.plant_id.is_some() && growth::is_mature(self.growth_progress)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub player: PlayerInfo,
    pub settings: Settings,
    pub resources: ResourcePool,
    /// Derived per-second production; persisted for display continuity but
    /// rebuilt from mature plots on every update.
    pub resource_rates: ResourceRates,
    pub environment: Environment,
    pub garden: Vec<Plot>,
    pub discovered_plants: Vec<String>,
    pub completed_research: Vec<String>,
    pub last_save_ms: u64,
    pub last_update_ms: u64,
    pub version: String,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            player: PlayerInfo::default(),
            settings: Settings::default(),
            resources: ResourcePool::default(),
            resource_rates: ResourceRates::default(),
            environment: Environment::default(),
            garden: vec![Plot::default(); PLOT_COUNT],
            discovered_plants: Vec::new(),
            completed_research: Vec::new(),
            last_save_ms: 0,
            last_update_ms: 0,
            version: GAME_VERSION.to_string(),
        }
    }
}

impl GameState {
    /// Fresh state for a brand new game, stamped with the current time.
    pub fn new_game(now_ms: u64) -> Self {
        Self {
            last_save_ms: now_ms,
            last_update_ms: now_ms,
            ..Default::default()
        }
    }

    /// Repair invariants after deserializing an arbitrary blob: the garden
    /// always has exactly [`PLOT_COUNT`] slots, and the seed balance is
    /// topped up so the player can always plant something.
    pub fn normalize(&mut self) {
        self.garden.resize_with(PLOT_COUNT, Plot::default);
        self.resources.seeds = self.resources.seeds.max(MIN_SEEDS);
    }

    pub fn has_discovered(&self, plant_id: &str) -> bool {
        self.discovered_plants.iter().any(|id| id == plant_id)
    }

    pub fn has_completed(&self, research_id: &str) -> bool {
        self.completed_research.iter().any(|id| id == research_id)
    }
}
