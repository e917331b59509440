//! Static plant, research, and achievement catalogs.
//!
//! Definitions live in JSON data files embedded at compile time and are keyed
//! by id for O(1) lookup. Plant stats are immutable at runtime except through
//! research effects, which scale growth times or yields in place.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stargarden_logic::environment::OptimalConditions;
use stargarden_logic::resources::{ResourceDelta, ResourceKind};

const PLANTS_JSON: &str = include_str!("../../../data/plants.json");
const RESEARCH_JSON: &str = include_str!("../../../data/research.json");
const ACHIEVEMENTS_JSON: &str = include_str!("../../../data/achievements.json");

/// Seed cost and yield scaling applied to rare plants by the balance pass.
const RARE_BALANCE_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

/// One catalog entry for a plantable species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub growth_time_secs: u32,
    /// Ordered stage names, for the presentation layer's growth display.
    pub stages: Vec<String>,
    pub optimal_conditions: OptimalConditions,
    pub tolerance: u8,
    #[serde(rename = "yield")]
    pub yield_amounts: ResourceDelta,
    pub yield_multiplier: f64,
    pub unlock_level: u32,
    pub seed_cost: u32,
}

/// One node in the research graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u32,
    /// Human-readable benefit lines, surfaced in notifications.
    pub benefits: Vec<String>,
    /// Ids of research that must be completed first.
    pub requires: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// All static game data, loaded once per engine.
#[derive(Debug, Clone)]
pub struct Catalog {
    plants: HashMap<String, PlantDef>,
    research: HashMap<String, ResearchDef>,
    achievements: HashMap<String, AchievementDef>,
}

impl Catalog {
    /// Parse the embedded data files and run the balance pass.
    pub fn load() -> Result<Self, serde_json::Error> {
        let plant_list: Vec<PlantDef> = serde_json::from_str(PLANTS_JSON)?;
        let research_list: Vec<ResearchDef> = serde_json::from_str(RESEARCH_JSON)?;
        let achievement_list: Vec<AchievementDef> = serde_json::from_str(ACHIEVEMENTS_JSON)?;

        let mut catalog = Self {
            plants: plant_list.into_iter().map(|p| (p.id.clone(), p)).collect(),
            research: research_list
                .into_iter()
                .map(|r| (r.id.clone(), r))
                .collect(),
            achievements: achievement_list
                .into_iter()
                .map(|a| (a.id.clone(), a))
                .collect(),
        };
        catalog.apply_balance();
        Ok(catalog)
    }

    /// Rare plants cost more and yield more than their data-file values.
    fn apply_balance(&mut self) {
        for plant in self.plants.values_mut() {
            if plant.rarity == Rarity::Rare {
                plant.seed_cost = scale_round(plant.seed_cost, RARE_BALANCE_FACTOR);
                for kind in ResourceKind::ALL {
                    scale_yield(&mut plant.yield_amounts, kind, RARE_BALANCE_FACTOR);
                }
            }
        }
    }

    pub fn plant(&self, id: &str) -> Option<&PlantDef> {
        self.plants.get(id)
    }

    pub fn plants(&self) -> impl Iterator<Item = &PlantDef> {
        self.plants.values()
    }

    pub fn plant_count(&self) -> usize {
        self.plants.len()
    }

    pub fn research(&self, id: &str) -> Option<&ResearchDef> {
        self.research.get(id)
    }

    pub fn research_nodes(&self) -> impl Iterator<Item = &ResearchDef> {
        self.research.values()
    }

    pub fn achievement(&self, id: &str) -> Option<&AchievementDef> {
        self.achievements.get(id)
    }

    pub fn achievements(&self) -> impl Iterator<Item = &AchievementDef> {
        self.achievements.values()
    }

    /// Research effect: scale every plant's growth duration (e.g. 0.9 for the
    /// 10% cultivation speedup), rounded to whole seconds.
    pub fn scale_growth_times(&mut self, factor: f64) {
        for plant in self.plants.values_mut() {
            plant.growth_time_secs = scale_round(plant.growth_time_secs, factor);
        }
    }

    /// Research effect: scale one resource's yield across every plant,
    /// rounded to whole units.
    pub fn scale_yields(&mut self, kind: ResourceKind, factor: f64) {
        for plant in self.plants.values_mut() {
            scale_yield(&mut plant.yield_amounts, kind, factor);
        }
    }
}

fn scale_round(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).round() as u32
}

fn scale_yield(amounts: &mut ResourceDelta, kind: ResourceKind, factor: f64) {
    let slot = match kind {
        ResourceKind::Energy => &mut amounts.energy,
        ResourceKind::Minerals => &mut amounts.minerals,
        ResourceKind::Seeds => &mut amounts.seeds,
        ResourceKind::Research => &mut amounts.research,
    };
    *slot = scale_round(*slot, factor);
}
