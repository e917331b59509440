//! One-shot achievement ids and thresholds.
//!
//! Unlocked achievements live on the engine, not in the persisted blob; they
//! reset with the session.

pub mod ids {
    pub const FIRST_PLANT: &str = "first_plant";
    pub const FIRST_HARVEST: &str = "first_harvest";
    pub const PLANT_COLLECTOR: &str = "plant_collector";
    pub const RESEARCHER: &str = "researcher";
    pub const GARDEN_MASTER: &str = "garden_master";
}

/// Distinct species discovered before `plant_collector` unlocks.
pub const COLLECTOR_THRESHOLD: usize = 3;
