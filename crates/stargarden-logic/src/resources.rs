//! Resource pool, per-second rate table, and atomic spend/credit.

use serde::{Deserialize, Serialize};

/// The four resource counters. Stored as `f64` because rate-based accrual
/// credits fractional amounts; displays floor them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub energy: f64,
    pub minerals: f64,
    pub seeds: f64,
    pub research: f64,
}

impl Default for ResourcePool {
    /// Starting resources for a new game.
    fn default() -> Self {
        Self {
            energy: 50.0,
            minerals: 30.0,
            seeds: 200.0,
            research: 200.0,
        }
    }
}

/// One of the four resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Energy,
    Minerals,
    Seeds,
    Research,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Energy,
        ResourceKind::Minerals,
        ResourceKind::Seeds,
        ResourceKind::Research,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Energy => "energy",
            ResourceKind::Minerals => "minerals",
            ResourceKind::Seeds => "seeds",
            ResourceKind::Research => "research",
        }
    }
}

/// Whole-number resource amounts: plant yields, harvest credits, costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDelta {
    pub energy: u32,
    pub minerals: u32,
    pub seeds: u32,
    pub research: u32,
}

impl ResourceDelta {
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Energy => self.energy,
            ResourceKind::Minerals => self.minerals,
            ResourceKind::Seeds => self.seeds,
            ResourceKind::Research => self.research,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.energy == 0 && self.minerals == 0 && self.seeds == 0 && self.research == 0
    }
}

/// Per-second production rates, derived state rebuilt from mature plots on
/// every update. Also reused as a fractional per-resource accumulator for
/// offline lump sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRates {
    pub energy: f64,
    pub minerals: f64,
    pub seeds: f64,
    pub research: f64,
}

impl ResourceRates {
    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Energy => self.energy,
            ResourceKind::Minerals => self.minerals,
            ResourceKind::Seeds => self.seeds,
            ResourceKind::Research => self.research,
        }
    }

    pub fn add(&mut self, other: &ResourceRates) {
        self.energy += other.energy;
        self.minerals += other.minerals;
        self.seeds += other.seeds;
        self.research += other.research;
    }

    /// Floor each per-resource total down to whole units.
    pub fn floored(&self) -> ResourceDelta {
        ResourceDelta {
            energy: self.energy.max(0.0).floor() as u32,
            minerals: self.minerals.max(0.0).floor() as u32,
            seeds: self.seeds.max(0.0).floor() as u32,
            research: self.research.max(0.0).floor() as u32,
        }
    }
}

impl ResourcePool {
    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Energy => self.energy,
            ResourceKind::Minerals => self.minerals,
            ResourceKind::Seeds => self.seeds,
            ResourceKind::Research => self.research,
        }
    }

    pub fn can_afford(&self, kind: ResourceKind, amount: u32) -> bool {
        self.get(kind) >= amount as f64
    }

    /// Deduct `amount` of `kind` if available. Returns false (and leaves the
    /// pool untouched) when the balance is insufficient.
    pub fn spend(&mut self, kind: ResourceKind, amount: u32) -> bool {
        if !self.can_afford(kind, amount) {
            return false;
        }
        let slot = match kind {
            ResourceKind::Energy => &mut self.energy,
            ResourceKind::Minerals => &mut self.minerals,
            ResourceKind::Seeds => &mut self.seeds,
            ResourceKind::Research => &mut self.research,
        };
        *slot -= amount as f64;
        true
    }

    pub fn credit(&mut self, delta: &ResourceDelta) {
        self.energy += delta.energy as f64;
        self.minerals += delta.minerals as f64;
        self.seeds += delta.seeds as f64;
        self.research += delta.research as f64;
    }

    /// Rate-based accrual over one tick: `resources += rate * delta`.
    pub fn accrue(&mut self, rates: &ResourceRates, delta_secs: f64) {
        self.energy += rates.energy * delta_secs;
        self.minerals += rates.minerals * delta_secs;
        self.seeds += rates.seeds * delta_secs;
        self.research += rates.research * delta_secs;
    }
}
