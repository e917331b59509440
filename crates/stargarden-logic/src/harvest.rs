//! Yield math: discrete harvests, continuous production rates, offline lumps.
//!
//! Two accrual mechanisms coexist: mature plots feed a per-second rate table
//! while the game ticks live, and offline catch-up credits a one-time lump
//! sum at half efficiency instead.

use crate::constants::{OFFLINE_EFFICIENCY, PRODUCTION_DIVISOR};
use crate::resources::{ResourceDelta, ResourceRates};

/// Resources credited by an explicit harvest: `floor(yield * ym * em)` per
/// resource. Non-negative by construction.
pub fn harvest_yield(
    base: &ResourceDelta,
    yield_multiplier: f64,
    env_multiplier: f64,
) -> ResourceDelta {
    let m = yield_multiplier * env_multiplier;
    ResourceDelta {
        energy: (base.energy as f64 * m).floor() as u32,
        minerals: (base.minerals as f64 * m).floor() as u32,
        seeds: (base.seeds as f64 * m).floor() as u32,
        research: (base.research as f64 * m).floor() as u32,
    }
}

/// Per-second production contributed by one mature plot: `yield * ym * em / 60`
/// for each resource.
pub fn production_rates(
    base: &ResourceDelta,
    yield_multiplier: f64,
    env_multiplier: f64,
) -> ResourceRates {
    let m = yield_multiplier * env_multiplier / PRODUCTION_DIVISOR;
    ResourceRates {
        energy: base.energy as f64 * m,
        minerals: base.minerals as f64 * m,
        seeds: base.seeds as f64 * m,
        research: base.research as f64 * m,
    }
}

/// Fractional per-resource lump for one plot that matured during offline
/// catch-up, at the flat offline penalty. The caller sums these across plots
/// and floors the totals before crediting.
pub fn offline_yield(
    base: &ResourceDelta,
    yield_multiplier: f64,
    env_multiplier: f64,
) -> ResourceRates {
    let m = yield_multiplier * env_multiplier * OFFLINE_EFFICIENCY;
    ResourceRates {
        energy: base.energy as f64 * m,
        minerals: base.minerals as f64 * m,
        seeds: base.seeds as f64 * m,
        research: base.research as f64 * m,
    }
}
