//! Simulation constants shared by the engine and the simtest harness.

/// Number of fixed garden plots.
pub const PLOT_COUNT: usize = 8;

/// Growth progress at which a plant is mature and harvestable.
pub const MATURE_PROGRESS: f64 = 100.0;

/// Environment sliders run 0-100.
pub const AXIS_MAX: u8 = 100;

/// The environment multiplier never drops below this, however hostile the garden.
pub const MIN_MULTIPLIER: f64 = 0.2;

/// Multiplier reduction across the tolerance band (1.0 at optimal down to 0.8
/// at the tolerance boundary).
pub const TOLERANCE_FALLOFF: f64 = 0.2;

/// Mature plots produce yield / 60 of each resource per second.
pub const PRODUCTION_DIVISOR: f64 = 60.0;

/// Loaded games are topped up to at least this many seeds so a player can
/// always plant something.
pub const MIN_SEEDS: f64 = 20.0;

/// Wall-clock gap that must be exceeded before offline catch-up applies.
pub const OFFLINE_THRESHOLD_MS: u64 = 5000;

/// Yields credited during offline catch-up are penalized to half efficiency.
pub const OFFLINE_EFFICIENCY: f64 = 0.5;
