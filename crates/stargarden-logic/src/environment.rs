//! Garden environment sliders and the closeness-to-optimal multiplier.

use serde::{Deserialize, Serialize};

use crate::constants::{AXIS_MAX, MIN_MULTIPLIER, TOLERANCE_FALLOFF};

/// The three player-controlled environment sliders, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub radiation: u8,
    pub gravity: u8,
    pub atmosphere: u8,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            radiation: 50,
            gravity: 50,
            atmosphere: 50,
        }
    }
}

/// A plant's preferred environment triple, same 0-100 scale as [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalConditions {
    pub radiation: u8,
    pub gravity: u8,
    pub atmosphere: u8,
}

/// One of the three environment sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentAxis {
    Radiation,
    Gravity,
    Atmosphere,
}

impl Environment {
    pub fn get(&self, axis: EnvironmentAxis) -> u8 {
        match axis {
            EnvironmentAxis::Radiation => self.radiation,
            EnvironmentAxis::Gravity => self.gravity,
            EnvironmentAxis::Atmosphere => self.atmosphere,
        }
    }

    /// Set one slider, clamped to the 0-100 range.
    pub fn set(&mut self, axis: EnvironmentAxis, value: u8) {
        let value = value.min(AXIS_MAX);
        match axis {
            EnvironmentAxis::Radiation => self.radiation = value,
            EnvironmentAxis::Gravity => self.gravity = value,
            EnvironmentAxis::Atmosphere => self.atmosphere = value,
        }
    }
}

/// Yield/growth-rate scaling factor from how close the garden environment is
/// to a plant's optimal conditions.
///
/// The average absolute deviation across the three axes falls off linearly:
/// 1.0 at optimal down to 0.8 at the tolerance boundary, then from 0.8 toward
/// 0 as the deviation approaches 100. Floored at [`MIN_MULTIPLIER`].
pub fn environment_multiplier(optimal: &OptimalConditions, tolerance: u8, env: &Environment) -> f64 {
    let radiation_diff = (env.radiation as f64 - optimal.radiation as f64).abs();
    let gravity_diff = (env.gravity as f64 - optimal.gravity as f64).abs();
    let atmosphere_diff = (env.atmosphere as f64 - optimal.atmosphere as f64).abs();

    let avg_diff = (radiation_diff + gravity_diff + atmosphere_diff) / 3.0;
    let tolerance = tolerance as f64;

    let multiplier = if tolerance <= 0.0 {
        // Degenerate tolerance: only an exact match counts as "within".
        if avg_diff == 0.0 {
            1.0
        } else {
            0.8 * (1.0 - (avg_diff / 100.0).min(1.0))
        }
    } else if avg_diff <= tolerance {
        1.0 - (avg_diff / tolerance) * TOLERANCE_FALLOFF
    } else {
        let over = ((avg_diff - tolerance) / (100.0 - tolerance)).min(1.0);
        0.8 * (1.0 - over)
    };

    multiplier.max(MIN_MULTIPLIER)
}

/// Coarse compatibility rating derived from the multiplier, for the
/// presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compatibility {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Compatibility {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier >= 0.9 {
            Compatibility::Excellent
        } else if multiplier >= 0.7 {
            Compatibility::Good
        } else if multiplier >= 0.4 {
            Compatibility::Fair
        } else {
            Compatibility::Poor
        }
    }
}
