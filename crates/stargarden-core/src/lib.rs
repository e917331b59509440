//! Stargarden simulation engine.
//!
//! Owns the garden game state as an explicit context ([`engine::GardenEngine`])
//! and drives all mutation: the 1 Hz live tick, offline catch-up, and the
//! discrete player actions (plant, harvest, environment, research). The
//! presentation layer is an external collaborator: it reads state through the
//! engine's accessors, issues commands, and drains the notification queue.

pub mod achievements;
pub mod catalog;
pub mod effects;
pub mod engine;
pub mod errors;
pub mod notify;
pub mod persistence;
pub mod state;

pub use engine::GardenEngine;
