//! Pure simulation logic for Stargarden.
//!
//! This crate contains all garden-simulation math that is independent of any
//! storage, catalog, or host runtime. Functions take plain data and return
//! results, making them unit-testable and portable between the engine crate
//! and the headless simtest harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Plot count, maturity threshold, offline thresholds |
//! | [`environment`] | Environment sliders and the closeness-to-optimal multiplier |
//! | [`growth`] | Growth-progress advancement and stage display math |
//! | [`harvest`] | Discrete harvest yields, continuous production rates, offline lumps |
//! | [`research`] | Prerequisite gating over the fixed research graph |
//! | [`resources`] | Resource pool, per-second rate table, atomic spend/credit |

pub mod constants;
pub mod environment;
pub mod growth;
pub mod harvest;
pub mod research;
pub mod resources;
