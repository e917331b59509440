//! Fixed research benefit dispatch.
//!
//! Each research node applies a hard-coded list of effects when completed.
//! With only five nodes, a static id -> effect table beats a rule engine.

use stargarden_logic::resources::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResearchEffect {
    /// Add a plant to the discovered list.
    DiscoverPlant(&'static str),
    /// Scale every plant's growth duration (rounded to whole seconds).
    ScaleGrowthTimes(f64),
    /// Scale one resource's yield across every plant (rounded).
    ScaleYields(ResourceKind, f64),
}

/// Effects for a research node. Unknown ids have none.
pub fn effects_for(research_id: &str) -> &'static [ResearchEffect] {
    match research_id {
        "basic_cultivation" => &[
            ResearchEffect::DiscoverPlant("stellar_fern"),
            ResearchEffect::ScaleGrowthTimes(0.9),
        ],
        "mineral_extraction" => &[
            ResearchEffect::DiscoverPlant("lunar_crystalite"),
            ResearchEffect::ScaleYields(ResourceKind::Minerals, 1.2),
        ],
        // Slider-effectiveness boosts from these two nodes never made it past
        // the design notes; the discovery is the whole effect.
        "atmospheric_control" => &[ResearchEffect::DiscoverPlant("nebula_pod")],
        "radiation_harnessing" => &[
            ResearchEffect::DiscoverPlant("void_orchid"),
            ResearchEffect::ScaleYields(ResourceKind::Energy, 1.3),
        ],
        "gravitic_manipulation" => &[ResearchEffect::DiscoverPlant("plasma_willow")],
        _ => &[],
    }
}
