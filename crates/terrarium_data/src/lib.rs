//! Plain data shared by the Terrarium engine and anything that consumes its snapshots.
//!
//! Nothing in this crate simulates; behavior lives in `terrarium_core`.

pub mod data;

pub use data::entity::{
    Behavior, Genome, Identity, Metabolism, Organism, PlacementMode, Position, Velocity,
};
pub use data::environment::{
    DeathCause, EnhancedStats, Food, LiveEvent, Obstacle, Particle, PopulationStats, Trend,
};
pub use data::genotype::{Dna, Species, Trait};
