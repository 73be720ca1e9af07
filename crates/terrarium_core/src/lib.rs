//! # Terrarium Core
//!
//! The simulation rules for Terrarium, an artificial-life arena in which
//! herbivores, carnivores and omnivores forage, hunt, breed and die.
//!
//! This crate contains the deterministic, storage-agnostic logic:
//! - Heritable trait vectors with crossover, mutation and clamping
//! - Organism lifecycle helpers (founders, offspring, radius, death)
//! - Arena geometry and obstacle placement
//! - Per-turn systems: behavior, movement, metabolism, feeding, predation, reproduction
//! - Population and evolutionary statistics
//! - Spatial hashing and metrics collection
//!
//! ## Architecture
//!
//! Systems are pure functions over organism components. The world that owns
//! the entities (see the `terrarium` crate) copies one organism's components
//! out, runs the systems, writes the result back and applies the returned
//! [`interaction::InteractionCommand`]s before the next organism's turn.
//! Every stochastic function takes an explicit `Rng`, so a seeded
//! `ChaCha8Rng` makes a run reproducible.
//!
//! ## Example
//!
//! ```
//! use terrarium_core::genetics::{is_within_bounds, DnaLogic};
//! use terrarium_data::Dna;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let a = Dna::new_founder_with_rng(&mut rng);
//! let b = Dna::new_founder_with_rng(&mut rng);
//! let child = a.crossover_with_rng(&b, &mut rng);
//! assert!(is_within_bounds(&child));
//! ```

/// Arena bounds, obstacles and random placement
pub mod arena;
/// Configuration management for simulation parameters
pub mod config;
/// Day-night cycle
pub mod environment;
/// Rejected-request error type
pub mod error;
/// Trait vector generation, crossover and mutation
pub mod genetics;
/// Views and commands exchanged between systems and the world
pub mod interaction;
/// Organism creation, sizing and death rules
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Serializable world snapshots for renderers and statistics
pub mod snapshot;
/// Spatial hashing for proximity queries
pub mod spatial_hash;
/// Per-turn simulation systems
pub mod systems;

pub use arena::ObstacleLogic;
pub use error::SimError;
pub use genetics::DnaLogic;
pub use metrics::Metrics;
