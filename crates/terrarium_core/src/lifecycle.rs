use crate::config::{AppConfig, MetabolismConfig, ReproductionConfig};
use crate::genetics::generate_founder_dna;
use rand::Rng;
use std::collections::VecDeque;
use terrarium_data::{
    Behavior, DeathCause, Dna, Genome, Identity, Metabolism, Organism, Position, Species,
    Velocity,
};
use uuid::Uuid;

/// Energy capacity fixed at birth: `base + size · per_size`.
#[must_use]
pub fn max_energy_for(dna: &Dna, config: &MetabolismConfig) -> f64 {
    config.max_energy_base + dna.size * config.max_energy_per_size
}

/// Collision radius, derived from size and the current energy ratio, never below the floor.
#[must_use]
pub fn radius_components(metabolism: &Metabolism, dna: &Dna, config: &MetabolismConfig) -> f64 {
    let full = config.radius_base + dna.size * config.radius_per_size;
    (full * metabolism.energy_ratio().sqrt()).max(config.radius_min)
}

#[must_use]
pub fn radius(organism: &Organism, config: &MetabolismConfig) -> f64 {
    radius_components(&organism.metabolism, &organism.genome.dna, config)
}

fn new_identity<R: Rng>(
    serial: u64,
    parent_id: Option<Uuid>,
    generation: u32,
    rng: &mut R,
) -> Identity {
    Identity {
        id: Uuid::from_u128(rng.gen::<u128>()),
        serial,
        parent_id,
        generation,
    }
}

fn assemble(
    identity: Identity,
    x: f64,
    y: f64,
    genome: Genome,
    energy: f64,
    max_energy: f64,
) -> Organism {
    Organism {
        identity,
        position: Position::new(x, y),
        velocity: Velocity::default(),
        metabolism: Metabolism {
            energy,
            max_energy,
            age: 0,
            cooldown: 0,
            offspring_count: 0,
        },
        genome,
        behavior: Behavior {
            target: None,
            trail: VecDeque::new(),
        },
    }
}

/// Builds a generation-0 organism with freshly drawn founder traits.
pub fn create_founder_with_rng<R: Rng>(
    x: f64,
    y: f64,
    species: Species,
    serial: u64,
    config: &AppConfig,
    rng: &mut R,
) -> Organism {
    let dna = generate_founder_dna(rng);
    let identity = new_identity(serial, None, 0, rng);
    let max_energy = max_energy_for(&dna, &config.metabolism);
    let energy = max_energy * config.population.founder_energy_fraction;
    assemble(identity, x, y, Genome { species, dna }, energy, max_energy)
}

/// Parameters of a child that has already been given its traits and position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffspringSpec {
    pub parent_id: Uuid,
    pub species: Species,
    pub generation: u32,
    pub dna: Dna,
    pub x: f64,
    pub y: f64,
    /// Energy paid by the parent for this birth.
    pub cost: f64,
}

/// Builds an offspring; the starting energy is a fraction of the paid cost, capped at capacity.
pub fn create_offspring_with_rng<R: Rng>(
    spec: &OffspringSpec,
    serial: u64,
    config: &AppConfig,
    rng: &mut R,
) -> Organism {
    let identity = new_identity(serial, Some(spec.parent_id), spec.generation, rng);
    let max_energy = max_energy_for(&spec.dna, &config.metabolism);
    let energy = (spec.cost * config.reproduction.offspring_energy_fraction).min(max_energy);
    let genome = Genome {
        species: spec.species,
        dna: spec.dna,
    };
    assemble(identity, spec.x, spec.y, genome, energy, max_energy)
}

#[must_use]
pub fn is_mature(metabolism: &Metabolism, config: &ReproductionConfig) -> bool {
    metabolism.age > config.maturity_age
}

/// `energy > threshold`, no cooldown, and strictly older than the maturity age.
#[must_use]
pub fn is_reproduction_eligible(
    metabolism: &Metabolism,
    dna: &Dna,
    config: &ReproductionConfig,
) -> bool {
    metabolism.energy > dna.reproduction_threshold
        && metabolism.cooldown == 0
        && is_mature(metabolism, config)
}

/// Energy the parent pays for one reproduction attempt.
#[must_use]
pub fn reproduction_cost(dna: &Dna, config: &ReproductionConfig) -> f64 {
    config.cost_fraction * dna.reproduction_threshold
}

/// Natural death check. Predation is decided by the interaction resolver.
#[must_use]
pub fn death_cause(metabolism: &Metabolism, dna: &Dna) -> Option<DeathCause> {
    if metabolism.energy <= 0.0 {
        Some(DeathCause::Starvation)
    } else if metabolism.age as f64 > dna.lifespan {
        Some(DeathCause::OldAge)
    } else {
        None
    }
}
