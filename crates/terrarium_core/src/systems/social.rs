//! Predation and reproduction resolvers.

use crate::arena::{in_bounds, inside_any_obstacle};
use crate::config::{PredationConfig, ReproductionConfig};
use crate::genetics::{crossover_with_rng, genetic_distance, mutate_with_rng};
use crate::interaction::OrganismView;
use crate::lifecycle::{self, OffspringSpec};
use rand::Rng;
use std::f64::consts::TAU;
use terrarium_data::{Dna, Metabolism, Obstacle, Position, Species};
use uuid::Uuid;

/// Carnivores always; omnivores only above the attack threshold.
///
/// Deliberately stricter than the hunting threshold used for targeting.
#[must_use]
pub fn is_predator(species: Species, dna: &Dna, config: &PredationConfig) -> bool {
    match species {
        Species::Carnivore => true,
        Species::Omnivore => dna.aggression > config.attack_aggression,
        Species::Herbivore => false,
    }
}

#[must_use]
pub fn is_eligible_prey<H>(
    predator_radius: f64,
    prey: &OrganismView<H>,
    config: &PredationConfig,
) -> bool {
    prey.species == Species::Herbivore || prey.radius < config.prey_size_ratio * predator_radius
}

/// Index of the first colliding, eligible prey the predator can overpower.
pub fn select_prey<H>(
    position: Position,
    radius: f64,
    energy: f64,
    others: &[OrganismView<H>],
    config: &PredationConfig,
) -> Option<usize> {
    others.iter().position(|prey| {
        position.distance_to(&prey.position) < radius + prey.radius
            && is_eligible_prey(radius, prey, config)
            && energy > prey.energy
    })
}

/// `min(fraction · prey_energy, headroom)`, never negative.
#[must_use]
pub fn predation_gain(predator: &Metabolism, prey_energy: f64, config: &PredationConfig) -> f64 {
    let headroom = (predator.max_energy - predator.energy).max(0.0);
    (config.energy_gain_fraction * prey_energy.max(0.0)).min(headroom)
}

/// First same-species, fertile organism within mate range.
pub fn find_mate<'a, H>(
    species: Species,
    position: Position,
    others: &'a [OrganismView<H>],
    config: &ReproductionConfig,
) -> Option<&'a OrganismView<H>> {
    others.iter().find(|o| {
        o.species == species && o.fertile && position.distance_to(&o.position) <= config.mate_range
    })
}

/// The reproducing organism.
#[derive(Debug, Clone, Copy)]
pub struct Parent<'a> {
    pub id: Uuid,
    pub species: Species,
    pub generation: u32,
    pub dna: &'a Dna,
    pub position: Position,
    pub radius: f64,
}

/// Arena the offspring must land in.
#[derive(Debug, Clone, Copy)]
pub struct SpawnArea<'a> {
    pub width: f64,
    pub height: f64,
    pub obstacles: &'a [Obstacle],
}

/// Outcome of one reproduction attempt that went ahead.
#[derive(Debug, Clone, PartialEq)]
pub struct ReproductionOutcome {
    /// `None` when the spawn point was outside the arena or inside an obstacle.
    pub offspring: Option<OffspringSpec>,
    pub cost: f64,
    pub sexual: bool,
    pub genetic_distance: f64,
}

/// Runs the reproduction step for an eligible parent.
///
/// Returns `None` when no mate is in range and the asexual roll fails.
/// Otherwise the parent pays the cost and enters cooldown, even if the
/// offspring ends up discarded.
pub fn attempt_reproduction<H, R: Rng>(
    parent: &Parent<'_>,
    metabolism: &mut Metabolism,
    others: &[OrganismView<H>],
    area: &SpawnArea<'_>,
    config: &ReproductionConfig,
    rng: &mut R,
) -> Option<ReproductionOutcome> {
    let mate = find_mate(parent.species, parent.position, others, config);
    let (dna, generation, sexual) = match mate {
        Some(mate) => (
            crossover_with_rng(parent.dna, &mate.dna, rng),
            parent.generation.max(mate.generation) + 1,
            true,
        ),
        None if rng.gen::<f64>() < config.asexual_chance => {
            (mutate_with_rng(parent.dna, rng), parent.generation + 1, false)
        }
        None => return None,
    };

    let cost = lifecycle::reproduction_cost(parent.dna, config);
    metabolism.energy -= cost;
    metabolism.cooldown = config.cooldown;

    let angle = rng.gen_range(0.0..TAU);
    let distance = parent.radius + config.spawn_gap;
    let x = parent.position.x + angle.cos() * distance;
    let y = parent.position.y + angle.sin() * distance;

    let placeable =
        in_bounds(x, y, area.width, area.height) && !inside_any_obstacle(x, y, area.obstacles);
    let offspring = placeable.then_some(OffspringSpec {
        parent_id: parent.id,
        species: parent.species,
        generation,
        dna,
        x,
        y,
        cost,
    });

    Some(ReproductionOutcome {
        offspring,
        cost,
        sexual,
        genetic_distance: genetic_distance(parent.dna, &dna),
    })
}
