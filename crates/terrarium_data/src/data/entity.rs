use super::genotype::{Dna, Species};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// World position of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Velocity of an entity, in world units per tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    #[must_use]
    pub fn speed(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

/// Unique identification of an organism.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    /// Birth order within the current run; defines per-tick processing order.
    pub serial: u64,
    pub parent_id: Option<Uuid>,
    pub generation: u32,
}

/// Energy bookkeeping and life-cycle counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metabolism {
    pub energy: f64,
    /// Fixed at birth from the size trait.
    pub max_energy: f64,
    /// Ticks alive.
    pub age: u64,
    /// Ticks remaining before reproduction is allowed again.
    pub cooldown: u32,
    pub offspring_count: u32,
}

impl Metabolism {
    #[must_use]
    pub fn energy_ratio(&self) -> f64 {
        if self.max_energy > 0.0 {
            (self.energy / self.max_energy).max(0.0)
        } else {
            0.0
        }
    }
}

/// Species tag plus the immutable trait vector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub species: Species,
    pub dna: Dna,
}

/// Steering state and the cosmetic position trail.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Behavior {
    /// `Some` while seeking, `None` while wandering.
    pub target: Option<Position>,
    pub trail: VecDeque<Position>,
}

/// A complete organism, assembled from its components.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    #[serde(flatten)]
    pub identity: Identity,
    pub position: Position,
    pub velocity: Velocity,
    pub metabolism: Metabolism,
    pub genome: Genome,
    pub behavior: Behavior,
}

/// What a user click places into the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    #[default]
    Food,
    Herbivore,
    Carnivore,
    Omnivore,
}

impl PlacementMode {
    /// The species placed by this mode, or `None` for food.
    #[must_use]
    pub fn species(self) -> Option<Species> {
        match self {
            PlacementMode::Food => None,
            PlacementMode::Herbivore => Some(Species::Herbivore),
            PlacementMode::Carnivore => Some(Species::Carnivore),
            PlacementMode::Omnivore => Some(Species::Omnivore),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_ratio_guards_zero_capacity() {
        let met = Metabolism {
            energy: 10.0,
            max_energy: 0.0,
            age: 0,
            cooldown: 0,
            offspring_count: 0,
        };
        assert_eq!(met.energy_ratio(), 0.0);
    }

    #[test]
    fn test_placement_mode_species() {
        assert_eq!(PlacementMode::Food.species(), None);
        assert_eq!(
            PlacementMode::Carnivore.species(),
            Some(Species::Carnivore)
        );
    }

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }
}
