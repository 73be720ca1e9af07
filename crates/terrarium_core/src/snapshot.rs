use serde::{Deserialize, Serialize};
use terrarium_data::{Dna, EnhancedStats, Obstacle, Particle, PopulationStats, Position, Species};
use uuid::Uuid;

/// Minimal per-organism data used by the statistics pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InternalOrganismSnapshot {
    pub species: Species,
    pub age: u64,
    pub energy: f64,
    pub generation: u32,
    pub dna: Dna,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrganismSnapshot {
    pub id: Uuid,
    pub species: Species,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub age: u64,
    pub energy: f64,
    pub max_energy: f64,
    pub generation: u32,
    pub trail: Vec<Position>,
    pub dna: Dna,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct FoodSnapshot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub energy: f64,
}

/// Everything a renderer or UI needs for one frame, ordered by birth serial.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    pub organisms: Vec<OrganismSnapshot>,
    pub food: Vec<FoodSnapshot>,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub stats: PopulationStats,
    pub enhanced: EnhancedStats,
    /// `sin(2π · (tick mod cycle) / cycle)`.
    pub light_phase: f64,
    pub is_day: bool,
    /// Background brightness in [0.2, 1.0].
    pub ambient_level: f64,
}

impl WorldSnapshot {
    #[must_use]
    pub fn count_of(&self, species: Species) -> usize {
        self.organisms.iter().filter(|o| o.species == species).count()
    }
}
