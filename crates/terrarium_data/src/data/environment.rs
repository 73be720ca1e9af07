use super::genotype::Species;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// A food pellet. Its position is stored alongside as a separate component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub radius: f64,
    /// Energy transferred in full to the organism that eats it.
    pub energy: f64,
}

/// Static axis-aligned rectangle organisms bounce off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Cosmetic particle. Never read by simulation logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining normalized lifetime (1.0 at birth, pruned at 0.0).
    pub life: f64,
    pub color: (u8, u8, u8),
    pub size: f64,
}

/// Why an organism left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeathCause {
    Starvation,
    OldAge,
    Predation { predator: Uuid },
}

/// Direction of a metric relative to the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Stable,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// Primary population statistics, recomputed every tick.
pub struct PopulationStats {
    /// Tick this snapshot was taken at.
    pub tick: u64,
    pub herbivores: usize,
    pub carnivores: usize,
    pub omnivores: usize,
    /// Total number of living organisms.
    pub population: usize,
    /// Mean age of living organisms (ticks).
    pub avg_age: f64,
    /// Mean current energy of living organisms.
    pub avg_energy: f64,
    /// Number of food items currently in the arena.
    pub food_count: usize,
    /// Offspring actually added to the world this run.
    pub reproduction_events: u64,
    /// Organisms removed this run, by any cause.
    pub death_events: u64,
    /// Subset of `death_events` caused by predation.
    pub predation_events: u64,
    pub starvation_deaths: u64,
    pub old_age_deaths: u64,
    /// Highest generation among living organisms.
    pub max_generation: u32,
    /// Mean age at death over `recent_lifespans`.
    pub avg_lifespan: f64,
    /// Mean parent-child genetic distance over `recent_distances`.
    pub evolutionary_velocity: f64,
    /// Rolling window of recent death ages.
    pub recent_lifespans: VecDeque<f64>,
    /// Rolling window of recent birth genetic distances.
    pub recent_distances: VecDeque<f64>,
}

impl Default for PopulationStats {
    fn default() -> Self {
        Self {
            tick: 0,
            herbivores: 0,
            carnivores: 0,
            omnivores: 0,
            population: 0,
            avg_age: 0.0,
            avg_energy: 0.0,
            food_count: 0,
            reproduction_events: 0,
            death_events: 0,
            predation_events: 0,
            starvation_deaths: 0,
            old_age_deaths: 0,
            max_generation: 0,
            avg_lifespan: 0.0,
            evolutionary_velocity: 0.0,
            recent_lifespans: VecDeque::with_capacity(100),
            recent_distances: VecDeque::with_capacity(100),
        }
    }
}

impl PopulationStats {
    #[must_use]
    pub fn count_of(&self, species: Species) -> usize {
        match species {
            Species::Herbivore => self.herbivores,
            Species::Carnivore => self.carnivores,
            Species::Omnivore => self.omnivores,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
/// Secondary metrics derived from consecutive [`PopulationStats`] snapshots.
pub struct EnhancedStats {
    /// Mean normalized standard deviation of the trait vector across the population.
    pub genetic_diversity: f64,
    /// Deaths per organism per tick over the rolling window.
    pub selection_pressure: f64,
    /// Fraction of recent deaths caused by predation.
    pub predation_rate: f64,
    /// Share of grazers relative to grazers plus food (0.0 = plenty).
    pub food_scarcity: f64,
    pub population_trend: Trend,
    pub food_trend: Trend,
    pub energy_trend: Trend,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
/// Tagged union of all simulation events emitted during a tick.
///
/// Serialised with `#[serde(tag = "event")]` for streaming JSONL output.
pub enum LiveEvent {
    /// An offspring was added to the world.
    Birth {
        id: Uuid,
        parent_id: Option<Uuid>,
        species: Species,
        gen: u32,
        /// `true` when produced with a mate, `false` for asexual budding.
        sexual: bool,
        tick: u64,
        timestamp: String,
    },
    /// An organism was removed.
    Death {
        id: Uuid,
        species: Species,
        age: u64,
        offspring: u32,
        cause: DeathCause,
        tick: u64,
        timestamp: String,
    },
    /// The last member of a species died.
    Extinction {
        species: Species,
        tick: u64,
        timestamp: String,
    },
    /// The world was cleared and re-seeded.
    Reset { tick: u64, timestamp: String },
}

impl LiveEvent {
    #[must_use]
    pub fn tick(&self) -> u64 {
        match self {
            LiveEvent::Birth { tick, .. }
            | LiveEvent::Death { tick, .. }
            | LiveEvent::Extinction { tick, .. }
            | LiveEvent::Reset { tick, .. } => *tick,
        }
    }
}
