use serde::{Deserialize, Serialize};
use std::fmt;

/// Dietary role of an organism. Fixed at birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Eats food pellets only.
    Herbivore,
    /// Hunts other organisms only.
    Carnivore,
    /// Eats food, and hunts when aggressive enough.
    Omnivore,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Herbivore, Species::Carnivore, Species::Omnivore];

    /// Whether this species can consume food pellets.
    #[must_use]
    pub fn eats_food(self) -> bool {
        !matches!(self, Species::Carnivore)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Species::Herbivore => "herbivore",
            Species::Carnivore => "carnivore",
            Species::Omnivore => "omnivore",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names one field of the [`Dna`] trait vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    Speed,
    Efficiency,
    Aggression,
    Size,
    ReproductionThreshold,
    Lifespan,
    Socialness,
}

impl Trait {
    pub const ALL: [Trait; 7] = [
        Trait::Speed,
        Trait::Efficiency,
        Trait::Aggression,
        Trait::Size,
        Trait::ReproductionThreshold,
        Trait::Lifespan,
        Trait::Socialness,
    ];
}

/// Heritable trait vector of an organism.
///
/// Never mutated after the organism is born; offspring receive a fresh vector
/// produced by crossover or mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dna {
    /// Locomotion strength and top-speed multiplier.
    pub speed: f64,
    /// Divisor applied to every metabolic cost.
    pub efficiency: f64,
    /// Willingness to hunt (0.0-1.0).
    pub aggression: f64,
    /// Body size; drives max energy and radius.
    pub size: f64,
    /// Energy level above which the organism may reproduce.
    pub reproduction_threshold: f64,
    /// Maximum age in ticks.
    pub lifespan: f64,
    /// Flocking tendency (0.0-1.0).
    pub socialness: f64,
}

impl Dna {
    #[must_use]
    pub fn get(&self, t: Trait) -> f64 {
        match t {
            Trait::Speed => self.speed,
            Trait::Efficiency => self.efficiency,
            Trait::Aggression => self.aggression,
            Trait::Size => self.size,
            Trait::ReproductionThreshold => self.reproduction_threshold,
            Trait::Lifespan => self.lifespan,
            Trait::Socialness => self.socialness,
        }
    }

    pub fn set(&mut self, t: Trait, value: f64) {
        match t {
            Trait::Speed => self.speed = value,
            Trait::Efficiency => self.efficiency = value,
            Trait::Aggression => self.aggression = value,
            Trait::Size => self.size = value,
            Trait::ReproductionThreshold => self.reproduction_threshold = value,
            Trait::Lifespan => self.lifespan = value,
            Trait::Socialness => self.socialness = value,
        }
    }
}

impl Default for Dna {
    fn default() -> Self {
        Self {
            speed: 1.0,
            efficiency: 1.0,
            aggression: 0.5,
            size: 1.0,
            reproduction_threshold: 80.0,
            lifespan: 3500.0,
            socialness: 0.5,
        }
    }
}
