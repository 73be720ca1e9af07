//! Heritable trait vector rules: founder generation, crossover, mutation and clamping.
//!
//! Bounds are enforced only when a child is produced. Founder ranges are
//! strictly inside the allowed ranges, so founders never need clamping.

pub mod crossover;
pub mod mutation;

pub use crossover::crossover_with_rng;
pub use mutation::{mutate_with_rng, MUTATION_SCALE};
pub use terrarium_data::{Dna, Trait};
use rand::Rng;

/// Allowed range, founder range and crossover perturbation for one trait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitSpec {
    pub min: f64,
    pub max: f64,
    pub founder_min: f64,
    pub founder_max: f64,
    /// Half-width of the uniform perturbation applied by crossover.
    pub spread: f64,
}

impl TraitSpec {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

#[must_use]
pub const fn trait_spec(t: Trait) -> TraitSpec {
    match t {
        Trait::Speed => TraitSpec {
            min: 0.2,
            max: 2.0,
            founder_min: 0.5,
            founder_max: 1.5,
            spread: 0.1,
        },
        Trait::Efficiency => TraitSpec {
            min: 0.2,
            max: 2.0,
            founder_min: 0.5,
            founder_max: 1.5,
            spread: 0.1,
        },
        Trait::Aggression => TraitSpec {
            min: 0.0,
            max: 1.0,
            founder_min: 0.1,
            founder_max: 0.9,
            spread: 0.1,
        },
        Trait::Size => TraitSpec {
            min: 0.5,
            max: 1.5,
            founder_min: 0.7,
            founder_max: 1.3,
            spread: 0.1,
        },
        Trait::ReproductionThreshold => TraitSpec {
            min: 40.0,
            max: 120.0,
            founder_min: 60.0,
            founder_max: 100.0,
            spread: 10.0,
        },
        Trait::Lifespan => TraitSpec {
            min: 1000.0,
            max: 6000.0,
            founder_min: 2000.0,
            founder_max: 5000.0,
            spread: 500.0,
        },
        Trait::Socialness => TraitSpec {
            min: 0.0,
            max: 1.0,
            founder_min: 0.1,
            founder_max: 0.9,
            spread: 0.1,
        },
    }
}

/// Draws every trait independently and uniformly from its founder range.
pub fn generate_founder_dna<R: Rng>(rng: &mut R) -> Dna {
    let mut dna = Dna::default();
    for t in Trait::ALL {
        let spec = trait_spec(t);
        dna.set(t, rng.gen_range(spec.founder_min..=spec.founder_max));
    }
    dna
}

/// Clamps every trait into its allowed range.
#[must_use]
pub fn clamp_dna(mut dna: Dna) -> Dna {
    for t in Trait::ALL {
        dna.set(t, trait_spec(t).clamp(dna.get(t)));
    }
    dna
}

#[must_use]
pub fn is_within_bounds(dna: &Dna) -> bool {
    Trait::ALL.iter().all(|&t| {
        let spec = trait_spec(t);
        let v = dna.get(t);
        v >= spec.min && v <= spec.max
    })
}

/// Mean absolute trait difference, each normalized by its allowed range width.
#[must_use]
pub fn genetic_distance(a: &Dna, b: &Dna) -> f64 {
    let total: f64 = Trait::ALL
        .iter()
        .map(|&t| (a.get(t) - b.get(t)).abs() / trait_spec(t).width())
        .sum();
    total / Trait::ALL.len() as f64
}

/// Genetic operators on the trait vector.
pub trait DnaLogic {
    fn new_founder_with_rng<R: Rng>(rng: &mut R) -> Self;
    fn crossover_with_rng<R: Rng>(&self, other: &Dna, rng: &mut R) -> Dna;
    fn mutate_with_rng<R: Rng>(&self, rng: &mut R) -> Dna;
    fn clamped(&self) -> Dna;
    fn distance(&self, other: &Dna) -> f64;
}

impl DnaLogic for Dna {
    fn new_founder_with_rng<R: Rng>(rng: &mut R) -> Self {
        generate_founder_dna(rng)
    }

    fn crossover_with_rng<R: Rng>(&self, other: &Dna, rng: &mut R) -> Dna {
        crossover::crossover_with_rng(self, other, rng)
    }

    fn mutate_with_rng<R: Rng>(&self, rng: &mut R) -> Dna {
        mutation::mutate_with_rng(self, rng)
    }

    fn clamped(&self) -> Dna {
        clamp_dna(*self)
    }

    fn distance(&self, other: &Dna) -> f64 {
        genetic_distance(self, other)
    }
}
