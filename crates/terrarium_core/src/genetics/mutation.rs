use super::{clamp_dna, trait_spec};
use rand::Rng;
use terrarium_data::{Dna, Trait};

/// Asexual perturbation relative to the crossover spread.
pub const MUTATION_SCALE: f64 = 0.5;

/// Asexual copy: each trait perturbed uniformly by half its crossover spread, then clamped.
pub fn mutate_with_rng<R: Rng>(parent: &Dna, rng: &mut R) -> Dna {
    let mut child = *parent;
    for t in Trait::ALL {
        let spread = trait_spec(t).spread * MUTATION_SCALE;
        child.set(t, parent.get(t) + rng.gen_range(-spread..=spread));
    }
    clamp_dna(child)
}
