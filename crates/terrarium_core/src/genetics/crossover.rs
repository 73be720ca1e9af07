use super::{clamp_dna, trait_spec};
use rand::Rng;
use terrarium_data::{Dna, Trait};

/// Sexual recombination: the mean of both parents per trait, perturbed
/// uniformly by the trait's spread, then clamped.
pub fn crossover_with_rng<R: Rng>(a: &Dna, b: &Dna, rng: &mut R) -> Dna {
    let mut child = Dna::default();
    for t in Trait::ALL {
        let spread = trait_spec(t).spread;
        let mean = (a.get(t) + b.get(t)) / 2.0;
        child.set(t, mean + rng.gen_range(-spread..=spread));
    }
    clamp_dna(child)
}
