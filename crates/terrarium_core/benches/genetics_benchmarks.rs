use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terrarium_core::genetics::{genetic_distance, DnaLogic};
use terrarium_core::snapshot::InternalOrganismSnapshot;
use terrarium_core::systems::stats::genetic_diversity;
use terrarium_data::{Dna, Species};

/// Benchmark founder trait generation.
fn bench_founder_generation(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("dna_founder", |b| {
        b.iter(|| {
            let dna = Dna::new_founder_with_rng(&mut rng);
            black_box(dna)
        })
    });
}

fn bench_crossover(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let a = Dna::new_founder_with_rng(&mut rng);
    let other = Dna::new_founder_with_rng(&mut rng);

    c.bench_function("dna_crossover", |b| {
        b.iter(|| {
            let child = a.crossover_with_rng(black_box(&other), &mut rng);
            black_box(child)
        })
    });
}

fn bench_mutation(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let parent = Dna::new_founder_with_rng(&mut rng);

    c.bench_function("dna_mutate", |b| {
        b.iter(|| {
            let child = black_box(&parent).mutate_with_rng(&mut rng);
            black_box(child)
        })
    });
}

fn bench_distance(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let a = Dna::new_founder_with_rng(&mut rng);
    let other = Dna::new_founder_with_rng(&mut rng);

    c.bench_function("dna_distance", |b| {
        b.iter(|| black_box(genetic_distance(black_box(&a), black_box(&other))))
    });
}

/// Benchmark the per-tick diversity metric over a large population.
fn bench_genetic_diversity_1000(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let population: Vec<InternalOrganismSnapshot> = (0..1000)
        .map(|i| InternalOrganismSnapshot {
            species: Species::ALL[i % 3],
            age: i as u64,
            energy: 50.0,
            generation: 0,
            dna: Dna::new_founder_with_rng(&mut rng),
        })
        .collect();

    c.bench_function("genetic_diversity_1000", |b| {
        b.iter(|| black_box(genetic_diversity(black_box(&population))))
    });
}

criterion_group!(
    benches,
    bench_founder_generation,
    bench_crossover,
    bench_mutation,
    bench_distance,
    bench_genetic_diversity_1000
);
criterion_main!(benches);
