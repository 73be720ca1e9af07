mod common;

use common::{find_organism, OrganismBuilder, WorldBuilder};
use terrarium_data::Species;
use terrarium_lib::model::config::AppConfig;
use terrarium_lib::model::world::World;
use uuid::Uuid;

#[test]
fn test_hungry_herbivore_seeks_food() {
    let mut world = WorldBuilder::new()
        .with_seed(5)
        .with_organism(OrganismBuilder::herbivore().at(100.0, 100.0).energy(30.0))
        .with_food(160.0, 100.0, 5.0, 30.0)
        .build();

    for _ in 0..60 {
        world.update().unwrap();
    }

    assert_eq!(world.food_count(), 0);
    assert!(world.pop_stats.avg_energy > 30.0);
}

#[test]
fn test_carnivore_runs_down_prey() {
    let prey = Uuid::new_v4();
    let mut world = WorldBuilder::new()
        .with_seed(6)
        .with_organism(OrganismBuilder::carnivore().at(100.0, 300.0).energy(40.0))
        .with_organism(
            OrganismBuilder::herbivore()
                .id(prey)
                .at(150.0, 300.0)
                .energy(15.0),
        )
        .build();

    for _ in 0..80 {
        world.update().unwrap();
        if find_organism(&world, prey).is_none() {
            break;
        }
    }

    assert_organism_dead!(world, prey);
    assert_eq!(world.pop_stats.predation_events, 1);
    assert_eq!(world.species_count(Species::Carnivore), 1);
}

#[test]
fn test_social_organisms_flock_together() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let mut world = WorldBuilder::new()
        .with_seed(8)
        .with_organism(
            OrganismBuilder::herbivore()
                .id(a)
                .at(300.0, 300.0)
                .dna(|d| d.socialness = 0.9),
        )
        .with_organism(
            OrganismBuilder::herbivore()
                .id(b)
                .at(360.0, 300.0)
                .dna(|d| d.socialness = 0.9),
        )
        .build();

    for _ in 0..20 {
        world.update().unwrap();
    }

    let pa = find_organism(&world, a).unwrap().position;
    let pb = find_organism(&world, b).unwrap().position;
    assert!(pa.distance_to(&pb) < 50.0);
}

#[test]
fn test_long_run_statistics_stay_consistent() {
    let mut config = AppConfig::default();
    config.world.seed = Some(31);
    let mut world = World::new(config).unwrap();

    for _ in 0..2000 {
        world.update().unwrap();
        let stats = &world.pop_stats;
        let enhanced = &world.enhanced_stats;
        assert_eq!(
            stats.population,
            stats.herbivores + stats.carnivores + stats.omnivores
        );
        assert_eq!(stats.food_count, world.food_count());
        assert!(stats.recent_lifespans.len() <= 100);
        assert!(stats.recent_distances.len() <= 100);
        assert!((0.0..=1.0).contains(&enhanced.food_scarcity));
        assert!((0.0..=1.0).contains(&enhanced.predation_rate));
        assert!(enhanced.selection_pressure >= 0.0);
        assert!(enhanced.genetic_diversity >= 0.0);
        assert!(world.particles.len() <= world.config.visual.max_particles);
        if stats.population == 0 {
            break;
        }
    }
}
