mod common;

use common::{OrganismBuilder, WorldBuilder};
use terrarium_data::{DeathCause, LiveEvent, Species};
use terrarium_lib::model::config::AppConfig;
use terrarium_lib::model::world::World;
use uuid::Uuid;

fn deaths(events: &[LiveEvent]) -> Vec<(Uuid, DeathCause)> {
    events
        .iter()
        .filter_map(|e| match e {
            LiveEvent::Death { id, cause, .. } => Some((*id, *cause)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_starving_organism_dies_same_tick() {
    let id = Uuid::new_v4();
    let mut world = WorldBuilder::new()
        .with_organism(OrganismBuilder::herbivore().id(id).energy(0.05))
        .build();

    let events = world.update().unwrap();

    assert_organism_dead!(world, id);
    assert_eq!(deaths(&events), vec![(id, DeathCause::Starvation)]);
    assert_eq!(world.pop_stats.death_events, 1);
    assert_eq!(world.pop_stats.starvation_deaths, 1);
    assert_eq!(world.pop_stats.population, 0);
}

#[test]
fn test_old_organism_dies_same_tick() {
    let id = Uuid::new_v4();
    let mut world = WorldBuilder::new()
        .with_organism(
            OrganismBuilder::omnivore()
                .id(id)
                .age(1000)
                .dna(|d| d.lifespan = 1000.0),
        )
        .build();

    let events = world.update().unwrap();

    assert_organism_dead!(world, id);
    assert_eq!(deaths(&events), vec![(id, DeathCause::OldAge)]);
    assert_eq!(world.pop_stats.old_age_deaths, 1);
    assert_eq!(world.pop_stats.recent_lifespans.back(), Some(&1001.0));
}

#[test]
fn test_last_member_death_reports_extinction() {
    let mut world = WorldBuilder::new()
        .with_organism(OrganismBuilder::carnivore().energy(0.01))
        .with_organism(OrganismBuilder::herbivore().at(400.0, 300.0))
        .build();

    let events = world.update().unwrap();

    let extinct: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            LiveEvent::Extinction { species, .. } => Some(*species),
            _ => None,
        })
        .collect();
    assert_eq!(extinct, vec![Species::Carnivore]);
}

#[test]
fn test_death_counter_matches_removals() {
    let mut config = AppConfig::default();
    config.world.seed = Some(21);
    let mut world = World::new(config).unwrap();
    let initial = world.organism_count() as i64;

    let mut births = 0i64;
    let mut deaths = 0i64;
    for _ in 0..1500 {
        for event in world.update().unwrap() {
            match event {
                LiveEvent::Birth { .. } => births += 1,
                LiveEvent::Death { .. } => deaths += 1,
                _ => {}
            }
        }
    }

    let stats = &world.pop_stats;
    assert_eq!(stats.death_events as i64, deaths);
    assert_eq!(stats.reproduction_events as i64, births);
    assert_eq!(
        stats.death_events,
        stats.starvation_deaths + stats.old_age_deaths + stats.predation_events
    );
    assert_eq!(world.organism_count() as i64, initial + births - deaths);
    assert_eq!(stats.population, world.organism_count());
}

#[test]
fn test_no_survivor_breaks_its_own_limits() {
    let mut config = AppConfig::default();
    config.world.seed = Some(22);
    let mut world = World::new(config).unwrap();

    for _ in 0..800 {
        world.update().unwrap();
        for o in world.get_all_organisms() {
            assert!(o.metabolism.energy > 0.0);
            assert!(o.metabolism.age as f64 <= o.genome.dna.lifespan);
            assert!(o.metabolism.energy <= o.metabolism.max_energy + 1e-9);
        }
    }
}
