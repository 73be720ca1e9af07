/// Asserts that the organism with the given ID has energy within `[min, max]`.
#[macro_export]
macro_rules! assert_energy_between {
    ($world:expr, $id:expr, $min:expr, $max:expr) => {
        let organism = $world
            .get_all_organisms()
            .into_iter()
            .find(|o| o.identity.id == $id)
            .expect("Organism not found in world");
        assert!(
            organism.metabolism.energy >= $min && organism.metabolism.energy <= $max,
            "Organism {} energy {} is not within [{}, {}]",
            $id,
            organism.metabolism.energy,
            $min,
            $max
        );
    };
}

/// Asserts that the organism with the given ID is no longer in the world.
#[macro_export]
macro_rules! assert_organism_dead {
    ($world:expr, $id:expr) => {
        let exists = $world
            .get_all_organisms()
            .into_iter()
            .any(|o| o.identity.id == $id);
        assert!(!exists, "Organism {} should be dead but was found alive", $id);
    };
}

/// Asserts that the organism with the given ID is still in the world.
#[macro_export]
macro_rules! assert_organism_alive {
    ($world:expr, $id:expr) => {
        let exists = $world
            .get_all_organisms()
            .into_iter()
            .any(|o| o.identity.id == $id);
        assert!(exists, "Organism {} should be alive but was not found", $id);
    };
}

/// Asserts that the total population count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.organism_count(), $count, "Population count mismatch");
    };
}
