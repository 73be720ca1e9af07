use crate::config::FoodConfig;
use crate::interaction::FoodView;
use crate::spatial_hash::SpatialHash;
use rand::Rng;
use terrarium_data::{Food, Metabolism, Position};

/// Indices into `food` of live items whose disc overlaps the organism's.
///
/// `food` is the tick's food table (eaten entries are `None`) and `index`
/// was built from the same table. Results are in table order.
pub fn colliding_food<H>(
    position: Position,
    radius: f64,
    food: &[Option<FoodView<H>>],
    index: &SpatialHash,
    max_food_radius: f64,
    candidates: &mut Vec<usize>,
) -> Vec<usize> {
    index.query_into(position.x, position.y, radius + max_food_radius, candidates);
    candidates
        .iter()
        .copied()
        .filter(|&i| {
            food.get(i)
                .and_then(Option::as_ref)
                .is_some_and(|f| position.distance_to(&f.position) < radius + f.radius)
        })
        .collect()
}

/// Transfers food energy, capped at capacity. Returns the energy actually gained.
pub fn feed(metabolism: &mut Metabolism, energy: f64) -> f64 {
    let before = metabolism.energy;
    metabolism.energy = (metabolism.energy + energy).min(metabolism.max_energy);
    metabolism.energy - before
}

pub fn random_food_with_rng<R: Rng>(config: &FoodConfig, rng: &mut R) -> Food {
    Food {
        radius: rng.gen_range(config.radius_min..=config.radius_max),
        energy: rng.gen_range(config.energy_min..=config.energy_max),
    }
}

/// Advances the spawn timer. Returns the batch size to spawn this tick, if any.
///
/// The timer resets only when a batch spawns. An expiry blocked by the cap
/// stays pending until food drops below it.
pub fn tick_food_timer<R: Rng>(
    timer: &mut u64,
    food_count: usize,
    config: &FoodConfig,
    rng: &mut R,
) -> Option<usize> {
    *timer += 1;
    if *timer <= config.spawn_interval || food_count >= config.max_food {
        return None;
    }
    *timer = 0;
    Some(rng.gen_range(config.batch_min..=config.batch_max))
}
