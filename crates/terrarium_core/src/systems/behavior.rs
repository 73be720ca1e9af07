//! Target acquisition, flocking and locomotion impulses.

use crate::config::BehaviorConfig;
use crate::interaction::{FoodView, OrganismView};
use rand::Rng;
use terrarium_data::{Behavior, Dna, Metabolism, Position, Species, Velocity};

/// The organism whose turn it is, as needed for steering decisions.
#[derive(Debug, Clone, Copy)]
pub struct Steering<'a> {
    pub species: Species,
    pub dna: &'a Dna,
    pub metabolism: &'a Metabolism,
    pub position: Position,
    pub radius: f64,
}

/// Whether this organism goes looking for prey when hungry.
#[must_use]
pub fn is_hunter(species: Species, dna: &Dna, config: &BehaviorConfig) -> bool {
    match species {
        Species::Carnivore => true,
        Species::Omnivore => dna.aggression > config.hunt_aggression,
        Species::Herbivore => false,
    }
}

/// Herbivores always; omnivores only when strictly smaller than the hunter.
#[must_use]
pub fn is_viable_prey<H>(hunter_radius: f64, prey: &OrganismView<H>) -> bool {
    match prey.species {
        Species::Herbivore => true,
        Species::Omnivore => prey.radius < hunter_radius,
        Species::Carnivore => false,
    }
}

fn nearest<'a, T, I>(from: Position, items: I) -> Option<Position>
where
    T: 'a,
    I: Iterator<Item = (&'a T, Position)>,
{
    let mut best: Option<(f64, Position)> = None;
    for (_, pos) in items {
        let d = from.distance_to(&pos);
        // Strict comparison keeps the first-encountered item on ties.
        if best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, pos));
        }
    }
    best.map(|(_, p)| p)
}

/// New target for this tick, or `None` to keep whatever target is already set.
///
/// Foraging is evaluated first; a qualifying hunt overwrites it.
pub fn acquire_target<H>(
    me: &Steering<'_>,
    food: &[Option<FoodView<H>>],
    others: &[OrganismView<H>],
    config: &BehaviorConfig,
) -> Option<Position> {
    let ratio = me.metabolism.energy_ratio();
    let mut target = None;

    if me.species.eats_food() && ratio < config.forage_hunger {
        let live = food.iter().flatten().map(|f| (f, f.position));
        if let Some(p) = nearest(me.position, live) {
            target = Some(p);
        }
    }

    if is_hunter(me.species, me.dna, config) && ratio < config.hunt_hunger {
        let prey = others
            .iter()
            .filter(|o| is_viable_prey(me.radius, o))
            .map(|o| (o, o.position));
        if let Some(p) = nearest(me.position, prey) {
            target = Some(p);
        }
    }

    target
}

/// Cohesion toward same-species neighbors plus separation from close ones.
///
/// Zero unless socialness exceeds the flocking threshold.
#[must_use]
pub fn flocking_impulse<H>(
    me: &Steering<'_>,
    others: &[OrganismView<H>],
    config: &BehaviorConfig,
) -> (f64, f64) {
    if me.dna.socialness <= config.flock_socialness {
        return (0.0, 0.0);
    }

    let (mut sum_x, mut sum_y, mut count) = (0.0, 0.0, 0usize);
    let (mut sep_x, mut sep_y) = (0.0, 0.0);
    for other in others.iter().filter(|o| o.species == me.species) {
        let dx = me.position.x - other.position.x;
        let dy = me.position.y - other.position.y;
        let d = (dx * dx + dy * dy).sqrt();
        if d >= config.flock_radius {
            continue;
        }
        sum_x += other.position.x;
        sum_y += other.position.y;
        count += 1;
        if d > 0.0 && d < config.separation_radius {
            let push = config.separation_strength / d;
            sep_x += dx / d * push;
            sep_y += dy / d * push;
        }
    }

    if count == 0 {
        return (0.0, 0.0);
    }
    let k = config.cohesion * me.dna.socialness;
    let cx = sum_x / count as f64 - me.position.x;
    let cy = sum_y / count as f64 - me.position.y;
    (cx * k + sep_x, cy * k + sep_y)
}

/// Thrust toward the target, clearing it once reached; jitter when wandering.
pub fn steer<R: Rng>(
    position: Position,
    velocity: &mut Velocity,
    behavior: &mut Behavior,
    dna: &Dna,
    config: &BehaviorConfig,
    rng: &mut R,
) {
    match behavior.target {
        Some(target) => {
            let dx = target.x - position.x;
            let dy = target.y - position.y;
            let d = (dx * dx + dy * dy).sqrt();
            if d <= config.target_reach {
                behavior.target = None;
            } else {
                let thrust = config.thrust * dna.speed;
                velocity.vx += dx / d * thrust;
                velocity.vy += dy / d * thrust;
            }
        }
        None => {
            let j = config.wander_jitter;
            velocity.vx += rng.gen_range(-j..=j);
            velocity.vy += rng.gen_range(-j..=j);
        }
    }
}
