use crate::config::StatsConfig;
use crate::genetics::trait_spec;
use crate::snapshot::InternalOrganismSnapshot;
use rayon::prelude::*;
use std::collections::VecDeque;
use terrarium_data::{DeathCause, EnhancedStats, PopulationStats, Species, Trait, Trend};

/// Length of the lifespan and genetic-distance rolling windows.
pub const RECENT_CAPACITY: usize = 100;

/// Per-tick death and kill counts over the last `capacity` ticks.
#[derive(Debug, Clone)]
pub struct StatsWindow {
    per_tick: VecDeque<(u64, u64)>,
    capacity: usize,
}

impl StatsWindow {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            per_tick: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, deaths: u64, kills: u64) {
        self.per_tick.push_back((deaths, kills));
        while self.per_tick.len() > self.capacity {
            self.per_tick.pop_front();
        }
    }

    #[must_use]
    pub fn ticks(&self) -> usize {
        self.per_tick.len()
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.per_tick.iter().map(|(d, _)| d).sum()
    }

    #[must_use]
    pub fn kills(&self) -> u64 {
        self.per_tick.iter().map(|(_, k)| k).sum()
    }

    pub fn clear(&mut self) {
        self.per_tick.clear();
    }
}

fn push_capped(window: &mut VecDeque<f64>, value: f64) -> f64 {
    window.push_back(value);
    while window.len() > RECENT_CAPACITY {
        window.pop_front();
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Counts one removal against the lifetime counters and the lifespan window.
pub fn record_stat_death(stats: &mut PopulationStats, age: u64, cause: &DeathCause) {
    stats.death_events += 1;
    match cause {
        DeathCause::Starvation => stats.starvation_deaths += 1,
        DeathCause::OldAge => stats.old_age_deaths += 1,
        DeathCause::Predation { .. } => stats.predation_events += 1,
    }
    stats.avg_lifespan = push_capped(&mut stats.recent_lifespans, age as f64);
}

/// Counts one offspring actually added to the world.
pub fn record_stat_birth(stats: &mut PopulationStats, genetic_distance: f64) {
    stats.reproduction_events += 1;
    stats.evolutionary_velocity = push_capped(&mut stats.recent_distances, genetic_distance);
}

/// Recomputes the instantaneous fields. Lifetime counters are left untouched.
pub fn update_population_stats(
    stats: &mut PopulationStats,
    organisms: &[InternalOrganismSnapshot],
    food_count: usize,
    tick: u64,
) {
    stats.tick = tick;
    stats.food_count = food_count;
    stats.population = organisms.len();
    stats.herbivores = 0;
    stats.carnivores = 0;
    stats.omnivores = 0;
    for o in organisms {
        match o.species {
            Species::Herbivore => stats.herbivores += 1,
            Species::Carnivore => stats.carnivores += 1,
            Species::Omnivore => stats.omnivores += 1,
        }
    }
    stats.max_generation = organisms.iter().map(|o| o.generation).max().unwrap_or(0);

    if organisms.is_empty() {
        stats.avg_age = 0.0;
        stats.avg_energy = 0.0;
        return;
    }
    let n = organisms.len() as f64;
    stats.avg_age = organisms.iter().map(|o| o.age as f64).sum::<f64>() / n;
    stats.avg_energy = organisms.iter().map(|o| o.energy).sum::<f64>() / n;
}

/// Mean over traits of the population standard deviation divided by the trait's allowed width.
#[must_use]
pub fn genetic_diversity(organisms: &[InternalOrganismSnapshot]) -> f64 {
    if organisms.len() < 2 {
        return 0.0;
    }
    let n = organisms.len() as f64;
    let per_trait: Vec<f64> = Trait::ALL
        .par_iter()
        .map(|&t| {
            let mean = organisms.iter().map(|o| o.dna.get(t)).sum::<f64>() / n;
            let var = organisms
                .iter()
                .map(|o| {
                    let d = o.dna.get(t) - mean;
                    d * d
                })
                .sum::<f64>()
                / n;
            var.sqrt() / trait_spec(t).width()
        })
        .collect();
    per_trait.iter().sum::<f64>() / Trait::ALL.len() as f64
}

fn trend(current: f64, previous: f64, epsilon: f64) -> Trend {
    let delta = current - previous;
    if delta > epsilon {
        Trend::Rising
    } else if delta < -epsilon {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// Derives the secondary metrics from this tick's snapshot, the previous one and the rolling window.
#[must_use]
pub fn compute_enhanced(
    current: &PopulationStats,
    previous: Option<&PopulationStats>,
    organisms: &[InternalOrganismSnapshot],
    window: &StatsWindow,
    config: &StatsConfig,
) -> EnhancedStats {
    let deaths = window.deaths() as f64;
    let ticks = window.ticks().max(1) as f64;
    let grazers = (current.herbivores + current.omnivores) as f64;

    let (population_trend, food_trend, energy_trend) = match previous {
        Some(prev) => (
            trend(current.population as f64, prev.population as f64, 0.0),
            trend(current.food_count as f64, prev.food_count as f64, 0.0),
            trend(current.avg_energy, prev.avg_energy, config.trend_epsilon),
        ),
        None => (Trend::Stable, Trend::Stable, Trend::Stable),
    };

    EnhancedStats {
        genetic_diversity: genetic_diversity(organisms),
        selection_pressure: deaths / (ticks * current.population.max(1) as f64),
        predation_rate: window.kills() as f64 / deaths.max(1.0),
        food_scarcity: if grazers > 0.0 {
            grazers / (grazers + current.food_count as f64)
        } else {
            0.0
        },
        population_trend,
        food_trend,
        energy_trend,
    }
}
