use crate::model::config::AppConfig;
use crate::model::environment::Environment;
use crate::model::interaction::FoodView;
use crate::model::metrics::Metrics;
use crate::model::snapshot::InternalOrganismSnapshot;
use crate::model::spatial_hash::SpatialHash;
use crate::model::systems::stats::StatsWindow;
use rand_chacha::ChaCha8Rng;
use terrarium_data::{EnhancedStats, Obstacle, Particle, PopulationStats};

pub mod commands;
pub mod init;
pub mod state;
pub mod update;

/// Grid cell size of the per-tick food index.
pub const FOOD_CELL_SIZE: f64 = 16.0;

/// The simulation engine.
///
/// Owns every entity. Organisms and food live in `ecs`; obstacles and
/// cosmetic particles are plain vectors. Nothing outside the world mutates
/// these collections: callers go through [`World::update`], the placement
/// and reset commands, or read a [`crate::model::snapshot::WorldSnapshot`].
pub struct World {
    pub width: f64,
    pub height: f64,
    pub tick: u64,
    pub ecs: hecs::World,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub environment: Environment,
    pub pop_stats: PopulationStats,
    pub prev_stats: Option<PopulationStats>,
    pub enhanced_stats: EnhancedStats,
    pub stats_window: StatsWindow,
    pub config: AppConfig,
    pub metrics: Metrics,
    pub rng: ChaCha8Rng,
    /// Food count restored by `reset` and topped up by `apply_settings`.
    pub food_target: usize,
    food_timer: u64,
    next_serial: u64,
    /// Organism handles in serial order; newborns are appended during a tick.
    roster: Vec<hecs::Entity>,
    food_hash: SpatialHash,
    /// Food at tick start; entries become `None` once eaten.
    food_table: Vec<Option<FoodView<hecs::Entity>>>,
    samples: Vec<InternalOrganismSnapshot>,
    query_buffer: Vec<usize>,
}
