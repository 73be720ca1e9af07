use crate::model::arena::{generate_obstacles_with_rng, random_clear_point_with_rng};
use crate::model::config::AppConfig;
use crate::model::environment::Environment;
use crate::model::lifecycle;
use crate::model::metrics::Metrics;
use crate::model::spatial_hash::SpatialHash;
use crate::model::systems::ecological;
use crate::model::systems::stats::StatsWindow;
use crate::model::world::{World, FOOD_CELL_SIZE};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terrarium_data::{EnhancedStats, Food, Organism, PopulationStats, Position, Species};

impl World {
    /// Builds a world: validates the config, lays out obstacles and seeds
    /// the default population and food.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };
        let obstacles = generate_obstacles_with_rng(&config.world, &mut rng);
        let mut world = Self::with_obstacles(config, obstacles, rng);
        world.seed_population();
        world.spawn_food_batch(world.food_target, world.config.world.edge_margin);
        world.refresh_population_stats();

        tracing::info!(
            seed = ?world.config.world.seed,
            fingerprint = %world.config.fingerprint(),
            obstacles = world.obstacles.len(),
            organisms = world.organism_count(),
            food = world.food_count(),
            "World created"
        );
        Ok(world)
    }

    /// An empty world with the given obstacles: no organisms, no food.
    pub fn with_obstacles(
        config: AppConfig,
        obstacles: Vec<terrarium_data::Obstacle>,
        rng: ChaCha8Rng,
    ) -> Self {
        let (width, height) = (config.world.width, config.world.height);
        Self {
            width,
            height,
            tick: 0,
            ecs: hecs::World::new(),
            obstacles,
            particles: Vec::new(),
            environment: Environment::new(config.environment.day_cycle_ticks),
            pop_stats: PopulationStats::default(),
            prev_stats: None,
            enhanced_stats: EnhancedStats::default(),
            stats_window: StatsWindow::new(config.stats.window),
            food_target: config.food.initial_food,
            metrics: Metrics::new(),
            rng,
            food_timer: 0,
            next_serial: 0,
            roster: Vec::new(),
            food_hash: SpatialHash::new(FOOD_CELL_SIZE, width, height),
            food_table: Vec::new(),
            samples: Vec::new(),
            query_buffer: Vec::new(),
            config,
        }
    }

    /// Spawns the configured founder counts at random obstacle-free points away from the edges.
    pub fn seed_population(&mut self) {
        let counts = [
            (Species::Herbivore, self.config.population.initial_herbivores),
            (Species::Carnivore, self.config.population.initial_carnivores),
            (Species::Omnivore, self.config.population.initial_omnivores),
        ];
        for (species, count) in counts {
            for _ in 0..count {
                let (x, y) = self.random_clear_point(self.config.world.edge_margin);
                self.spawn_founder(x, y, species);
            }
        }
    }

    pub(crate) fn random_clear_point(&mut self, margin: f64) -> (f64, f64) {
        random_clear_point_with_rng(
            self.width,
            self.height,
            margin,
            &self.obstacles,
            self.config.world.placement_retries,
            &mut self.rng,
        )
    }

    pub fn take_serial(&mut self) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        serial
    }

    pub fn spawn_founder(&mut self, x: f64, y: f64, species: Species) -> hecs::Entity {
        let serial = self.take_serial();
        let organism =
            lifecycle::create_founder_with_rng(x, y, species, serial, &self.config, &mut self.rng);
        self.spawn_organism(organism)
    }

    /// Inserts a fully built organism. Its serial must come from this world.
    pub fn spawn_organism(&mut self, organism: Organism) -> hecs::Entity {
        let handle = self.ecs.spawn((
            organism.identity,
            organism.position,
            organism.velocity,
            organism.metabolism,
            organism.genome,
            organism.behavior,
        ));
        self.roster.push(handle);
        handle
    }

    pub fn spawn_food_at(&mut self, x: f64, y: f64) -> hecs::Entity {
        let food = ecological::random_food_with_rng(&self.config.food, &mut self.rng);
        self.insert_food(x, y, food)
    }

    pub fn insert_food(&mut self, x: f64, y: f64, food: Food) -> hecs::Entity {
        self.ecs.spawn((Position::new(x, y), food))
    }

    /// Spawns `count` food items at random points, avoiding obstacles with bounded retries.
    pub fn spawn_food_batch(&mut self, count: usize, margin: f64) {
        for _ in 0..count {
            let (x, y) = self.random_clear_point(margin);
            self.spawn_food_at(x, y);
        }
    }
}
