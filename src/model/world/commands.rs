use crate::model::arena::{in_bounds, inside_any_obstacle};
use crate::model::error::SimError;
use crate::model::systems::stats::StatsWindow;
use crate::model::world::World;
use terrarium_data::{EnhancedStats, LiveEvent, PlacementMode, PopulationStats};

impl World {
    /// Places one food item or one founder at a user-chosen point.
    ///
    /// Points outside the arena or inside an obstacle are rejected and nothing is spawned.
    pub fn place_at(
        &mut self,
        x: f64,
        y: f64,
        mode: PlacementMode,
    ) -> Result<hecs::Entity, SimError> {
        if !in_bounds(x, y, self.width, self.height) {
            return Err(SimError::OutOfBounds { x, y });
        }
        if inside_any_obstacle(x, y, &self.obstacles) {
            return Err(SimError::InsideObstacle { x, y });
        }
        let handle = match mode.species() {
            Some(species) => self.spawn_founder(x, y, species),
            None => self.spawn_food_at(x, y),
        };
        self.refresh_population_stats();
        Ok(handle)
    }

    /// Sets the food target and tops food up toward it. Never removes food.
    ///
    /// Returns the number of items spawned.
    pub fn apply_settings(&mut self, food_capacity: usize) -> usize {
        self.food_target = food_capacity;
        let missing = food_capacity.saturating_sub(self.food_count());
        self.spawn_food_batch(missing, self.config.world.edge_margin);
        self.refresh_population_stats();
        tracing::debug!(food_capacity, spawned = missing, "Food capacity adjusted");
        missing
    }

    /// Clears every organism and food item, zeroes clocks and counters and
    /// re-seeds the defaults. Obstacles are kept.
    pub fn reset(&mut self) -> LiveEvent {
        self.ecs.clear();
        self.roster.clear();
        self.particles.clear();
        self.food_table.clear();
        self.tick = 0;
        self.food_timer = 0;
        self.next_serial = 0;
        self.environment.world_time = 0;
        self.pop_stats = PopulationStats::default();
        self.prev_stats = None;
        self.enhanced_stats = EnhancedStats::default();
        self.stats_window = StatsWindow::new(self.config.stats.window);
        self.metrics.reset();

        self.seed_population();
        self.spawn_food_batch(self.food_target, self.config.world.edge_margin);
        self.refresh_population_stats();

        tracing::info!(
            organisms = self.pop_stats.population,
            food = self.pop_stats.food_count,
            obstacles = self.obstacles.len(),
            "World reset"
        );
        LiveEvent::Reset {
            tick: self.tick,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
