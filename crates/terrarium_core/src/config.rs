//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section carries working defaults, so a file
//! only needs the keys it overrides.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. CLI flags for the handful of run-level options (seed, speed)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 800.0
//! height = 600.0
//! seed = 42
//!
//! [population]
//! initial_herbivores = 40
//!
//! [food]
//! max_food = 150
//! ```

use serde::{Deserialize, Serialize};

/// Arena dimensions, seeding and obstacle layout.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub seed: Option<u64>,
    /// Distance from the arena edge kept clear when seeding.
    pub edge_margin: f64,
    pub obstacle_count_min: usize,
    pub obstacle_count_max: usize,
    pub obstacle_size_min: f64,
    pub obstacle_size_max: f64,
    /// Attempts to find an obstacle-free point before accepting any point.
    pub placement_retries: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            seed: None,
            edge_margin: 50.0,
            obstacle_count_min: 3,
            obstacle_count_max: 6,
            obstacle_size_min: 40.0,
            obstacle_size_max: 120.0,
            placement_retries: 10,
        }
    }
}

/// Founder counts used by initial seeding and by `reset`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PopulationConfig {
    pub initial_herbivores: usize,
    pub initial_carnivores: usize,
    pub initial_omnivores: usize,
    /// Founders start with this fraction of their max energy.
    pub founder_energy_fraction: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_herbivores: 30,
            initial_carnivores: 6,
            initial_omnivores: 10,
            founder_energy_fraction: 0.8,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FoodConfig {
    pub initial_food: usize,
    /// Periodic spawning stops once this many food items exist.
    pub max_food: usize,
    /// Ticks between periodic spawn attempts.
    pub spawn_interval: u64,
    pub batch_min: usize,
    pub batch_max: usize,
    pub radius_min: f64,
    pub radius_max: f64,
    pub energy_min: f64,
    pub energy_max: f64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            initial_food: 80,
            max_food: 100,
            spawn_interval: 80,
            batch_min: 1,
            batch_max: 3,
            radius_min: 3.0,
            radius_max: 6.0,
            energy_min: 20.0,
            energy_max: 40.0,
        }
    }
}

/// Energy costs and body-size derivations.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetabolismConfig {
    pub base_cost: f64,
    /// Extra cost per unit of current speed.
    pub speed_cost: f64,
    pub max_energy_base: f64,
    pub max_energy_per_size: f64,
    pub radius_min: f64,
    pub radius_base: f64,
    pub radius_per_size: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            base_cost: 0.1,
            speed_cost: 0.1,
            max_energy_base: 80.0,
            max_energy_per_size: 40.0,
            radius_min: 3.0,
            radius_base: 4.0,
            radius_per_size: 4.0,
        }
    }
}

/// Steering, flocking and locomotion constants.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Grazers look for food below this energy ratio.
    pub forage_hunger: f64,
    /// Hunters look for prey below this energy ratio.
    pub hunt_hunger: f64,
    /// Omnivores above this aggression pick prey targets.
    pub hunt_aggression: f64,
    pub target_reach: f64,
    pub thrust: f64,
    pub wander_jitter: f64,
    pub damping: f64,
    /// Velocity is clamped to `max_speed_factor * dna.speed`.
    pub max_speed_factor: f64,
    pub flock_socialness: f64,
    pub flock_radius: f64,
    pub cohesion: f64,
    pub separation_radius: f64,
    pub separation_strength: f64,
    pub trail_length: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            forage_hunger: 0.7,
            hunt_hunger: 0.6,
            hunt_aggression: 0.5,
            target_reach: 5.0,
            thrust: 0.2,
            wander_jitter: 0.15,
            damping: 0.99,
            max_speed_factor: 3.0,
            flock_socialness: 0.5,
            flock_radius: 80.0,
            cohesion: 0.002,
            separation_radius: 30.0,
            separation_strength: 0.05,
            trail_length: 20,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PredationConfig {
    /// Omnivores above this aggression attack on contact.
    pub attack_aggression: f64,
    /// Non-herbivores are prey only when smaller than this fraction of the predator.
    pub prey_size_ratio: f64,
    pub energy_gain_fraction: f64,
}

impl Default for PredationConfig {
    fn default() -> Self {
        Self {
            attack_aggression: 0.6,
            prey_size_ratio: 0.8,
            energy_gain_fraction: 0.7,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ReproductionConfig {
    /// Organisms must be strictly older than this to reproduce.
    pub maturity_age: u64,
    pub cooldown: u32,
    /// Fraction of the reproduction threshold paid by the parent.
    pub cost_fraction: f64,
    pub mate_range: f64,
    /// Per-tick chance of budding when no mate is in range.
    pub asexual_chance: f64,
    /// Offspring appear this far beyond the parent's radius.
    pub spawn_gap: f64,
    /// Fraction of the paid cost the offspring starts with.
    pub offspring_energy_fraction: f64,
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            maturity_age: 200,
            cooldown: 300,
            cost_fraction: 0.6,
            mate_range: 50.0,
            asexual_chance: 0.1,
            spawn_gap: 10.0,
            offspring_energy_fraction: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub day_cycle_ticks: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            day_cycle_ticks: 7200,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct VisualConfig {
    /// Emit cosmetic particles on feeding, kills and births
    pub particles_enabled: bool,
    /// Lifetime lost per tick (1.0 = gone after one tick)
    pub particle_decay: f64,
    /// Particles per burst
    pub particle_burst: usize,
    pub max_particles: usize,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            particles_enabled: true,
            particle_decay: 0.03,
            particle_burst: 6,
            max_particles: 2000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StatsConfig {
    /// Ticks covered by the rolling death/kill window.
    pub window: usize,
    /// Mean-energy changes at or below this are reported as stable.
    pub trend_epsilon: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window: 100,
            trend_epsilon: 0.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub population: PopulationConfig,
    pub food: FoodConfig,
    pub metabolism: MetabolismConfig,
    pub behavior: BehaviorConfig,
    pub predation: PredationConfig,
    pub reproduction: ReproductionConfig,
    pub environment: EnvironmentConfig,
    pub visual: VisualConfig,
    pub stats: StatsConfig,
    pub target_fps: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            population: PopulationConfig::default(),
            food: FoodConfig::default(),
            metabolism: MetabolismConfig::default(),
            behavior: BehaviorConfig::default(),
            predation: PredationConfig::default(),
            reproduction: ReproductionConfig::default(),
            environment: EnvironmentConfig::default(),
            visual: VisualConfig::default(),
            stats: StatsConfig::default(),
            target_fps: 60,
        }
    }
}

fn is_fraction(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(
            self.world.width.is_finite() && self.world.width > 0.0,
            "World width must be positive"
        );
        anyhow::ensure!(
            self.world.height.is_finite() && self.world.height > 0.0,
            "World height must be positive"
        );
        anyhow::ensure!(
            self.world.width <= 10000.0 && self.world.height <= 10000.0,
            "World too large (max 10000 per side)"
        );
        anyhow::ensure!(
            self.world.edge_margin >= 0.0
                && self.world.edge_margin * 2.0 < self.world.width.min(self.world.height),
            "Edge margin must leave room inside the arena"
        );
        anyhow::ensure!(
            self.world.obstacle_count_min <= self.world.obstacle_count_max,
            "Obstacle count min must not exceed max"
        );
        anyhow::ensure!(
            self.world.obstacle_size_min > 0.0
                && self.world.obstacle_size_min <= self.world.obstacle_size_max,
            "Obstacle size range must be positive and ordered"
        );
        anyhow::ensure!(
            self.world.obstacle_size_max < self.world.width.min(self.world.height),
            "Obstacles must fit inside the arena"
        );

        // Population validation
        anyhow::ensure!(
            self.population.initial_herbivores
                + self.population.initial_carnivores
                + self.population.initial_omnivores
                <= 10000,
            "Initial population too large (max 10000)"
        );
        anyhow::ensure!(
            self.population.founder_energy_fraction > 0.0
                && self.population.founder_energy_fraction <= 1.0,
            "Founder energy fraction must be in (0.0, 1.0]"
        );

        // Food validation
        anyhow::ensure!(self.food.max_food <= 10000, "Max food too large (max 10000)");
        anyhow::ensure!(self.food.spawn_interval > 0, "Food spawn interval must be positive");
        anyhow::ensure!(
            self.food.batch_min <= self.food.batch_max,
            "Food batch min must not exceed max"
        );
        anyhow::ensure!(
            self.food.radius_min > 0.0 && self.food.radius_min <= self.food.radius_max,
            "Food radius range must be positive and ordered"
        );
        anyhow::ensure!(
            self.food.energy_min >= 0.0 && self.food.energy_min <= self.food.energy_max,
            "Food energy range must be non-negative and ordered"
        );

        // Metabolism validation
        anyhow::ensure!(
            self.metabolism.base_cost >= 0.0 && self.metabolism.speed_cost >= 0.0,
            "Metabolic costs must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.max_energy_base > 0.0,
            "Base max energy must be positive"
        );
        anyhow::ensure!(
            self.metabolism.radius_min > 0.0,
            "Minimum radius must be positive"
        );

        // Behavior validation
        anyhow::ensure!(
            is_fraction(self.behavior.forage_hunger) && is_fraction(self.behavior.hunt_hunger),
            "Hunger ratios must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_fraction(self.behavior.hunt_aggression),
            "Hunt aggression must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.behavior.damping > 0.0 && self.behavior.damping <= 1.0,
            "Damping must be in (0.0, 1.0]"
        );
        anyhow::ensure!(
            self.behavior.max_speed_factor > 0.0,
            "Max speed factor must be positive"
        );
        anyhow::ensure!(
            self.behavior.target_reach >= 0.0
                && self.behavior.flock_radius >= 0.0
                && self.behavior.separation_radius >= 0.0,
            "Behavior radii must be non-negative"
        );

        // Predation validation
        anyhow::ensure!(
            is_fraction(self.predation.attack_aggression),
            "Attack aggression must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.predation.prey_size_ratio > 0.0,
            "Prey size ratio must be positive"
        );
        anyhow::ensure!(
            is_fraction(self.predation.energy_gain_fraction),
            "Predation energy gain must be in [0.0, 1.0]"
        );

        // Reproduction validation
        anyhow::ensure!(
            is_fraction(self.reproduction.cost_fraction),
            "Reproduction cost fraction must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_fraction(self.reproduction.asexual_chance),
            "Asexual chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.reproduction.mate_range >= 0.0 && self.reproduction.spawn_gap >= 0.0,
            "Reproduction distances must be non-negative"
        );
        anyhow::ensure!(
            self.reproduction.offspring_energy_fraction >= 0.0,
            "Offspring energy fraction must be non-negative"
        );

        // Environment / visual / stats validation
        anyhow::ensure!(
            self.environment.day_cycle_ticks > 0,
            "Day cycle must be at least one tick"
        );
        anyhow::ensure!(
            self.visual.particle_decay > 0.0,
            "Particle decay must be positive"
        );
        anyhow::ensure!(self.stats.window > 0, "Stats window must be positive");

        // Target FPS validation
        anyhow::ensure!(self.target_fps > 0, "Target FPS must be positive");
        anyhow::ensure!(self.target_fps <= 240, "Target FPS too high (max 240)");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is an error.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let path_ref = std::path::Path::new(path);
        if !path_ref.exists() {
            tracing::warn!(path, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path_ref)?;
        let config = Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {path}: {e}"))?;
        tracing::info!(path, fingerprint = %config.fingerprint(), "Loaded config");
        Ok(config)
    }

    /// Hash of every section that affects simulation outcomes.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.population).as_bytes());
        hasher.update(format!("{:?}", self.food).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hasher.update(format!("{:?}", self.behavior).as_bytes());
        hasher.update(format!("{:?}", self.predation).as_bytes());
        hasher.update(format!("{:?}", self.reproduction).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_world_width() {
        let config = AppConfig {
            world: WorldConfig {
                width: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_obstacle_range() {
        let config = AppConfig {
            world: WorldConfig {
                obstacle_count_min: 5,
                obstacle_count_max: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_asexual_chance() {
        let config = AppConfig {
            reproduction: ReproductionConfig {
                asexual_chance: 1.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_damping() {
        let config = AppConfig {
            behavior: BehaviorConfig {
                damping: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_target_fps() {
        let config = AppConfig {
            target_fps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [world]
            seed = 7

            [food]
            max_food = 150
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.food.max_food, 150);
        assert_eq!(config.world.width, 800.0);
        assert_eq!(config.reproduction.cooldown, 300);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(AppConfig::from_toml("[predation]\nattack_aggression = 4.0\n").is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("definitely/not/here/config.toml").expect("defaults");
        assert_eq!(config.food.initial_food, 80);
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = AppConfig::default();
        let config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());

        let mut config3 = AppConfig::default();
        config3.predation.energy_gain_fraction = 0.5;
        assert_ne!(config1.fingerprint(), config3.fingerprint());
    }
}
