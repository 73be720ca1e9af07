pub mod macros;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use terrarium_data::{
    Behavior, Dna, Food, Genome, Identity, Metabolism, Obstacle, Organism, Position, Species,
    Velocity,
};
use terrarium_lib::model::config::AppConfig;
use terrarium_lib::model::world::World;
use uuid::Uuid;

/// Builds a world with nothing in it except what the test adds.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    organisms: Vec<OrganismBuilder>,
    food: Vec<(f64, f64, Food)>,
    obstacles: Vec<Obstacle>,
    seed: u64,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.population.initial_herbivores = 0;
        config.population.initial_carnivores = 0;
        config.population.initial_omnivores = 0;
        config.food.initial_food = 0;
        config.world.seed = Some(0);
        Self {
            config,
            organisms: Vec::new(),
            food: Vec::new(),
            obstacles: Vec::new(),
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Organisms are spawned in the order they are added, which is their turn order.
    pub fn with_organism(mut self, organism: OrganismBuilder) -> Self {
        self.organisms.push(organism);
        self
    }

    pub fn with_food(mut self, x: f64, y: f64, radius: f64, energy: f64) -> Self {
        self.food.push((x, y, Food { radius, energy }));
        self
    }

    pub fn with_obstacle(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.obstacles.push(Obstacle {
            x,
            y,
            width,
            height,
        });
        self
    }

    pub fn build(self) -> World {
        let mut world = World::with_obstacles(
            self.config,
            self.obstacles,
            ChaCha8Rng::seed_from_u64(self.seed),
        );
        for builder in self.organisms {
            let serial = world.take_serial();
            world.spawn_organism(builder.build(serial));
        }
        for (x, y, food) in self.food {
            world.insert_food(x, y, food);
        }
        world.refresh_population_stats();
        world
    }
}

#[allow(dead_code)]
pub struct OrganismBuilder {
    species: Species,
    x: f64,
    y: f64,
    energy: f64,
    max_energy: f64,
    age: u64,
    cooldown: u32,
    generation: u32,
    dna: Dna,
    id: Option<Uuid>,
}

#[allow(dead_code)]
impl OrganismBuilder {
    pub fn new(species: Species) -> Self {
        Self {
            species,
            x: 100.0,
            y: 100.0,
            energy: 80.0,
            max_energy: 100.0,
            age: 0,
            cooldown: 0,
            generation: 0,
            dna: Dna::default(),
            id: None,
        }
    }

    pub fn herbivore() -> Self {
        Self::new(Species::Herbivore)
    }

    pub fn carnivore() -> Self {
        Self::new(Species::Carnivore)
    }

    pub fn omnivore() -> Self {
        Self::new(Species::Omnivore)
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn energy(mut self, amount: f64) -> Self {
        self.energy = amount;
        self
    }

    pub fn max_energy(mut self, amount: f64) -> Self {
        self.max_energy = amount;
        self
    }

    pub fn age(mut self, age: u64) -> Self {
        self.age = age;
        self
    }

    pub fn cooldown(mut self, ticks: u32) -> Self {
        self.cooldown = ticks;
        self
    }

    pub fn generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    pub fn dna<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut Dna),
    {
        modifier(&mut self.dna);
        self
    }

    pub fn build(self, serial: u64) -> Organism {
        Organism {
            identity: Identity {
                id: self.id.unwrap_or_else(Uuid::new_v4),
                serial,
                parent_id: None,
                generation: self.generation,
            },
            position: Position::new(self.x, self.y),
            velocity: Velocity::default(),
            metabolism: Metabolism {
                energy: self.energy,
                max_energy: self.max_energy,
                age: self.age,
                cooldown: self.cooldown,
                offspring_count: 0,
            },
            genome: Genome {
                species: self.species,
                dna: self.dna,
            },
            behavior: Behavior {
                target: None,
                trail: VecDeque::new(),
            },
        }
    }
}

#[allow(dead_code)]
pub fn find_organism(world: &World, id: Uuid) -> Option<Organism> {
    world
        .get_all_organisms()
        .into_iter()
        .find(|o| o.identity.id == id)
}
