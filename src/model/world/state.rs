use crate::model::lifecycle;
use crate::model::snapshot::{
    FoodSnapshot, InternalOrganismSnapshot, OrganismSnapshot, WorldSnapshot,
};
use crate::model::systems::stats;
use crate::model::world::World;
use terrarium_data::{
    Behavior, Food, Genome, Identity, Metabolism, Organism, Position, Species, Velocity,
};

impl World {
    /// Live organism handles in birth-serial order.
    pub fn get_sorted_handles(&self) -> Vec<hecs::Entity> {
        let mut handles: Vec<(u64, hecs::Entity)> = self
            .ecs
            .query::<&Identity>()
            .iter()
            .map(|(h, identity)| (identity.serial, h))
            .collect();
        handles.sort_unstable_by_key(|(serial, _)| *serial);
        handles.into_iter().map(|(_, h)| h).collect()
    }

    /// Reassembles one organism from its components.
    pub fn get_organism(&self, handle: hecs::Entity) -> Option<Organism> {
        let mut query = self
            .ecs
            .query_one::<(&Identity, &Position, &Velocity, &Metabolism, &Genome, &Behavior)>(handle)
            .ok()?;
        let (identity, position, velocity, metabolism, genome, behavior) = query.get()?;
        Some(Organism {
            identity: identity.clone(),
            position: *position,
            velocity: *velocity,
            metabolism: metabolism.clone(),
            genome: *genome,
            behavior: behavior.clone(),
        })
    }

    /// All live organisms in birth-serial order.
    pub fn get_all_organisms(&self) -> Vec<Organism> {
        self.get_sorted_handles()
            .into_iter()
            .filter_map(|h| self.get_organism(h))
            .collect()
    }

    pub fn get_all_food(&self) -> Vec<(Position, Food)> {
        self.ecs
            .query::<(&Position, &Food)>()
            .iter()
            .map(|(_, (p, f))| (*p, *f))
            .collect()
    }

    pub fn organism_count(&self) -> usize {
        self.ecs.query::<&Identity>().iter().count()
    }

    pub fn food_count(&self) -> usize {
        self.ecs.query::<&Food>().iter().count()
    }

    pub fn species_count(&self, species: Species) -> usize {
        self.ecs
            .query::<&Genome>()
            .iter()
            .filter(|(_, g)| g.species == species)
            .count()
    }

    pub fn species_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for (_, genome) in self.ecs.query::<&Genome>().iter() {
            counts[species_slot(genome.species)] += 1;
        }
        counts
    }

    pub fn radius_of(&self, organism: &Organism) -> f64 {
        lifecycle::radius(organism, &self.config.metabolism)
    }

    pub(crate) fn capture_samples(&mut self) {
        self.samples.clear();
        for (_, (identity, metabolism, genome)) in self
            .ecs
            .query::<(&Identity, &Metabolism, &Genome)>()
            .iter()
        {
            self.samples.push(InternalOrganismSnapshot {
                species: genome.species,
                age: metabolism.age,
                energy: metabolism.energy,
                generation: identity.generation,
                dna: genome.dna,
            });
        }
    }

    /// Recomputes counts and averages without touching trends or lifetime counters.
    pub fn refresh_population_stats(&mut self) {
        self.capture_samples();
        let food = self.food_count();
        stats::update_population_stats(&mut self.pop_stats, &self.samples, food, self.tick);
    }

    /// Read-only view of everything a renderer or UI needs.
    pub fn snapshot(&self) -> WorldSnapshot {
        let organisms = self
            .get_all_organisms()
            .into_iter()
            .map(|o| OrganismSnapshot {
                id: o.identity.id,
                species: o.genome.species,
                x: o.position.x,
                y: o.position.y,
                radius: self.radius_of(&o),
                age: o.metabolism.age,
                energy: o.metabolism.energy,
                max_energy: o.metabolism.max_energy,
                generation: o.identity.generation,
                trail: o.behavior.trail.iter().copied().collect(),
                dna: o.genome.dna,
            })
            .collect();
        let food = self
            .get_all_food()
            .into_iter()
            .map(|(p, f)| FoodSnapshot {
                x: p.x,
                y: p.y,
                radius: f.radius,
                energy: f.energy,
            })
            .collect();

        WorldSnapshot {
            tick: self.tick,
            width: self.width,
            height: self.height,
            organisms,
            food,
            obstacles: self.obstacles.clone(),
            particles: self.particles.clone(),
            stats: self.pop_stats.clone(),
            enhanced: self.enhanced_stats.clone(),
            light_phase: self.environment.light_phase(),
            is_day: self.environment.is_day(),
            ambient_level: self.environment.ambient_level(),
        }
    }
}

pub(crate) fn species_slot(species: Species) -> usize {
    match species {
        Species::Herbivore => 0,
        Species::Carnivore => 1,
        Species::Omnivore => 2,
    }
}
