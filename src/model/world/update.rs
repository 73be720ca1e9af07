use crate::model::interaction::{FoodView, InteractionCommand, OrganismView};
use crate::model::lifecycle::{self, OffspringSpec};
use crate::model::systems::action::{handle_movement, record_trail, MovementContext};
use crate::model::systems::behavior::{acquire_target, flocking_impulse, steer, Steering};
use crate::model::systems::biological::{check_death, metabolize};
use crate::model::systems::ecological::{colliding_food, feed, tick_food_timer};
use crate::model::systems::particles::{
    emit_burst_with_rng, species_color, update_particles, FEED_COLOR, KILL_COLOR,
};
use crate::model::systems::social::{
    attempt_reproduction, is_predator, predation_gain, select_prey, Parent, SpawnArea,
};
use crate::model::systems::stats::{
    compute_enhanced, record_stat_birth, record_stat_death, update_population_stats,
};
use crate::model::world::state::species_slot;
use crate::model::world::World;
use anyhow::Context;
use std::time::Instant;
use terrarium_data::{
    Behavior, DeathCause, Food, Genome, Identity, LiveEvent, Metabolism, Organism, Position,
    Species, Velocity,
};

/// Removals counted during one tick, fed into the rolling stats window.
#[derive(Debug, Default, Clone, Copy)]
struct TickLedger {
    deaths: u64,
    kills: u64,
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl World {
    /// Advances the simulation by one logical tick.
    ///
    /// Organisms take their turns in birth order. Each turn runs steering,
    /// physics and metabolism, then feeding, predation, reproduction and the
    /// death check, and its effects are applied before the next organism
    /// moves. Organisms born during the tick are visible to later turns but
    /// first act on the next tick.
    ///
    /// # Returns
    /// Births, deaths and extinctions that occurred this tick
    pub fn update(&mut self) -> anyhow::Result<Vec<LiveEvent>> {
        let started = Instant::now();
        self.tick += 1;
        self.environment.tick_deterministic(self.tick);
        self.prev_stats = Some(self.pop_stats.clone());
        let counts_before = self.species_counts();

        self.pass_food_indexing();
        self.prune_roster();

        let mut events = Vec::new();
        let mut ledger = TickLedger::default();
        let turn_count = self.roster.len();
        for i in 0..turn_count {
            let Some(handle) = self.roster.get(i).copied() else {
                break;
            };
            if !self.ecs.contains(handle) {
                continue;
            }
            let commands = self.run_turn(handle)?;
            self.process_interaction_commands(handle, commands, &mut events, &mut ledger);
        }

        update_particles(&mut self.particles, &self.config.visual);
        self.pass_food_spawning();

        self.stats_window.push(ledger.deaths, ledger.kills);
        self.capture_samples();
        let food = self.food_count();
        update_population_stats(&mut self.pop_stats, &self.samples, food, self.tick);
        self.enhanced_stats = compute_enhanced(
            &self.pop_stats,
            self.prev_stats.as_ref(),
            &self.samples,
            &self.stats_window,
            &self.config.stats,
        );
        self.pass_extinctions(counts_before, &mut events);

        self.metrics
            .record_tick(started.elapsed(), self.pop_stats.population, food);
        Ok(events)
    }

    fn pass_food_indexing(&mut self) {
        self.food_table.clear();
        let mut positions = Vec::new();
        for (handle, (position, food)) in self.ecs.query::<(&Position, &Food)>().iter() {
            self.food_table.push(Some(FoodView {
                handle,
                position: *position,
                radius: food.radius,
                energy: food.energy,
            }));
            positions.push((position.x, position.y));
        }
        self.food_hash
            .build_parallel(&positions, self.width, self.height);
    }

    fn prune_roster(&mut self) {
        let ecs = &self.ecs;
        self.roster.retain(|h| ecs.contains(*h));
    }

    /// Every live organism except `current`, in roster order.
    fn collect_views(&self, current: hecs::Entity) -> Vec<OrganismView<hecs::Entity>> {
        let mut views = Vec::with_capacity(self.roster.len());
        for &handle in &self.roster {
            if handle == current {
                continue;
            }
            let Ok(mut query) = self
                .ecs
                .query_one::<(&Identity, &Position, &Metabolism, &Genome)>(handle)
            else {
                continue;
            };
            let Some((identity, position, metabolism, genome)) = query.get() else {
                continue;
            };
            views.push(OrganismView {
                handle,
                id: identity.id,
                species: genome.species,
                position: *position,
                radius: lifecycle::radius_components(
                    metabolism,
                    &genome.dna,
                    &self.config.metabolism,
                ),
                energy: metabolism.energy,
                generation: identity.generation,
                dna: genome.dna,
                fertile: lifecycle::is_reproduction_eligible(
                    metabolism,
                    &genome.dna,
                    &self.config.reproduction,
                ),
            });
        }
        views
    }

    /// One organism's turn against the current world state.
    ///
    /// Self-effects are written back here; effects on other entities are
    /// returned as commands.
    fn run_turn(
        &mut self,
        handle: hecs::Entity,
    ) -> anyhow::Result<Vec<InteractionCommand<hecs::Entity>>> {
        let organism = self
            .get_organism(handle)
            .with_context(|| format!("organism {handle:?} is missing components"))?;
        let mut others = self.collect_views(handle);
        let Organism {
            identity,
            mut position,
            mut velocity,
            mut metabolism,
            genome,
            mut behavior,
        } = organism;
        let dna = genome.dna;
        let mut commands = Vec::new();

        let radius = lifecycle::radius_components(&metabolism, &dna, &self.config.metabolism);
        let me = Steering {
            species: genome.species,
            dna: &dna,
            metabolism: &metabolism,
            position,
            radius,
        };
        if let Some(target) = acquire_target(&me, &self.food_table, &others, &self.config.behavior)
        {
            behavior.target = Some(target);
        }
        let (fx, fy) = flocking_impulse(&me, &others, &self.config.behavior);
        velocity.vx += fx;
        velocity.vy += fy;
        steer(
            position,
            &mut velocity,
            &mut behavior,
            &dna,
            &self.config.behavior,
            &mut self.rng,
        );

        handle_movement(
            MovementContext {
                position: &mut position,
                velocity: &mut velocity,
                radius,
                speed_trait: dna.speed,
                obstacles: &self.obstacles,
                width: self.width,
                height: self.height,
            },
            &self.config.behavior,
        );
        record_trail(&mut behavior, position, &self.config.behavior);
        metabolize(&mut metabolism, &velocity, &dna, &self.config.metabolism);

        if genome.species.eats_food() {
            // Radius follows energy, so it is recomputed after metabolism and after each gain.
            let radius = lifecycle::radius_components(&metabolism, &dna, &self.config.metabolism);
            let hits = colliding_food(
                position,
                radius,
                &self.food_table,
                &self.food_hash,
                self.config.food.radius_max,
                &mut self.query_buffer,
            );
            for i in hits {
                if let Some(food) = self.food_table.get_mut(i).and_then(Option::take) {
                    feed(&mut metabolism, food.energy);
                    commands.push(InteractionCommand::EatFood {
                        food: food.handle,
                        x: food.position.x,
                        y: food.position.y,
                    });
                }
            }
        }

        if is_predator(genome.species, &dna, &self.config.predation) {
            let radius = lifecycle::radius_components(&metabolism, &dna, &self.config.metabolism);
            if let Some(i) = select_prey(
                position,
                radius,
                metabolism.energy,
                &others,
                &self.config.predation,
            ) {
                let prey = others.remove(i);
                let gain = predation_gain(&metabolism, prey.energy, &self.config.predation);
                metabolism.energy += gain;
                commands.push(InteractionCommand::Kill {
                    prey: prey.handle,
                    prey_id: prey.id,
                    predator_id: identity.id,
                    x: prey.position.x,
                    y: prey.position.y,
                });
            }
        }

        if lifecycle::is_reproduction_eligible(&metabolism, &dna, &self.config.reproduction) {
            let parent = Parent {
                id: identity.id,
                species: genome.species,
                generation: identity.generation,
                dna: &dna,
                position,
                radius: lifecycle::radius_components(&metabolism, &dna, &self.config.metabolism),
            };
            let area = SpawnArea {
                width: self.width,
                height: self.height,
                obstacles: &self.obstacles,
            };
            if let Some(outcome) = attempt_reproduction(
                &parent,
                &mut metabolism,
                &others,
                &area,
                &self.config.reproduction,
                &mut self.rng,
            ) {
                if outcome.offspring.is_some() {
                    metabolism.offspring_count += 1;
                }
                commands.push(InteractionCommand::Birth {
                    offspring: outcome.offspring,
                    sexual: outcome.sexual,
                    genetic_distance: outcome.genetic_distance,
                });
            }
        }

        if let Some(cause) = check_death(&metabolism, &dna) {
            commands.push(InteractionCommand::Die { cause });
        }

        let (pos, vel, met, beh) = self
            .ecs
            .query_one_mut::<(&mut Position, &mut Velocity, &mut Metabolism, &mut Behavior)>(
                handle,
            )
            .with_context(|| format!("organism {handle:?} vanished during its turn"))?;
        *pos = position;
        *vel = velocity;
        *met = metabolism;
        *beh = behavior;

        Ok(commands)
    }

    fn process_interaction_commands(
        &mut self,
        actor: hecs::Entity,
        commands: Vec<InteractionCommand<hecs::Entity>>,
        events: &mut Vec<LiveEvent>,
        ledger: &mut TickLedger,
    ) {
        for cmd in commands {
            match cmd {
                InteractionCommand::EatFood { food, x, y } => {
                    if self.ecs.despawn(food).is_ok() {
                        self.metrics.increment_counter("food_eaten");
                        emit_burst_with_rng(
                            &mut self.particles,
                            x,
                            y,
                            FEED_COLOR,
                            &self.config.visual,
                            &mut self.rng,
                        );
                    }
                }
                InteractionCommand::Kill {
                    prey,
                    prey_id,
                    predator_id,
                    x,
                    y,
                } => {
                    let cause = DeathCause::Predation {
                        predator: predator_id,
                    };
                    if self.remove_organism(prey, cause, events) {
                        ledger.deaths += 1;
                        ledger.kills += 1;
                        self.metrics.increment_counter("kills");
                        tracing::trace!(%prey_id, %predator_id, tick = self.tick, "Prey consumed");
                        emit_burst_with_rng(
                            &mut self.particles,
                            x,
                            y,
                            KILL_COLOR,
                            &self.config.visual,
                            &mut self.rng,
                        );
                    }
                }
                InteractionCommand::Birth {
                    offspring,
                    sexual,
                    genetic_distance,
                } => {
                    if let Some(spec) = offspring {
                        self.add_offspring(&spec, sexual, genetic_distance, events);
                    } else {
                        self.metrics.increment_counter("births_discarded");
                    }
                }
                InteractionCommand::Die { cause } => {
                    if self.remove_organism(actor, cause, events) {
                        ledger.deaths += 1;
                    }
                }
            }
        }
    }

    fn add_offspring(
        &mut self,
        spec: &OffspringSpec,
        sexual: bool,
        genetic_distance: f64,
        events: &mut Vec<LiveEvent>,
    ) {
        let serial = self.take_serial();
        let child = lifecycle::create_offspring_with_rng(spec, serial, &self.config, &mut self.rng);
        let id = child.identity.id;
        self.spawn_organism(child);
        record_stat_birth(&mut self.pop_stats, genetic_distance);
        self.metrics.increment_counter("births");
        emit_burst_with_rng(
            &mut self.particles,
            spec.x,
            spec.y,
            species_color(spec.species),
            &self.config.visual,
            &mut self.rng,
        );
        events.push(LiveEvent::Birth {
            id,
            parent_id: Some(spec.parent_id),
            species: spec.species,
            gen: spec.generation,
            sexual,
            tick: self.tick,
            timestamp: timestamp(),
        });
    }

    /// Despawns an organism and records its death. Returns `false` if it was already gone.
    fn remove_organism(
        &mut self,
        handle: hecs::Entity,
        cause: DeathCause,
        events: &mut Vec<LiveEvent>,
    ) -> bool {
        let Some(organism) = self.get_organism(handle) else {
            return false;
        };
        if self.ecs.despawn(handle).is_err() {
            return false;
        }
        record_stat_death(&mut self.pop_stats, organism.metabolism.age, &cause);
        self.metrics.increment_counter("deaths");
        events.push(LiveEvent::Death {
            id: organism.identity.id,
            species: organism.genome.species,
            age: organism.metabolism.age,
            offspring: organism.metabolism.offspring_count,
            cause,
            tick: self.tick,
            timestamp: timestamp(),
        });
        true
    }

    fn pass_food_spawning(&mut self) {
        let food = self.food_count();
        if let Some(batch) =
            tick_food_timer(&mut self.food_timer, food, &self.config.food, &mut self.rng)
        {
            self.spawn_food_batch(batch, 0.0);
        }
    }

    fn pass_extinctions(&mut self, before: [usize; 3], events: &mut Vec<LiveEvent>) {
        for species in Species::ALL {
            if before[species_slot(species)] > 0 && self.pop_stats.count_of(species) == 0 {
                tracing::info!(%species, tick = self.tick, "Species extinct");
                self.metrics.increment_counter("extinctions");
                events.push(LiveEvent::Extinction {
                    species,
                    tick: self.tick,
                    timestamp: timestamp(),
                });
            }
        }
    }
}
