use crate::app::command::Command;
use crate::app::MAX_SPEED;
use crate::model::config::AppConfig;
use crate::model::error::SimError;
use crate::model::snapshot::WorldSnapshot;
use crate::model::world::World;
use std::sync::mpsc::{self, Receiver, Sender};
use terrarium_data::{EnhancedStats, PlacementMode, PopulationStats};

/// Frame-driven owner of the world.
///
/// External collaborators never touch the world directly: they send
/// [`Command`]s through a channel and read snapshots.
pub struct Simulation {
    pub(crate) world: World,
    pub(crate) paused: bool,
    pub(crate) speed: f64,
    pub(crate) placement_mode: PlacementMode,
    /// Fractional ticks carried over between frames.
    pub(crate) accumulator: f64,
    pub(crate) commands_tx: Sender<Command>,
    pub(crate) commands_rx: Receiver<Command>,
}

impl Simulation {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        Ok(Self::from_world(World::new(config)?))
    }

    pub fn from_world(world: World) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel();
        Self {
            world,
            paused: false,
            speed: 1.0,
            placement_mode: PlacementMode::default(),
            accumulator: 0.0,
            commands_tx,
            commands_rx,
        }
    }

    /// A sender for queuing commands; applied at the start of the next frame.
    pub fn command_sender(&self) -> Sender<Command> {
        self.commands_tx.clone()
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), SimError> {
        if !speed.is_finite() || speed <= 0.0 || speed > MAX_SPEED {
            return Err(SimError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn set_placement_mode(&mut self, mode: PlacementMode) {
        self.placement_mode = mode;
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn placement_mode(&self) -> PlacementMode {
        self.placement_mode
    }

    #[must_use]
    pub fn stats(&self) -> &PopulationStats {
        &self.world.pop_stats
    }

    #[must_use]
    pub fn enhanced_stats(&self) -> &EnhancedStats {
        &self.world.enhanced_stats
    }

    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }
}
