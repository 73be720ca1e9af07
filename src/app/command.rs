use crate::app::state::Simulation;
use terrarium_data::{LiveEvent, PlacementMode};

/// Intent sent to the simulation by an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Pause,
    Resume,
    TogglePause,
    SetSpeed(f64),
    SetPlacementMode(PlacementMode),
    /// Places at a point using `mode`, or the current placement mode when `None`.
    PlaceAt {
        x: f64,
        y: f64,
        mode: Option<PlacementMode>,
    },
    Reset,
    SetFoodCapacity(usize),
}

impl Simulation {
    /// Applies every queued command in arrival order. Returns events produced by them.
    pub(crate) fn drain_commands(&mut self) -> Vec<LiveEvent> {
        let pending: Vec<Command> = self.commands_rx.try_iter().collect();
        let mut events = Vec::new();
        for cmd in pending {
            if let Some(event) = self.apply_command(cmd) {
                events.push(event);
            }
        }
        events
    }

    /// Applies one command immediately. Rejected requests are logged, never surfaced.
    pub fn apply_command(&mut self, cmd: Command) -> Option<LiveEvent> {
        match cmd {
            Command::Pause => self.paused = true,
            Command::Resume => self.paused = false,
            Command::TogglePause => self.paused = !self.paused,
            Command::SetSpeed(speed) => {
                if let Err(e) = self.set_speed(speed) {
                    tracing::warn!(error = %e, "Speed change rejected");
                }
            }
            Command::SetPlacementMode(mode) => self.placement_mode = mode,
            Command::PlaceAt { x, y, mode } => {
                let mode = mode.unwrap_or(self.placement_mode);
                if let Err(e) = self.world.place_at(x, y, mode) {
                    tracing::debug!(error = %e, ?mode, "Placement rejected");
                }
            }
            Command::Reset => {
                self.accumulator = 0.0;
                return Some(self.world.reset());
            }
            Command::SetFoodCapacity(capacity) => {
                self.world.apply_settings(capacity);
            }
        }
        None
    }
}
