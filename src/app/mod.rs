pub mod command;
pub mod state;

pub use command::Command;
pub use state::Simulation;

use terrarium_data::LiveEvent;

/// Highest accepted speed multiplier.
pub const MAX_SPEED: f64 = 16.0;

impl Simulation {
    /// Runs one external frame.
    ///
    /// Pending commands are applied first, in arrival order. Then, unless
    /// paused, `speed` is added to the tick accumulator and one tick runs per
    /// whole unit accumulated, so fractional speeds carry over between frames.
    pub fn frame(&mut self) -> anyhow::Result<Vec<LiveEvent>> {
        let mut events = self.drain_commands();
        if self.paused {
            return Ok(events);
        }

        self.accumulator += self.speed;
        while self.accumulator >= 1.0 {
            events.extend(self.world.update()?);
            self.accumulator -= 1.0;
        }
        Ok(events)
    }

    /// Runs exactly one tick, ignoring pause and speed.
    pub fn step(&mut self) -> anyhow::Result<Vec<LiveEvent>> {
        self.world.update()
    }
}
