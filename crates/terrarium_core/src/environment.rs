use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Minimum ambient light reported to renderers at the darkest point of the night.
pub const AMBIENT_FLOOR: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "☀️ Day",
            TimeOfDay::Night => "🌙 Night",
        }
    }
}

/// Day-night cycle. Purely presentational: no simulation rule reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub world_time: u64,
    pub day_cycle_ticks: u64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            world_time: 0,
            day_cycle_ticks: 7200,
        }
    }
}

impl Environment {
    #[must_use]
    pub fn new(day_cycle_ticks: u64) -> Self {
        Self {
            world_time: 0,
            day_cycle_ticks: day_cycle_ticks.max(1),
        }
    }

    pub fn tick(&mut self) {
        self.world_time = (self.world_time + 1) % self.day_cycle_ticks.max(1);
    }

    /// Aligns the cycle with an absolute world tick.
    pub fn tick_deterministic(&mut self, tick: u64) {
        self.world_time = tick % self.day_cycle_ticks.max(1);
    }

    /// `sin(2π · t / cycle)`, in [-1, 1].
    #[must_use]
    pub fn light_phase(&self) -> f64 {
        let cycle = self.day_cycle_ticks.max(1) as f64;
        (TAU * (self.world_time as f64 % cycle) / cycle).sin()
    }

    #[must_use]
    pub fn is_day(&self) -> bool {
        self.light_phase() > 0.0
    }

    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        if self.is_day() {
            TimeOfDay::Day
        } else {
            TimeOfDay::Night
        }
    }

    /// Light phase mapped linearly onto [`AMBIENT_FLOOR`], 1.0.
    #[must_use]
    pub fn ambient_level(&self) -> f64 {
        let half = (1.0 - AMBIENT_FLOOR) / 2.0;
        AMBIENT_FLOOR + half * (self.light_phase() + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circadian_cycle_progression() {
        let mut env = Environment::new(100);
        assert!(env.light_phase().abs() < 1e-12);
        assert_eq!(env.time_of_day(), TimeOfDay::Night);

        env.world_time = 25;
        assert!((env.light_phase() - 1.0).abs() < 1e-9);
        assert_eq!(env.time_of_day(), TimeOfDay::Day);

        for _ in 0..50 {
            env.tick();
        }
        assert_eq!(env.world_time, 75);
        assert_eq!(env.time_of_day(), TimeOfDay::Night);

        for _ in 0..25 {
            env.tick();
        }
        assert_eq!(env.world_time, 0);
    }

    #[test]
    fn test_ambient_level_range() {
        let mut env = Environment::new(7200);
        env.tick_deterministic(1800);
        assert!((env.ambient_level() - 1.0).abs() < 1e-9);
        env.tick_deterministic(5400);
        assert!((env.ambient_level() - AMBIENT_FLOOR).abs() < 1e-9);
        env.tick_deterministic(7200 + 1800);
        assert!(env.is_day());
    }
}
