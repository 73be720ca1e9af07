//! Run-time metrics and structured logging for the engine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Ticks between periodic summary log lines.
pub const LOG_EVERY_TICKS: u64 = 1000;

/// Collects tick timings, population gauges and named event counters.
pub struct Metrics {
    tick_count: AtomicU64,
    organism_count: AtomicU64,
    food_count: AtomicU64,
    peak_population: AtomicU64,
    busy_nanos: AtomicU64,
    counters: Mutex<HashMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            organism_count: AtomicU64::new(0),
            food_count: AtomicU64::new(0),
            peak_population: AtomicU64::new(0),
            busy_nanos: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration and end-of-tick gauges.
    pub fn record_tick(&self, duration: Duration, organisms: usize, food: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.organism_count.store(organisms as u64, Ordering::Relaxed);
        self.food_count.store(food as u64, Ordering::Relaxed);
        self.peak_population
            .fetch_max(organisms as u64, Ordering::Relaxed);
        self.busy_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        if tick % LOG_EVERY_TICKS == 0 {
            tracing::info!(
                tick,
                organisms,
                food,
                duration_us = duration.as_micros() as u64,
                mean_tick_us = self.mean_tick_duration().as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += amount;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn organism_count(&self) -> u64 {
        self.organism_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_count(&self) -> u64 {
        self.food_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn peak_population(&self) -> u64 {
        self.peak_population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn mean_tick_duration(&self) -> Duration {
        let ticks = self.tick_count();
        if ticks == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(self.busy_nanos.load(Ordering::Relaxed) / ticks)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Drops all gauges and counters. Wall-clock start time is kept.
    pub fn reset(&self) {
        self.tick_count.store(0, Ordering::Relaxed);
        self.organism_count.store(0, Ordering::Relaxed);
        self.food_count.store(0, Ordering::Relaxed);
        self.peak_population.store(0, Ordering::Relaxed);
        self.busy_nanos.store(0, Ordering::Relaxed);
        self.counters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}
