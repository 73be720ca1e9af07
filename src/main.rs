use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use terrarium_data::{EnhancedStats, LiveEvent, PopulationStats};
use terrarium_lib::app::Simulation;
use terrarium_lib::model::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless artificial-life terrarium", long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Logical ticks to run
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u64,

    /// Fixed RNG seed, overriding the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks per frame
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Report every N ticks
    #[arg(long, default_value_t = 500)]
    report_every: u64,

    /// Emit reports as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    stats: &'a PopulationStats,
    enhanced: &'a EnhancedStats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load(&args.config)?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }

    let mut sim = Simulation::new(config)?;
    sim.set_speed(args.speed)?;
    let report_every = args.report_every.max(1);
    let mut next_report = report_every;

    while sim.world().tick < args.ticks {
        for event in sim.frame()? {
            if let LiveEvent::Extinction { species, tick, .. } = event {
                tracing::info!(%species, tick, "Extinction");
            }
        }

        let tick = sim.world().tick;
        if tick >= next_report {
            report(&sim, args.json)?;
            next_report = tick - tick % report_every + report_every;
        }
        if sim.stats().population == 0 {
            tracing::warn!(tick, "All organisms died, stopping");
            break;
        }
    }

    report(&sim, args.json)?;
    let metrics = &sim.world().metrics;
    tracing::info!(
        ticks = metrics.tick_count(),
        peak_population = metrics.peak_population(),
        mean_tick_us = metrics.mean_tick_duration().as_micros() as u64,
        births = metrics.counter("births"),
        deaths = metrics.counter("deaths"),
        "Run finished"
    );
    Ok(())
}

fn report(sim: &Simulation, json: bool) -> Result<()> {
    let stats = sim.stats();
    let enhanced = sim.enhanced_stats();
    if json {
        println!("{}", serde_json::to_string(&Report { stats, enhanced })?);
    } else {
        println!(
            "tick {:>6} | herb {:>3} carn {:>3} omni {:>3} | food {:>3} | births {:>5} deaths {:>5} | gen {:>3} | diversity {:.3}",
            stats.tick,
            stats.herbivores,
            stats.carnivores,
            stats.omnivores,
            stats.food_count,
            stats.reproduction_events,
            stats.death_events,
            stats.max_generation,
            enhanced.genetic_diversity,
        );
    }
    Ok(())
}
