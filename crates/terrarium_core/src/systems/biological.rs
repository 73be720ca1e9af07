use crate::config::MetabolismConfig;
use crate::lifecycle;
use terrarium_data::{DeathCause, Dna, Metabolism, Velocity};

/// Energy burned this tick at the given speed.
#[must_use]
pub fn metabolic_cost(speed: f64, dna: &Dna, config: &MetabolismConfig) -> f64 {
    (config.base_cost + speed * config.speed_cost) / dna.efficiency
}

/// Pays the tick's metabolic cost, ages the organism and counts down its cooldown.
pub fn metabolize(
    metabolism: &mut Metabolism,
    velocity: &Velocity,
    dna: &Dna,
    config: &MetabolismConfig,
) -> f64 {
    let cost = metabolic_cost(velocity.speed(), dna, config);
    metabolism.energy -= cost;
    metabolism.age += 1;
    metabolism.cooldown = metabolism.cooldown.saturating_sub(1);
    cost
}

/// End-of-turn natural death check.
#[must_use]
pub fn check_death(metabolism: &Metabolism, dna: &Dna) -> Option<DeathCause> {
    lifecycle::death_cause(metabolism, dna)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metabolize() {
        let config = MetabolismConfig::default();
        let dna = Dna {
            efficiency: 0.5,
            ..Dna::default()
        };
        let mut met = Metabolism {
            energy: 50.0,
            max_energy: 100.0,
            age: 10,
            cooldown: 2,
            offspring_count: 0,
        };
        let vel = Velocity { vx: 3.0, vy: 4.0 };
        let cost = metabolize(&mut met, &vel, &dna, &config);
        assert!((cost - 1.2).abs() < 1e-12);
        assert!((met.energy - 48.8).abs() < 1e-12);
        assert_eq!(met.age, 11);
        assert_eq!(met.cooldown, 1);

        met.cooldown = 0;
        metabolize(&mut met, &vel, &dna, &config);
        assert_eq!(met.cooldown, 0);
    }

    #[test]
    fn test_starved_organism_dies() {
        let mut met = Metabolism {
            energy: 0.05,
            max_energy: 100.0,
            age: 0,
            cooldown: 0,
            offspring_count: 0,
        };
        let dna = Dna::default();
        metabolize(&mut met, &Velocity::default(), &dna, &MetabolismConfig::default());
        assert_eq!(check_death(&met, &dna), Some(DeathCause::Starvation));
    }
}
