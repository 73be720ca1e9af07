use crate::config::VisualConfig;
use rand::Rng;
use std::f64::consts::TAU;
use terrarium_data::{Particle, Species};

pub const FEED_COLOR: (u8, u8, u8) = (120, 220, 90);
pub const KILL_COLOR: (u8, u8, u8) = (230, 60, 50);

#[must_use]
pub fn species_color(species: Species) -> (u8, u8, u8) {
    match species {
        Species::Herbivore => (90, 200, 120),
        Species::Carnivore => (220, 80, 70),
        Species::Omnivore => (230, 180, 60),
    }
}

/// Scatters a ring of particles around a point. No-op when particles are disabled or at capacity.
pub fn emit_burst_with_rng<R: Rng>(
    particles: &mut Vec<Particle>,
    x: f64,
    y: f64,
    color: (u8, u8, u8),
    config: &VisualConfig,
    rng: &mut R,
) {
    if !config.particles_enabled {
        return;
    }
    let room = config.max_particles.saturating_sub(particles.len());
    for _ in 0..config.particle_burst.min(room) {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.5..2.0);
        particles.push(Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life: 1.0,
            color,
            size: rng.gen_range(1.0..3.0),
        });
    }
}

/// Moves and decays every particle, pruning the expired ones.
pub fn update_particles(particles: &mut Vec<Particle>, config: &VisualConfig) {
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;
        p.vx *= 0.95;
        p.vy *= 0.95;
        p.life -= config.particle_decay;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_burst_respects_capacity() {
        let config = VisualConfig {
            max_particles: 10,
            particle_burst: 6,
            ..VisualConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut particles = Vec::new();
        emit_burst_with_rng(&mut particles, 0.0, 0.0, FEED_COLOR, &config, &mut rng);
        emit_burst_with_rng(&mut particles, 0.0, 0.0, FEED_COLOR, &config, &mut rng);
        assert_eq!(particles.len(), 10);
    }

    #[test]
    fn test_particles_expire() {
        let config = VisualConfig {
            particle_decay: 0.5,
            ..VisualConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut particles = Vec::new();
        emit_burst_with_rng(&mut particles, 5.0, 5.0, KILL_COLOR, &config, &mut rng);
        update_particles(&mut particles, &config);
        assert_eq!(particles.len(), 6);
        update_particles(&mut particles, &config);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_disabled_particles() {
        let config = VisualConfig {
            particles_enabled: false,
            ..VisualConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut particles = Vec::new();
        emit_burst_with_rng(&mut particles, 0.0, 0.0, FEED_COLOR, &config, &mut rng);
        assert!(particles.is_empty());
    }
}
