//! Arena geometry: bounds, static obstacles and random placement.

use crate::config::WorldConfig;
use rand::Rng;
use terrarium_data::Obstacle;

pub trait ObstacleLogic {
    /// Whether the point lies inside or on the rectangle.
    fn contains(&self, x: f64, y: f64) -> bool;
    /// Whether the rectangle overlaps the circle's bounding box.
    fn overlaps_circle(&self, x: f64, y: f64, r: f64) -> bool;
    fn spans_x(&self, x: f64) -> bool;
    fn spans_y(&self, y: f64) -> bool;
}

impl ObstacleLogic for Obstacle {
    fn contains(&self, x: f64, y: f64) -> bool {
        self.spans_x(x) && self.spans_y(y)
    }

    fn overlaps_circle(&self, x: f64, y: f64, r: f64) -> bool {
        x + r > self.x
            && x - r < self.x + self.width
            && y + r > self.y
            && y - r < self.y + self.height
    }

    fn spans_x(&self, x: f64) -> bool {
        x >= self.x && x <= self.x + self.width
    }

    fn spans_y(&self, y: f64) -> bool {
        y >= self.y && y <= self.y + self.height
    }
}

#[must_use]
pub fn in_bounds(x: f64, y: f64, width: f64, height: f64) -> bool {
    x.is_finite() && y.is_finite() && (0.0..=width).contains(&x) && (0.0..=height).contains(&y)
}

#[must_use]
pub fn inside_any_obstacle(x: f64, y: f64, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| o.contains(x, y))
}

/// Places between `obstacle_count_min` and `obstacle_count_max` rectangles fully inside the arena.
pub fn generate_obstacles_with_rng<R: Rng>(config: &WorldConfig, rng: &mut R) -> Vec<Obstacle> {
    let count = rng.gen_range(config.obstacle_count_min..=config.obstacle_count_max);
    (0..count)
        .map(|_| {
            let width = rng.gen_range(config.obstacle_size_min..=config.obstacle_size_max);
            let height = rng.gen_range(config.obstacle_size_min..=config.obstacle_size_max);
            Obstacle {
                x: rng.gen_range(0.0..=(config.width - width).max(0.0)),
                y: rng.gen_range(0.0..=(config.height - height).max(0.0)),
                width,
                height,
            }
        })
        .collect()
}

/// Uniform point at least `margin` away from every arena edge.
pub fn random_point_with_rng<R: Rng>(
    width: f64,
    height: f64,
    margin: f64,
    rng: &mut R,
) -> (f64, f64) {
    let mx = margin.min(width / 2.0).max(0.0);
    let my = margin.min(height / 2.0).max(0.0);
    (rng.gen_range(mx..=width - mx), rng.gen_range(my..=height - my))
}

/// Draws points until one lies outside every obstacle, giving up after
/// `retries` attempts and accepting the last draw.
pub fn random_clear_point_with_rng<R: Rng>(
    width: f64,
    height: f64,
    margin: f64,
    obstacles: &[Obstacle],
    retries: usize,
    rng: &mut R,
) -> (f64, f64) {
    let mut point = random_point_with_rng(width, height, margin, rng);
    for _ in 1..retries {
        if !inside_any_obstacle(point.0, point.1, obstacles) {
            break;
        }
        point = random_point_with_rng(width, height, margin, rng);
    }
    point
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn block() -> Obstacle {
        Obstacle {
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 10.0,
        }
    }

    #[test]
    fn test_obstacle_contains() {
        let o = block();
        assert!(o.contains(10.0, 20.0));
        assert!(o.contains(25.0, 25.0));
        assert!(!o.contains(41.0, 25.0));
        assert!(!o.contains(25.0, 19.0));
    }

    #[test]
    fn test_obstacle_overlaps_circle() {
        let o = block();
        assert!(o.overlaps_circle(8.0, 25.0, 3.0));
        assert!(!o.overlaps_circle(5.0, 25.0, 3.0));
    }

    #[test]
    fn test_in_bounds() {
        assert!(in_bounds(0.0, 600.0, 800.0, 600.0));
        assert!(!in_bounds(-0.1, 10.0, 800.0, 600.0));
        assert!(!in_bounds(10.0, f64::NAN, 800.0, 600.0));
    }

    #[test]
    fn test_generated_obstacles_fit_arena() {
        let config = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            let obstacles = generate_obstacles_with_rng(&config, &mut rng);
            assert!((3..=6).contains(&obstacles.len()));
            for o in &obstacles {
                assert!(o.x >= 0.0 && o.x + o.width <= config.width);
                assert!(o.y >= 0.0 && o.y + o.height <= config.height);
            }
        }
    }

    #[test]
    fn test_clear_point_avoids_obstacles() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let obstacles = vec![Obstacle {
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 100.0,
        }];
        for _ in 0..100 {
            let (x, y) = random_clear_point_with_rng(100.0, 100.0, 0.0, &obstacles, 50, &mut rng);
            assert!(in_bounds(x, y, 100.0, 100.0));
            assert!(!inside_any_obstacle(x, y, &obstacles));
        }
    }

    #[test]
    fn test_margin_respected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            let (x, y) = random_point_with_rng(800.0, 600.0, 50.0, &mut rng);
            assert!((50.0..=750.0).contains(&x));
            assert!((50.0..=550.0).contains(&y));
        }
    }
}
