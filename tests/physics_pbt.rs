use proptest::prelude::*;
use terrarium_data::{Metabolism, Obstacle, Position, Velocity};
use terrarium_lib::model::config::{BehaviorConfig, PredationConfig};
use terrarium_lib::model::spatial_hash::SpatialHash;
use terrarium_lib::model::systems::action::{handle_movement, MovementContext};
use terrarium_lib::model::systems::social::predation_gain;

prop_compose! {
    fn arb_position()(
        x in 0.0f64..800.0,
        y in 0.0f64..600.0
    ) -> (f64, f64) {
        (x, y)
    }
}

fn obstacles() -> Vec<Obstacle> {
    vec![
        Obstacle {
            x: 100.0,
            y: 100.0,
            width: 120.0,
            height: 60.0,
        },
        Obstacle {
            x: 500.0,
            y: 350.0,
            width: 40.0,
            height: 110.0,
        },
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_spatial_hash_cell_index_in_range(
        (x, y) in arb_position(),
        cell_size in 5.0f64..40.0
    ) {
        let spatial = SpatialHash::new(cell_size, 800.0, 600.0);
        if let Some(cell) = spatial.get_cell_idx(x, y) {
            prop_assert!(cell < spatial.cell_offsets.len() - 1,
                "Cell index {} out of range [0, {})", cell, spatial.cell_offsets.len() - 1);
        }
    }

    #[test]
    fn test_movement_keeps_positions_finite_and_inside(
        (x, y) in arb_position(),
        vx in -6.0f64..6.0,
        vy in -6.0f64..6.0,
        radius in 3.0f64..12.0,
        speed_trait in 0.2f64..2.0,
        steps in 1usize..50
    ) {
        let config = BehaviorConfig::default();
        let obstacles = obstacles();
        let mut position = Position::new(x, y);
        let mut velocity = Velocity { vx, vy };
        for _ in 0..steps {
            handle_movement(
                MovementContext {
                    position: &mut position,
                    velocity: &mut velocity,
                    radius,
                    speed_trait,
                    obstacles: &obstacles,
                    width: 800.0,
                    height: 600.0,
                },
                &config,
            );
            prop_assert!(position.x.is_finite() && position.y.is_finite());
            prop_assert!(position.x >= radius && position.x <= 800.0 - radius);
            prop_assert!(position.y >= radius && position.y <= 600.0 - radius);
            prop_assert!(velocity.speed() <= config.max_speed_factor * speed_trait + 1e-9);
        }
    }

    #[test]
    fn test_killing_never_costs_the_predator_energy(
        max_energy in 100.0f64..140.0,
        fill in 0.0f64..=1.0,
        prey_energy in 0.0f64..140.0
    ) {
        let predator = Metabolism {
            energy: max_energy * fill,
            max_energy,
            age: 0,
            cooldown: 0,
            offspring_count: 0,
        };
        let gain = predation_gain(&predator, prey_energy, &PredationConfig::default());
        prop_assert!(gain >= 0.0);
        prop_assert!(predator.energy + gain <= max_energy + 1e-9);
        prop_assert!(gain <= 0.7 * prey_energy + 1e-9);
    }
}
