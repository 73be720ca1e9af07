use crate::arena::ObstacleLogic;
use crate::config::BehaviorConfig;
use terrarium_data::{Behavior, Obstacle, Position, Velocity};

pub struct MovementContext<'a> {
    pub position: &'a mut Position,
    pub velocity: &'a mut Velocity,
    pub radius: f64,
    /// Genetic speed trait; caps velocity at `max_speed_factor` times this.
    pub speed_trait: f64,
    pub obstacles: &'a [Obstacle],
    pub width: f64,
    pub height: f64,
}

/// Integrates one tick of motion: obstacle bounce, arena bounce, damping, speed cap.
pub fn handle_movement(ctx: MovementContext, config: &BehaviorConfig) {
    ctx.position.x += ctx.velocity.vx;
    ctx.position.y += ctx.velocity.vy;

    for obstacle in ctx.obstacles {
        if !obstacle.overlaps_circle(ctx.position.x, ctx.position.y, ctx.radius) {
            continue;
        }
        if !obstacle.spans_x(ctx.position.x) {
            ctx.velocity.vx = -ctx.velocity.vx;
        }
        if !obstacle.spans_y(ctx.position.y) {
            ctx.velocity.vy = -ctx.velocity.vy;
        }
        ctx.position.x += ctx.velocity.vx;
        ctx.position.y += ctx.velocity.vy;
    }

    let r = ctx.radius;
    if ctx.position.x - r < 0.0 || ctx.position.x + r > ctx.width {
        ctx.velocity.vx = -ctx.velocity.vx;
    }
    if ctx.position.y - r < 0.0 || ctx.position.y + r > ctx.height {
        ctx.velocity.vy = -ctx.velocity.vy;
    }
    ctx.position.x = clamp_into(ctx.position.x, r, ctx.width);
    ctx.position.y = clamp_into(ctx.position.y, r, ctx.height);

    ctx.velocity.vx *= config.damping;
    ctx.velocity.vy *= config.damping;

    let max_speed = config.max_speed_factor * ctx.speed_trait;
    let speed = ctx.velocity.speed();
    if speed > max_speed && speed > 0.0 {
        let k = max_speed / speed;
        ctx.velocity.vx *= k;
        ctx.velocity.vy *= k;
    }
}

/// Clamps `v` into `[r, extent - r]`, collapsing to the center when the body is wider than the arena.
fn clamp_into(v: f64, r: f64, extent: f64) -> f64 {
    if extent <= 2.0 * r {
        extent / 2.0
    } else {
        v.clamp(r, extent - r)
    }
}

/// Appends the current position to the trail, dropping the oldest beyond `trail_length`.
pub fn record_trail(behavior: &mut Behavior, position: Position, config: &BehaviorConfig) {
    behavior.trail.push_back(position);
    while behavior.trail.len() > config.trail_length {
        behavior.trail.pop_front();
    }
}
