//! Ball motion integration
//!
//! One tick is an explicit Euler step with unit timestep, exponential
//! friction decay, then per-axis cushion reflection.

use glam::Vec2;

/// Which cushions were struck during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    /// Left or right cushion
    pub x: bool,
    /// Top or bottom cushion
    pub y: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Result of advancing the ball one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub pos: Vec2,
    pub vel: Vec2,
    pub walls: WallHits,
}

/// Advance position and velocity by one tick
///
/// `bounds` is the table size; the ball centre is kept within
/// `[radius, bound - radius]` on each axis.
pub fn integrate(pos: Vec2, vel: Vec2, friction: f32, bounds: Vec2, radius: f32) -> Step {
    let mut pos = pos + vel;
    let mut vel = vel * friction;

    let (x, vx, hit_x) = reflect_axis(pos.x, vel.x, bounds.x, radius);
    let (y, vy, hit_y) = reflect_axis(pos.y, vel.y, bounds.y, radius);
    pos = Vec2::new(x, y);
    vel = Vec2::new(vx, vy);

    Step {
        pos,
        vel,
        walls: WallHits { x: hit_x, y: hit_y },
    }
}

/// Reflect one axis off the cushions, clamping the position back inside
#[inline]
fn reflect_axis(p: f32, v: f32, bound: f32, radius: f32) -> (f32, f32, bool) {
    if p - radius < 0.0 || p + radius > bound {
        (p.clamp(radius, bound - radius), -v, true)
    } else {
        (p, v, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(400.0, 600.0);

    #[test]
    fn test_free_step() {
        let step = integrate(Vec2::new(200.0, 300.0), Vec2::new(4.0, -2.0), 0.5, BOUNDS, 10.0);
        assert_eq!(step.pos, Vec2::new(204.0, 298.0));
        assert_eq!(step.vel, Vec2::new(2.0, -1.0));
        assert!(!step.walls.any());
    }

    #[test]
    fn test_right_wall_bounce() {
        let step = integrate(Vec2::new(385.0, 300.0), Vec2::new(10.0, 0.0), 1.0, BOUNDS, 10.0);
        assert_eq!(step.pos.x, 390.0);
        assert_eq!(step.vel.x, -10.0);
        assert!(step.walls.x && !step.walls.y);
    }

    #[test]
    fn test_corner_bounce_reflects_both_axes() {
        let step = integrate(Vec2::new(12.0, 12.0), Vec2::new(-5.0, -6.0), 1.0, BOUNDS, 10.0);
        assert_eq!(step.pos, Vec2::new(10.0, 10.0));
        assert_eq!(step.vel, Vec2::new(5.0, 6.0));
        assert!(step.walls.x && step.walls.y);
    }

    #[test]
    fn test_touching_wall_is_not_a_hit() {
        let step = integrate(Vec2::new(385.0, 300.0), Vec2::new(5.0, 0.0), 1.0, BOUNDS, 10.0);
        assert_eq!(step.pos.x, 390.0);
        assert!(!step.walls.x);
    }

    proptest! {
        #[test]
        fn prop_friction_never_increases_speed(
            friction in 0.01f32..0.999,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
        ) {
            let mut pos = BOUNDS / 2.0;
            let mut vel = Vec2::new(vx, vy);
            let start = vel.length();
            for _ in 0..200 {
                let before = vel.length();
                let step = integrate(pos, vel, friction, BOUNDS, 10.0);
                prop_assert!(step.vel.length() <= before + 1e-4);
                pos = step.pos;
                vel = step.vel;
            }
            prop_assert!(vel.length() <= start * friction.powi(200) * 1.001 + 1e-4);
        }

        #[test]
        fn prop_reflection_keeps_ball_on_table(
            x in 10.0f32..390.0,
            y in 10.0f32..590.0,
            vx in -80.0f32..80.0,
            vy in -80.0f32..80.0,
        ) {
            let step = integrate(Vec2::new(x, y), Vec2::new(vx, vy), 1.0, BOUNDS, 10.0);
            prop_assert!(step.pos.x >= 10.0 && step.pos.x <= 390.0);
            prop_assert!(step.pos.y >= 10.0 && step.pos.y <= 590.0);
            // Elastic: per-axis speed is unchanged by the bounce itself
            prop_assert_eq!(step.vel.x.abs(), vx.abs());
            prop_assert_eq!(step.vel.y.abs(), vy.abs());
        }
    }
}
