//! Idle/demo mode shot planner
//!
//! Produces the drag gesture a player would make to roll the ball to rest
//! on the pocket centre, with some aim error so the demo eventually misses.

use glam::Vec2;
use rand::Rng;

use super::state::GameState;

/// A planned drag: press at `start`, release at `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedShot {
    pub start: Vec2,
    pub end: Vec2,
}

/// Launch speed that brings the ball to rest `distance` away
///
/// With per-tick decay `f` the ball travels `v0 / (1 - f)` in total; the
/// tail below the rest threshold is added back.
pub fn speed_to_stop_at(distance: f32, friction: f32, min_velocity: f32) -> f32 {
    distance * (1.0 - friction) + min_velocity
}

/// Plan a shot toward the pocket, or None if the game isn't waiting for one
///
/// `jitter` is the maximum aim error in radians.
pub fn plan_shot<R: Rng + ?Sized>(state: &GameState, rng: &mut R, jitter: f32) -> Option<PlannedShot> {
    if !state.phase.accepts_aim() {
        return None;
    }
    let t = &state.tuning;

    let to_pocket = state.pocket.pos - state.ball.pos;
    let dist = to_pocket.length();
    let error = if jitter > 0.0 {
        rng.random_range(-jitter..=jitter)
    } else {
        0.0
    };
    let heading = crate::angle(to_pocket) + error;
    let dir = crate::polar_to_cartesian(1.0, heading);

    let speed = speed_to_stop_at(dist, t.friction, t.min_velocity_threshold);
    let drag = (speed / t.power_multiplier)
        .max(t.min_aim_drag_distance + 1.0)
        .min(t.max_aim_drag_distance);

    // Pull back away from the target; the ball launches the other way
    let start = state.ball.pos;
    Some(PlannedShot {
        start,
        end: start - dir * drag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, Gesture, TickInput, tick};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_no_plan_while_shooting() {
        let mut state = GameState::with_seed(1);
        state.ball.vel = Some(Vec2::new(1.0, 0.0));
        state.phase = GamePhase::Shooting;
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(plan_shot(&state, &mut rng, 0.0).is_none());
    }

    #[test]
    fn test_plan_points_away_from_pocket() {
        let state = GameState::with_seed(8);
        let mut rng = Pcg32::seed_from_u64(1);
        let shot = plan_shot(&state, &mut rng, 0.0).unwrap();
        let pull = shot.end - shot.start;
        let to_pocket = state.pocket.pos - state.ball.pos;
        assert!(pull.dot(to_pocket) < 0.0);
    }

    #[test]
    fn test_perfect_aim_scores_first_round() {
        for seed in [1u64, 2, 3, 4, 5] {
            let mut state = GameState::with_seed(seed);
            let mut rng = Pcg32::seed_from_u64(seed);
            let shot = plan_shot(&state, &mut rng, 0.0).unwrap();
            let input = TickInput {
                gestures: vec![Gesture::Start(shot.start), Gesture::Move(shot.end), Gesture::End],
                restart: false,
            };
            tick(&mut state, &input);
            for _ in 0..1000 {
                if state.phase != GamePhase::Shooting {
                    break;
                }
                tick(&mut state, &TickInput::default());
            }
            assert_eq!(state.phase, GamePhase::Scored, "seed {}", seed);
            assert_eq!(state.score, 1);
        }
    }
}
