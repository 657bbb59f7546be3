//! Pocketball - A one-pocket aiming game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, capture rules, game state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: High score persistence behind a key-value store
//! - `web`: Browser bindings for the rendering host (wasm32 only)

pub mod highscores;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use highscores::FileStore;
pub use highscores::{
    HighScoreRecord, HighScoreStore, MemoryStore, StoreError, load_high_score, save_high_score,
};
pub use sim::{GameEvent, GamePhase, GameState, Gesture, TickInput, tick};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration defaults
pub mod consts {
    /// Table dimensions (portrait layout)
    pub const TABLE_WIDTH: f32 = 400.0;
    pub const TABLE_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;

    /// Pocket defaults
    pub const INITIAL_POCKET_RADIUS: f32 = 30.0;
    /// Pocket never shrinks below this fraction of its initial radius
    pub const MIN_POCKET_RADIUS_FACTOR: f32 = 0.4;
    /// Fractional shrink applied per round
    pub const POCKET_SHRINK_RATE: f32 = 0.02;
    /// Rounds after which the pocket stops shrinking
    pub const MAX_ROUNDS_FOR_SHRINK: u32 = 50;
    /// Extra clearance between the pocket and the cushions
    pub const POCKET_MARGIN: f32 = 10.0;
    /// Max speed to drop into the pocket; faster balls pass over
    pub const MAX_POCKET_ENTRY_SPEED: f32 = 7.0;

    /// Aiming
    pub const MAX_AIM_DRAG_DISTANCE: f32 = 150.0;
    pub const MIN_AIM_DRAG_DISTANCE: f32 = 5.0;
    pub const POWER_MULTIPLIER: f32 = 0.15;
    /// Round at which the aim line is fully faded out
    pub const MAX_ROUNDS_FOR_AIM_LINE_FADE: u32 = 30;

    /// Per-tick velocity decay
    pub const FRICTION: f32 = 0.985;
    /// Below this speed the ball is considered at rest
    pub const MIN_VELOCITY_THRESHOLD: f32 = 0.1;

    pub const INITIAL_LIVES: u32 = 3;

    /// Delay before Scored/MissedTurn return to Idle (1 second at 60 Hz)
    pub const TRANSITION_DELAY_TICKS: u32 = 60;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Euclidean norm of a velocity
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

/// Direction of a vector in (-π, π]
///
/// The zero vector maps to 0. A result of exactly -π (negative-zero y on the
/// negative x axis) is folded onto π so the range stays half-open.
#[inline]
pub fn angle(v: Vec2) -> f32 {
    use std::f32::consts::PI;
    let a = v.y.atan2(v.x);
    if a <= -PI { PI } else { a }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_distance_and_magnitude() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert!((magnitude(Vec2::new(-6.0, 8.0)) - 10.0).abs() < 1e-6);
        assert_eq!(distance(Vec2::new(7.0, 7.0), Vec2::new(7.0, 7.0)), 0.0);
    }

    #[test]
    fn test_angle_range() {
        assert_eq!(angle(Vec2::ZERO), 0.0);
        assert!((angle(Vec2::new(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle(Vec2::new(-1.0, 0.0)) - PI).abs() < 1e-6);
        // -0.0 on the negative axis would give -π from atan2
        assert!((angle(Vec2::new(-1.0, -0.0)) - PI).abs() < 1e-6);
        assert!(angle(Vec2::new(1.0, -1.0)) < 0.0);
    }

    #[test]
    fn test_polar_round_trip() {
        let p = polar_to_cartesian(2.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
        assert!((angle(p) - FRAC_PI_2).abs() < 1e-6);
    }
}
