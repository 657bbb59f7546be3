//! Pocket capture and miss detection
//!
//! Evaluated after every motion step. A ball must be both inside the pocket
//! and slower than the entry limit to drop; faster balls roll over it.

use glam::Vec2;

use super::pocket::Pocket;

/// What happened to the shot this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Still moving, not over the pocket
    Rolling,
    /// Over the pocket but too fast to drop
    PassOver,
    /// Dropped into the pocket; the shot is over
    Captured,
    /// Came to rest outside the pocket; the shot is over
    Missed,
}

impl ShotOutcome {
    /// Whether the shot ended this tick
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShotOutcome::Captured | ShotOutcome::Missed)
    }
}

/// Classify the ball state after a motion step
///
/// Capture short-circuits; otherwise a ball below `min_velocity` is at rest
/// and the stop position decides between capture and miss.
pub fn evaluate(
    pos: Vec2,
    vel: Vec2,
    pocket: &Pocket,
    max_entry_speed: f32,
    min_velocity: f32,
) -> ShotOutcome {
    let speed = crate::magnitude(vel);
    let inside = pocket.contains(pos);

    if inside && speed < max_entry_speed {
        return ShotOutcome::Captured;
    }

    if speed < min_velocity {
        return if inside {
            ShotOutcome::Captured
        } else {
            ShotOutcome::Missed
        };
    }

    if inside {
        ShotOutcome::PassOver
    } else {
        ShotOutcome::Rolling
    }
}
