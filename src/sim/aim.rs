//! Drag-to-shoot aiming
//!
//! The player pulls back from the ball and releases; the ball launches
//! opposite the drag direction with power proportional to the (capped) drag
//! length.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Direction and clamped length of a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimVector {
    /// Angle of the raw drag (end - start), in (-π, π]
    pub angle: f32,
    /// Drag length, capped at the max drag distance
    pub distance: f32,
}

impl AimVector {
    /// Measure a drag from `start` to `end`
    pub fn from_drag(start: Vec2, end: Vec2, max_drag_distance: f32) -> Self {
        let raw = end - start;
        Self {
            angle: crate::angle(raw),
            distance: crate::magnitude(raw).min(max_drag_distance),
        }
    }

    /// Unit vector along the drag
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// Launch velocity: pull back, release forward
    pub fn launch_velocity(&self, power_multiplier: f32) -> Vec2 {
        -self.direction() * (self.distance * power_multiplier)
    }

    /// Where the aim guide ends when drawn from `ball`
    pub fn guide_end(&self, ball: Vec2) -> Vec2 {
        ball - self.direction() * self.distance
    }
}

/// Launch velocity for a complete drag
pub fn launch_velocity(start: Vec2, end: Vec2, max_drag_distance: f32, power_multiplier: f32) -> Vec2 {
    AimVector::from_drag(start, end, max_drag_distance).launch_velocity(power_multiplier)
}

/// Aim guide segment handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimLine {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

/// Aim guide for a drag in progress, or None once it has faded out
pub fn aim_line(ball: Vec2, start: Vec2, current: Vec2, round: u32, tuning: &Tuning) -> Option<AimLine> {
    let opacity = aim_line_opacity(round, tuning.max_rounds_for_aim_line_fade);
    if opacity <= 0.0 {
        return None;
    }
    let aim = AimVector::from_drag(start, current, tuning.max_aim_drag_distance);
    Some(AimLine {
        from: ball,
        to: aim.guide_end(ball),
        opacity,
    })
}

/// Aim guide opacity: full through round 1, linear fade to zero at `fade_rounds`
pub fn aim_line_opacity(round: u32, fade_rounds: u32) -> f32 {
    if round >= fade_rounds {
        return 0.0;
    }
    if round <= 1 {
        return 1.0;
    }
    let t = (round - 1) as f32 / (fade_rounds - 1) as f32;
    (1.0 - t).clamp(0.0, 1.0)
}
