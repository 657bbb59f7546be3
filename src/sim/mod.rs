//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Unit timestep per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod aim;
pub mod autoplay;
pub mod capture;
pub mod motion;
pub mod pocket;
pub mod state;
pub mod tick;

pub use aim::{AimLine, AimVector, aim_line, aim_line_opacity, launch_velocity};
pub use autoplay::{PlannedShot, plan_shot};
pub use capture::{ShotOutcome, evaluate};
pub use motion::{Step, WallHits, integrate};
pub use pocket::{Pocket, compute_radius, random_pocket_position};
pub use state::{
    Ball, Drag, Frame, GameEvent, GamePhase, GameState, PendingTransition, TimerToken,
    TransitionKind,
};
pub use tick::{Gesture, TickInput, tick};
