//! Game state and core simulation types
//!
//! The whole game lives in one [`GameState`] value owned by the host.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aim::{AimLine, aim_line};
use super::pocket::Pocket;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at rest, waiting for a drag
    Idle,
    /// Drag in progress
    Aiming,
    /// Ball rolling
    Shooting,
    /// Ball dropped; next round starts after a delay
    Scored,
    /// Ball stopped outside the pocket; ball resets after a delay
    MissedTurn,
    /// Out of lives
    GameOver,
}

impl GamePhase {
    /// Phases in which a new drag may begin
    pub fn accepts_aim(&self) -> bool {
        matches!(
            self,
            GamePhase::Idle | GamePhase::Scored | GamePhase::MissedTurn
        )
    }
}

/// The cue ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Present only while a shot is in flight
    pub vel: Option<Vec2>,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: None,
            radius,
        }
    }

    /// Put the ball back on the spot, at rest
    pub fn reset(&mut self, spot: Vec2) {
        self.pos = spot;
        self.vel = None;
    }
}

/// A drag gesture in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drag {
    pub start: Vec2,
    pub current: Vec2,
}

/// Identifies one scheduled delayed transition
///
/// Tokens from before a restart or phase change no longer match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(pub u64);

/// What a delayed transition does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// After a score: next round, new pocket, ball reset
    AdvanceRound,
    /// After a miss: ball reset, same round
    ResetBall,
}

/// A one-shot delayed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub kind: TransitionKind,
    pub token: TimerToken,
    pub ticks_remaining: u32,
}

/// Notifications emitted by the simulation for hosts (sound, HUD, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Drag released with enough power
    ShotFired { velocity: Vec2 },
    /// Drag released too short to count
    AimCancelled,
    /// Ball struck a cushion
    Cushion,
    /// Ball rolled over the pocket too fast
    PassOver { speed: f32 },
    /// Ball dropped
    Captured { score: u32 },
    /// Ball stopped outside the pocket
    Missed { lives: u32 },
    /// A new round began with a fresh pocket
    RoundStarted { round: u32, pocket: Pocket },
    /// Ball returned to the spot after a miss
    BallReset,
    /// Out of lives
    GameOver { score: u32, new_high_score: bool },
    /// Game reset to its initial state
    Restarted,
}

/// Snapshot handed to the renderer each frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub ball: Vec2,
    pub ball_radius: f32,
    pub pocket: Pocket,
    pub aim_line: Option<AimLine>,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub round: u32,
    pub table_width: f32,
    pub table_height: f32,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Fixed balance for this game
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Pocket placement RNG
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub ball: Ball,
    pub pocket: Pocket,
    /// Round number, starting at 1
    pub round: u32,
    pub lives: u32,
    pub score: u32,
    /// Best score known to the persistence layer
    pub high_score: u32,
    pub drag: Option<Drag>,
    pub pending: Option<PendingTransition>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Bumped on every phase change and restart; stamps timer tokens
    pub(crate) epoch: u64,
}

impl GameState {
    /// Create a new game with the given balance, seed, and stored high score
    pub fn new(tuning: Tuning, seed: u64, high_score: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pocket = Pocket::for_round(&mut rng, 1, &tuning);
        let ball = Ball::new(tuning.ball_spawn(), tuning.ball_radius);
        Self {
            lives: tuning.initial_lives,
            tuning,
            seed,
            rng,
            phase: GamePhase::Idle,
            ball,
            pocket,
            round: 1,
            score: 0,
            high_score,
            drag: None,
            pending: None,
            time_ticks: 0,
            epoch: 0,
        }
    }

    /// Create a game with default balance
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Tuning::default(), seed, 0)
    }

    /// Switch phase, invalidating any outstanding timer token
    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::trace!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.epoch += 1;
        }
    }

    /// Schedule a delayed transition stamped with the current epoch
    pub(crate) fn schedule(&mut self, kind: TransitionKind) -> TimerToken {
        let token = TimerToken(self.epoch);
        self.pending = Some(PendingTransition {
            kind,
            token,
            ticks_remaining: self.tuning.transition_delay_ticks,
        });
        token
    }

    /// Renderer snapshot for the current state
    pub fn frame(&self) -> Frame {
        let aim_line = match (self.phase, self.drag) {
            (GamePhase::Aiming, Some(drag)) => {
                aim_line(self.ball.pos, drag.start, drag.current, self.round, &self.tuning)
            }
            _ => None,
        };
        Frame {
            phase: self.phase,
            ball: self.ball.pos,
            ball_radius: self.ball.radius,
            pocket: self.pocket,
            aim_line,
            score: self.score,
            high_score: self.high_score,
            lives: self.lives,
            round: self.round,
            table_width: self.tuning.table_width,
            table_height: self.tuning.table_height,
        }
    }

    /// Whether a shot is in flight
    pub fn is_shooting(&self) -> bool {
        self.phase == GamePhase::Shooting && self.ball.vel.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::with_seed(12345);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.round, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.pocket.radius, 30.0);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 300.0));
        assert!(state.ball.vel.is_none());
        assert!(!state.is_shooting());
    }

    #[test]
    fn test_same_seed_same_pocket() {
        let a = GameState::with_seed(99);
        let b = GameState::with_seed(99);
        assert_eq!(a.pocket, b.pocket);
    }

    #[test]
    fn test_phase_change_bumps_epoch() {
        let mut state = GameState::with_seed(1);
        let before = state.epoch;
        state.set_phase(GamePhase::Idle);
        assert_eq!(state.epoch, before);
        state.set_phase(GamePhase::Aiming);
        assert_eq!(state.epoch, before + 1);
    }

    #[test]
    fn test_frame_serializes() {
        let state = GameState::with_seed(5);
        let json = serde_json::to_string(&state.frame()).unwrap();
        assert!(json.contains("\"phase\":\"Idle\""));
        assert!(json.contains("\"aim_line\":null"));
    }
}
