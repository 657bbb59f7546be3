//! Per-frame simulation tick and the round/game state machine
//!
//! The host calls [`tick`] once per frame. Gestures and restart requests are
//! applied first, then the rolling ball (if any) advances one step.

use glam::Vec2;

use super::aim::AimVector;
use super::capture::{ShotOutcome, evaluate};
use super::motion::integrate;
use super::pocket::Pocket;
use super::state::{Drag, GameEvent, GamePhase, GameState, TimerToken, TransitionKind};

/// Pointer/touch input in table-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Press on the table
    Start(Vec2),
    /// Pointer moved while pressed
    Move(Vec2),
    /// Release (or pointer left the table)
    End,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Gestures received since the last tick, oldest first
    pub gestures: Vec<Gesture>,
    /// Restart the game
    pub restart: bool,
}

impl TickInput {
    pub fn gesture(gesture: Gesture) -> Self {
        Self {
            gestures: vec![gesture],
            restart: false,
        }
    }
}

/// Advance the game by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        events.push(state.restart());
    }

    for &gesture in &input.gestures {
        events.extend(state.handle_gesture(gesture));
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Shooting => state.step_shot(&mut events),
        GamePhase::Scored | GamePhase::MissedTurn => state.step_timer(&mut events),
        GamePhase::Idle | GamePhase::Aiming | GamePhase::GameOver => {}
    }

    events
}

impl GameState {
    /// Route a gesture to the matching aim operation
    pub fn handle_gesture(&mut self, gesture: Gesture) -> Vec<GameEvent> {
        match gesture {
            Gesture::Start(p) => self.begin_aim(p),
            Gesture::Move(p) => {
                self.update_aim(p);
                Vec::new()
            }
            Gesture::End => self.release_aim().into_iter().collect(),
        }
    }

    /// Start a drag; ignored unless the ball is at rest and the game is live
    ///
    /// A delayed transition still pending from a score or miss is applied
    /// first so the round bookkeeping is never skipped.
    pub fn begin_aim(&mut self, p: Vec2) -> Vec<GameEvent> {
        if !self.phase.accepts_aim() {
            log::debug!("ignoring drag start in {:?}", self.phase);
            return Vec::new();
        }

        let mut events = Vec::new();
        if let Some(pending) = self.pending {
            events.extend(self.fire_timer(pending.token));
        }

        self.drag = Some(Drag {
            start: p,
            current: p,
        });
        self.set_phase(GamePhase::Aiming);
        events
    }

    /// Track the pointer during a drag
    pub fn update_aim(&mut self, p: Vec2) {
        if self.phase != GamePhase::Aiming {
            return;
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.current = p;
        }
    }

    /// Finish a drag: fire if it was long enough, otherwise cancel
    pub fn release_aim(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Aiming {
            return None;
        }
        let Some(drag) = self.drag.take() else {
            self.set_phase(GamePhase::Idle);
            return None;
        };

        let aim = AimVector::from_drag(drag.start, drag.current, self.tuning.max_aim_drag_distance);
        if aim.distance < self.tuning.min_aim_drag_distance {
            log::debug!("aim cancelled (drag {:.1})", aim.distance);
            self.set_phase(GamePhase::Idle);
            return Some(GameEvent::AimCancelled);
        }

        let velocity = aim.launch_velocity(self.tuning.power_multiplier);
        log::debug!(
            "shot fired: drag {:.1}, velocity ({:.2}, {:.2})",
            aim.distance,
            velocity.x,
            velocity.y
        );
        self.ball.vel = Some(velocity);
        self.set_phase(GamePhase::Shooting);
        Some(GameEvent::ShotFired { velocity })
    }

    /// Reset score, round, lives, pocket and ball; keeps the high score
    pub fn restart(&mut self) -> GameEvent {
        self.score = 0;
        self.round = 1;
        self.lives = self.tuning.initial_lives;
        self.pocket = Pocket::for_round(&mut self.rng, 1, &self.tuning);
        self.ball.reset(self.tuning.ball_spawn());
        self.drag = None;
        self.pending = None;
        self.set_phase(GamePhase::Idle);
        // Kill outstanding tokens even if we were already idle
        self.epoch += 1;
        log::info!("game restarted");
        GameEvent::Restarted
    }

    /// Apply a delayed transition if `token` is still current
    ///
    /// Stale tokens (from before a restart or phase change) are a no-op.
    pub fn fire_timer(&mut self, token: TimerToken) -> Vec<GameEvent> {
        let Some(pending) = self.pending else {
            log::debug!("timer {:?} fired with nothing pending", token);
            return Vec::new();
        };
        if pending.token != token || token.0 != self.epoch {
            log::debug!("ignoring stale timer {:?}", token);
            return Vec::new();
        }
        self.pending = None;

        match pending.kind {
            TransitionKind::AdvanceRound => {
                self.round += 1;
                self.pocket = Pocket::for_round(&mut self.rng, self.round, &self.tuning);
                self.ball.reset(self.tuning.ball_spawn());
                self.set_phase(GamePhase::Idle);
                log::info!(
                    "round {} started (pocket radius {:.2})",
                    self.round,
                    self.pocket.radius
                );
                vec![GameEvent::RoundStarted {
                    round: self.round,
                    pocket: self.pocket,
                }]
            }
            TransitionKind::ResetBall => {
                self.ball.reset(self.tuning.ball_spawn());
                self.set_phase(GamePhase::Idle);
                vec![GameEvent::BallReset]
            }
        }
    }

    /// Count down the pending delayed transition
    fn step_timer(&mut self, events: &mut Vec<GameEvent>) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.ticks_remaining = pending.ticks_remaining.saturating_sub(1);
        if pending.ticks_remaining == 0 {
            let token = pending.token;
            events.extend(self.fire_timer(token));
        }
    }

    /// Advance the rolling ball and resolve the shot
    fn step_shot(&mut self, events: &mut Vec<GameEvent>) {
        let Some(vel) = self.ball.vel else {
            log::warn!("shooting with no velocity; skipping step");
            return;
        };

        let step = integrate(
            self.ball.pos,
            vel,
            self.tuning.friction,
            self.tuning.bounds(),
            self.ball.radius,
        );
        self.ball.pos = step.pos;
        if step.walls.any() {
            events.push(GameEvent::Cushion);
        }

        let outcome = evaluate(
            step.pos,
            step.vel,
            &self.pocket,
            self.tuning.max_pocket_entry_speed,
            self.tuning.min_velocity_threshold,
        );

        match outcome {
            ShotOutcome::Rolling => self.ball.vel = Some(step.vel),
            ShotOutcome::PassOver => {
                self.ball.vel = Some(step.vel);
                events.push(GameEvent::PassOver {
                    speed: step.vel.length(),
                });
            }
            ShotOutcome::Captured => {
                self.ball.vel = None;
                self.score += 1;
                self.set_phase(GamePhase::Scored);
                self.schedule(TransitionKind::AdvanceRound);
                log::info!("captured! score {}", self.score);
                events.push(GameEvent::Captured { score: self.score });
            }
            ShotOutcome::Missed => {
                self.ball.vel = None;
                self.lives = self.lives.saturating_sub(1);
                events.push(GameEvent::Missed { lives: self.lives });

                if self.lives == 0 {
                    let new_high_score = self.score > self.high_score;
                    if new_high_score {
                        self.high_score = self.score;
                    }
                    self.pending = None;
                    self.set_phase(GamePhase::GameOver);
                    log::info!(
                        "game over: score {} (high score {})",
                        self.score,
                        self.high_score
                    );
                    events.push(GameEvent::GameOver {
                        score: self.score,
                        new_high_score,
                    });
                } else {
                    self.set_phase(GamePhase::MissedTurn);
                    self.schedule(TransitionKind::ResetBall);
                    log::info!("missed, {} lives left", self.lives);
                }
            }
        }
    }
}
