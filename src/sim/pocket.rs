//! Pocket scheduling
//!
//! The pocket shrinks geometrically each round until a cap, never below a
//! floor, and is re-placed at a random spot that keeps it clear of the
//! cushions.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The single target pocket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub pos: Vec2,
    pub radius: f32,
}

impl Pocket {
    /// Whether a point lies strictly inside the pocket
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        crate::distance(p, self.pos) < self.radius
    }

    /// Roll a pocket for the given round
    pub fn for_round<R: Rng + ?Sized>(rng: &mut R, round: u32, tuning: &Tuning) -> Self {
        let radius = tuning_radius(round, tuning);
        let pos = random_pocket_position(
            rng,
            radius,
            tuning.table_width,
            tuning.table_height,
            tuning.ball_radius,
            tuning.pocket_margin,
        );
        Self { pos, radius }
    }
}

/// Pocket radius for a round
///
/// Round 0 is treated as round 1. Past `max_shrink_rounds` the radius is
/// frozen, and it never drops below `initial_radius * min_factor`.
pub fn compute_radius(
    round: u32,
    initial_radius: f32,
    shrink_rate: f32,
    max_shrink_rounds: u32,
    min_factor: f32,
) -> f32 {
    let effective = round.clamp(1, max_shrink_rounds.max(1));
    let shrunk = initial_radius * (1.0 - shrink_rate).powi((effective - 1) as i32);
    shrunk.max(initial_radius * min_factor)
}

/// [`compute_radius`] with parameters taken from a [`Tuning`]
pub fn tuning_radius(round: u32, tuning: &Tuning) -> f32 {
    compute_radius(
        round,
        tuning.initial_pocket_radius,
        tuning.pocket_shrink_rate,
        tuning.max_rounds_for_shrink,
        tuning.min_pocket_radius_factor,
    )
}

/// Uniform point inside the table inset by `radius + ball_radius + margin`
///
/// If the inset collapses on an axis the table centre is used for that axis.
pub fn random_pocket_position<R: Rng + ?Sized>(
    rng: &mut R,
    radius: f32,
    table_width: f32,
    table_height: f32,
    ball_radius: f32,
    margin: f32,
) -> Vec2 {
    let padding = radius + ball_radius + margin;
    Vec2::new(
        sample_axis(rng, padding, table_width),
        sample_axis(rng, padding, table_height),
    )
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, padding: f32, extent: f32) -> f32 {
    let span = extent - 2.0 * padding;
    // Always draw so the RNG stream doesn't depend on table size
    let t: f32 = rng.random();
    if span > 0.0 {
        padding + t * span
    } else {
        extent / 2.0
    }
}
