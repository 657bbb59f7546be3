//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Defaults mirror
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    /// File could not be read
    Io(std::io::Error),
    /// JSON was malformed or had wrong field types
    Parse(serde_json::Error),
    /// A value is outside the range the simulation can handle
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            TuningError::Parse(e) => write!(f, "failed to parse tuning JSON: {}", e),
            TuningError::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "tuning value {} = {} out of range ({})", field, value, expected),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::OutOfRange { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance, fixed for the lifetime of a [`crate::sim::GameState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Table ===
    pub table_width: f32,
    pub table_height: f32,
    pub ball_radius: f32,

    // === Pocket ===
    pub initial_pocket_radius: f32,
    pub pocket_shrink_rate: f32,
    pub min_pocket_radius_factor: f32,
    pub max_rounds_for_shrink: u32,
    pub pocket_margin: f32,
    pub max_pocket_entry_speed: f32,

    // === Motion ===
    pub friction: f32,
    pub min_velocity_threshold: f32,

    // === Aiming ===
    pub max_aim_drag_distance: f32,
    pub min_aim_drag_distance: f32,
    pub power_multiplier: f32,
    pub max_rounds_for_aim_line_fade: u32,

    // === Rules ===
    pub initial_lives: u32,
    /// Ticks spent in Scored/MissedTurn before returning to Idle
    pub transition_delay_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            table_width: TABLE_WIDTH,
            table_height: TABLE_HEIGHT,
            ball_radius: BALL_RADIUS,

            initial_pocket_radius: INITIAL_POCKET_RADIUS,
            pocket_shrink_rate: POCKET_SHRINK_RATE,
            min_pocket_radius_factor: MIN_POCKET_RADIUS_FACTOR,
            max_rounds_for_shrink: MAX_ROUNDS_FOR_SHRINK,
            pocket_margin: POCKET_MARGIN,
            max_pocket_entry_speed: MAX_POCKET_ENTRY_SPEED,

            friction: FRICTION,
            min_velocity_threshold: MIN_VELOCITY_THRESHOLD,

            max_aim_drag_distance: MAX_AIM_DRAG_DISTANCE,
            min_aim_drag_distance: MIN_AIM_DRAG_DISTANCE,
            power_multiplier: POWER_MULTIPLIER,
            max_rounds_for_aim_line_fade: MAX_ROUNDS_FOR_AIM_LINE_FADE,

            initial_lives: INITIAL_LIVES,
            transition_delay_ticks: TRANSITION_DELAY_TICKS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults when absent or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(TuningError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found; using compiled defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using compiled defaults", e);
                Self::default()
            }
        }
    }

    /// Reject values that would break the table invariants or stall a shot
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(
            field: &'static str,
            value: f32,
            ok: bool,
            expected: &'static str,
        ) -> Result<(), TuningError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::OutOfRange {
                    field,
                    value,
                    expected,
                })
            }
        }

        check("ball_radius", self.ball_radius, self.ball_radius > 0.0, "> 0")?;
        check(
            "table_width",
            self.table_width,
            self.table_width > 2.0 * self.ball_radius,
            "> 2 * ball_radius",
        )?;
        check(
            "table_height",
            self.table_height,
            self.table_height > 2.0 * self.ball_radius,
            "> 2 * ball_radius",
        )?;
        check(
            "initial_pocket_radius",
            self.initial_pocket_radius,
            self.initial_pocket_radius > 0.0,
            "> 0",
        )?;
        check(
            "pocket_shrink_rate",
            self.pocket_shrink_rate,
            (0.0..1.0).contains(&self.pocket_shrink_rate),
            "[0, 1)",
        )?;
        check(
            "min_pocket_radius_factor",
            self.min_pocket_radius_factor,
            self.min_pocket_radius_factor > 0.0 && self.min_pocket_radius_factor <= 1.0,
            "(0, 1]",
        )?;
        check("pocket_margin", self.pocket_margin, self.pocket_margin >= 0.0, ">= 0")?;
        check(
            "friction",
            self.friction,
            self.friction > 0.0 && self.friction < 1.0,
            "(0, 1)",
        )?;
        check(
            "min_velocity_threshold",
            self.min_velocity_threshold,
            self.min_velocity_threshold > 0.0,
            "> 0",
        )?;
        check(
            "max_pocket_entry_speed",
            self.max_pocket_entry_speed,
            self.max_pocket_entry_speed > 0.0,
            "> 0",
        )?;
        check(
            "max_aim_drag_distance",
            self.max_aim_drag_distance,
            self.max_aim_drag_distance > self.min_aim_drag_distance,
            "> min_aim_drag_distance",
        )?;
        check(
            "min_aim_drag_distance",
            self.min_aim_drag_distance,
            self.min_aim_drag_distance >= 0.0,
            ">= 0",
        )?;
        check(
            "power_multiplier",
            self.power_multiplier,
            self.power_multiplier > 0.0,
            "> 0",
        )?;
        check(
            "initial_lives",
            self.initial_lives as f32,
            self.initial_lives > 0,
            ">= 1",
        )?;
        check(
            "max_rounds_for_shrink",
            self.max_rounds_for_shrink as f32,
            self.max_rounds_for_shrink > 0,
            ">= 1",
        )?;
        check(
            "max_rounds_for_aim_line_fade",
            self.max_rounds_for_aim_line_fade as f32,
            self.max_rounds_for_aim_line_fade > 1,
            ">= 2",
        )?;
        Ok(())
    }

    /// Table size as a vector (width, height)
    pub fn bounds(&self) -> glam::Vec2 {
        glam::Vec2::new(self.table_width, self.table_height)
    }

    /// Where the ball is placed at the start of each turn
    pub fn ball_spawn(&self) -> glam::Vec2 {
        self.bounds() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.ball_spawn(), glam::Vec2::new(200.0, 300.0));
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{ "friction": 0.95, "initial_lives": 5 }"#).unwrap();
        assert_eq!(tuning.friction, 0.95);
        assert_eq!(tuning.initial_lives, 5);
        // Untouched fields keep their defaults
        assert_eq!(tuning.table_width, TABLE_WIDTH);
        assert_eq!(tuning.max_pocket_entry_speed, MAX_POCKET_ENTRY_SPEED);
    }

    #[test]
    fn test_rejects_bad_friction() {
        let err = Tuning::from_json(r#"{ "friction": 1.2 }"#).unwrap_err();
        match err {
            TuningError::OutOfRange { field, .. } => assert_eq!(field, "friction"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ friction: "),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/nonexistent/pocketball/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
