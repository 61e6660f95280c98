//! Game balance and playfield configuration
//!
//! Every gameplay constant a session needs, loadable from JSON. The defaults
//! are the literal constants in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file.
#[derive(Debug, Error)]
pub enum TuningError {
    /// Tuning file could not be read.
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    /// Tuning file is not valid JSON for [`Tuning`].
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    /// Logical width
    pub width: f32,
    /// Logical height
    pub height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a wall and its paddle
    pub paddle_margin: f32,
    /// Pixels per second
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Starting speed, pixels per second
    pub ball_speed: f32,
    /// Multiplier applied to ball speed on level-up
    pub level_speed_multiplier: f32,
    /// Max launch angle from horizontal (radians)
    pub launch_spread: f32,

    // === Progression ===
    pub points_per_level: u32,
    pub max_rounds: u32,

    // === Timing ===
    /// Largest dt simulated by one tick (seconds)
    pub max_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_START_SPEED,
            level_speed_multiplier: LEVEL_SPEED_MULTIPLIER,
            launch_spread: LAUNCH_SPREAD,

            points_per_level: POINTS_PER_LEVEL,
            max_rounds: MAX_ROUNDS,

            max_dt: MAX_DT,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document. Missing fields keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        log::debug!("Loaded tuning: {}x{} playfield", tuning.width, tuning.height);
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every value describes a playable field
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_speed", self.paddle_speed)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_speed", self.ball_speed)?;
        positive("max_dt", self.max_dt)?;

        if !self.paddle_margin.is_finite() || self.paddle_margin < 0.0 {
            return Err(invalid("paddle_margin", "must be finite and non-negative"));
        }
        if self.paddle_height > self.height {
            return Err(invalid("paddle_height", "paddle taller than the playfield"));
        }
        if 2.0 * (self.paddle_margin + self.paddle_width) >= self.width {
            return Err(invalid("paddle_margin", "paddles overlap horizontally"));
        }
        if 2.0 * self.ball_radius >= self.height {
            return Err(invalid("ball_radius", "ball does not fit the playfield"));
        }
        if !self.level_speed_multiplier.is_finite() || self.level_speed_multiplier < 1.0 {
            return Err(invalid("level_speed_multiplier", "must be at least 1.0"));
        }
        if !self.launch_spread.is_finite()
            || !(0.0..std::f32::consts::FRAC_PI_2).contains(&self.launch_spread)
        {
            return Err(invalid("launch_spread", "must be in [0, pi/2)"));
        }
        if self.points_per_level == 0 {
            return Err(invalid("points_per_level", "must be at least 1"));
        }
        if self.max_rounds == 0 {
            return Err(invalid("max_rounds", "must be at least 1"));
        }
        Ok(())
    }

    /// X of the left paddle's top-left corner
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_margin
    }

    /// X of the right paddle's top-left corner
    pub fn right_paddle_x(&self) -> f32 {
        self.width - self.paddle_margin - self.paddle_width
    }

    /// Y of a vertically centred paddle
    pub fn centered_paddle_y(&self) -> f32 {
        self.height / 2.0 - self.paddle_height / 2.0
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and positive"))
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}
