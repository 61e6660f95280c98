//! Entities and lifecycle state
//!
//! Everything the session owns and mutates every tick lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Entities at rest, waiting for start
    NotStarted,
    /// Active gameplay
    Running,
    /// Frozen by the player
    Paused,
    /// Level completed, waiting for the player to acknowledge
    RoundWon,
    /// Ball missed
    GameOver,
    /// Final round completed
    Victory,
}

impl SessionState {
    /// Terminal states only leave through a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::GameOver | SessionState::Victory)
    }
}

/// Which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A paddle. Position is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity (pixels/s, negative = up)
    pub vel_y: f32,
    /// Pixels per second when a direction is held
    pub speed: f32,
}

impl Paddle {
    /// Vertically centred paddle on the given side
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        let x = match side {
            Side::Left => tuning.left_paddle_x(),
            Side::Right => tuning.right_paddle_x(),
        };
        Self {
            pos: Vec2::new(x, tuning.centered_paddle_y()),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            vel_y: 0.0,
            speed: tuning.paddle_speed,
        }
    }

    /// Set velocity from held directions. Up wins when both are held.
    pub fn steer(&mut self, up: bool, down: bool) {
        self.vel_y = if up {
            -self.speed
        } else if down {
            self.speed
        } else {
            0.0
        };
    }

    /// Integrate velocity, apply a direct drag offset, then clamp to the field
    pub fn integrate(&mut self, dt: f32, drag: f32, bounds_height: f32) {
        self.pos.y += self.vel_y * dt;
        if drag.is_finite() {
            self.pos.y += drag;
        }
        self.clamp_to(bounds_height);
    }

    /// Keep the paddle inside `[0, bounds_height - height]`
    pub fn clamp_to(&mut self, bounds_height: f32) {
        let max_y = (bounds_height - self.height).max(0.0);
        self.pos.y = self.pos.y.clamp(0.0, max_y);
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Strictly between top and bottom edges
    #[inline]
    pub fn spans_y(&self, y: f32) -> bool {
        y > self.top() && y < self.bottom()
    }
}

/// The ball. Position is the centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Magnitude used for the next launch
    pub speed: f32,
}

impl Ball {
    /// Ball at rest in the centre of the field
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.width / 2.0, tuning.height / 2.0),
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
            speed: tuning.ball_speed,
        }
    }

    /// Launch at `angle` from horizontal toward `direction` (+1 right, -1 left)
    pub fn launch(&mut self, angle: f32, direction: f32) {
        self.vel = Vec2::new(
            direction.signum() * self.speed * angle.cos(),
            self.speed * angle.sin(),
        );
    }

    /// Clear velocity
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
    }

    /// Change speed keeping the current heading (sign and angle on each axis)
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.vel = self.vel.normalize_or_zero() * speed;
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Held controls for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddleControl {
    pub up: bool,
    pub down: bool,
    /// Direct displacement from a touch drag (logical pixels)
    pub drag: f32,
}

/// Logical actions for one tick. The presentation layer maps keys and
/// touches to these; the core never sees raw device events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputState {
    pub move_left_paddle_up: bool,
    pub move_left_paddle_down: bool,
    pub move_right_paddle_up: bool,
    pub move_right_paddle_down: bool,
    /// One-shot: clear after the tick that consumed it
    pub toggle_pause: bool,
    /// Touch drag delta for the left paddle
    pub left_drag: f32,
    /// Touch drag delta for the right paddle
    pub right_drag: f32,
}

impl InputState {
    /// Controls for one side
    pub fn control(&self, side: Side) -> PaddleControl {
        match side {
            Side::Left => PaddleControl {
                up: self.move_left_paddle_up,
                down: self.move_left_paddle_down,
                drag: self.left_drag,
            },
            Side::Right => PaddleControl {
                up: self.move_right_paddle_up,
                down: self.move_right_paddle_down,
                drag: self.right_drag,
            },
        }
    }

    /// Any paddle direction held
    pub fn any_movement(&self) -> bool {
        self.move_left_paddle_up
            || self.move_left_paddle_down
            || self.move_right_paddle_up
            || self.move_right_paddle_down
    }
}
