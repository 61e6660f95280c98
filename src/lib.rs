//! Duo Pong - a two-paddle ball-bounce arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, progression, session lifecycle)
//! - `tuning`: Data-driven game balance
//! - `web`: Browser binding for the presentation layer (wasm32 only)
//!
//! Rendering, DOM overlays and device input live outside this crate. The
//! presentation layer feeds an [`sim::InputState`] into [`sim::tick`] once per
//! frame and draws the returned [`sim::RenderSnapshot`].

pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use sim::{InputState, RenderSnapshot, Session, SessionState, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (independent of on-screen scaling)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between a wall and the outer face of its paddle
    pub const PADDLE_MARGIN: f32 = 20.0;
    /// Pixels per second
    pub const PADDLE_SPEED: f32 = 400.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Pixels per second
    pub const BALL_START_SPEED: f32 = 300.0;
    /// Speed multiplier applied on every level-up
    pub const LEVEL_SPEED_MULTIPLIER: f32 = 1.1;
    /// Max launch angle from horizontal (22.5 degrees)
    pub const LAUNCH_SPREAD: f32 = std::f32::consts::FRAC_PI_8;

    /// Progression
    pub const POINTS_PER_LEVEL: u32 = 10;
    pub const MAX_ROUNDS: u32 = 10;

    /// Largest dt a single tick will simulate (bounds tunneling after long stalls)
    pub const MAX_DT: f32 = 1.0 / 15.0;
    /// Nominal frame time used by the native demo driver
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}
