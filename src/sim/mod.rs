//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt, clamped per tick
//! - Seeded RNG only
//! - Fixed collision resolution order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod progression;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{CollisionEvent, Wall, advance};
pub use progression::{Progression, ProgressionEvent};
pub use session::{GAME_OVER_MESSAGE, PAUSED_MESSAGE, RenderSnapshot, Session, VICTORY_MESSAGE};
pub use state::{Ball, InputState, Paddle, PaddleControl, SessionState, Side};
pub use tick::{sanitize_dt, tick};
