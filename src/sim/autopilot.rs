//! Idle/demo mode - both paddles follow the ball
//!
//! Synthesises the same [`InputState`] a player would produce, so the session
//! cannot tell it apart from real input.

use super::session::RenderSnapshot;
use super::state::{InputState, Paddle};

/// Paddle centre must be further than this from the ball before moving
pub const DEAD_ZONE: f32 = 8.0;

/// Input that steers each paddle's centre toward the ball
pub fn drive(snapshot: &RenderSnapshot) -> InputState {
    let target = snapshot.ball.pos.y;
    let (left_up, left_down) = follow(&snapshot.left_paddle, target);
    let (right_up, right_down) = follow(&snapshot.right_paddle, target);

    InputState {
        move_left_paddle_up: left_up,
        move_left_paddle_down: left_down,
        move_right_paddle_up: right_up,
        move_right_paddle_down: right_down,
        ..Default::default()
    }
}

/// (up, down) for one paddle
fn follow(paddle: &Paddle, target_y: f32) -> (bool, bool) {
    let offset = target_y - (paddle.pos.y + paddle.height / 2.0);
    (offset < -DEAD_ZONE, offset > DEAD_ZONE)
}
