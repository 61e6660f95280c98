//! Paddle and ball motion, wall and paddle collision
//!
//! Collision is discrete: each side is tested once per tick against the
//! ball's post-move position only. A path that crosses a paddle during the tick
//! but ends outside the paddle's vertical span is not a hit, so a fast ball can
//! tunnel past a paddle corner. This is a known limitation; the session bounds
//! it by clamping `dt` (see [`crate::consts::MAX_DT`]) rather than by sweeping
//! the ball's path.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, InputState, Paddle, Side};

/// Horizontal wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
}

/// Something the ball touched during a tick, in the order it was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// Ball reflected off a horizontal wall
    WallBounce(Wall),
    /// Ball returned by the paddle on this side
    Scored(Side),
    /// Ball left the field past this side's wall
    Missed(Side),
}

/// Advance both paddles and the ball by `dt` and resolve collisions.
///
/// Resolution order is wall, left paddle, right paddle, miss check. Each
/// check sees the ball as repositioned by the previous one.
pub fn advance(
    left: &mut Paddle,
    right: &mut Paddle,
    ball: &mut Ball,
    input: &InputState,
    bounds: Vec2,
    dt: f32,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    move_paddle(left, input, Side::Left, bounds.y, dt);
    move_paddle(right, input, Side::Right, bounds.y, dt);

    ball.pos += ball.vel * dt;

    if let Some(wall) = ball_wall_collision(ball, bounds.y) {
        events.push(CollisionEvent::WallBounce(wall));
    }
    if ball_paddle_collision(ball, left, Side::Left) {
        events.push(CollisionEvent::Scored(Side::Left));
    }
    if ball_paddle_collision(ball, right, Side::Right) {
        events.push(CollisionEvent::Scored(Side::Right));
    }
    if let Some(side) = ball_out_of_bounds(ball, bounds.x) {
        events.push(CollisionEvent::Missed(side));
    }

    events
}

fn move_paddle(paddle: &mut Paddle, input: &InputState, side: Side, bounds_height: f32, dt: f32) {
    let control = input.control(side);
    paddle.steer(control.up, control.down);
    paddle.integrate(dt, control.drag, bounds_height);
}

/// Reflect the ball off the top or bottom wall. Elastic: only the vertical
/// sign changes.
pub fn ball_wall_collision(ball: &mut Ball, bounds_height: f32) -> Option<Wall> {
    if ball.top() < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        Some(Wall::Top)
    } else if ball.bottom() > bounds_height {
        ball.pos.y = bounds_height - ball.radius;
        ball.vel.y = -ball.vel.y;
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Bounce the ball off a paddle's inner face.
///
/// Hit when the ball's leading edge has crossed the face and its centre is
/// strictly within the paddle's vertical span. On hit the ball is placed flush
/// against the face so the next tick cannot trigger again.
pub fn ball_paddle_collision(ball: &mut Ball, paddle: &Paddle, side: Side) -> bool {
    if !paddle.spans_y(ball.pos.y) {
        return false;
    }

    match side {
        Side::Left if ball.left() < paddle.right() => {
            ball.pos.x = paddle.right() + ball.radius;
        }
        Side::Right if ball.right() > paddle.left() => {
            ball.pos.x = paddle.left() - ball.radius;
        }
        _ => return false,
    }
    ball.vel.x = -ball.vel.x;
    true
}

/// Side whose wall the ball has crossed, if any
pub fn ball_out_of_bounds(ball: &Ball, bounds_width: f32) -> Option<Side> {
    if ball.left() < 0.0 {
        Some(Side::Left)
    } else if ball.right() > bounds_width {
        Some(Side::Right)
    } else {
        None
    }
}
