//! Per-frame simulation entrypoint
//!
//! Called once per display refresh by the presentation layer's clock.

use super::session::{RenderSnapshot, Session};
use super::state::{InputState, SessionState};

/// Clamp a caller-supplied frame time into `[0, max_dt]`.
///
/// Returns `None` for negative or non-finite values; such a tick is skipped.
pub fn sanitize_dt(dt: f32, max_dt: f32) -> Option<f32> {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring tick with invalid dt {}", dt);
        return None;
    }
    Some(dt.min(max_dt))
}

/// Advance the session by one frame and return what to draw
pub fn tick(session: &mut Session, input: &InputState, dt: f32) -> RenderSnapshot {
    // Handle pause toggle
    if input.toggle_pause {
        session.toggle_pause();
    }

    let Some(dt) = sanitize_dt(dt, session.tuning().max_dt) else {
        return session.snapshot();
    };

    // First movement key serves the ball
    if session.state() == SessionState::NotStarted && input.any_movement() {
        session.start();
    }

    // Nothing moves unless running
    if session.state() != SessionState::Running {
        return session.snapshot();
    }

    session.step(input, dt);
    session.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016, 1.0 / 15.0), Some(0.016));
        assert_eq!(sanitize_dt(0.0, 1.0 / 15.0), Some(0.0));
        assert_eq!(sanitize_dt(5.0, 1.0 / 15.0), Some(1.0 / 15.0));
        assert_eq!(sanitize_dt(-0.1, 1.0 / 15.0), None);
        assert_eq!(sanitize_dt(f32::NAN, 1.0 / 15.0), None);
        assert_eq!(sanitize_dt(f32::INFINITY, 1.0 / 15.0), None);
    }

    #[test]
    fn test_tick_is_noop_before_start() {
        let mut session = Session::with_seed(12345);
        let before = session.snapshot();
        let after = tick(&mut session, &InputState::default(), FRAME_DT);
        assert_eq!(before, after);
        assert_eq!(after.state, SessionState::NotStarted);
    }

    #[test]
    fn test_movement_key_starts_session() {
        let mut session = Session::with_seed(12345);
        let input = InputState {
            move_left_paddle_down: true,
            ..Default::default()
        };
        let snapshot = tick(&mut session, &input, FRAME_DT);
        assert_eq!(snapshot.state, SessionState::Running);
        assert!(snapshot.ball.vel.length() > 0.0);
        assert!(snapshot.left_paddle.pos.y > 250.0);
    }

    #[test]
    fn test_tick_pause() {
        let mut session = Session::with_seed(12345);
        session.start();

        let pause = InputState {
            toggle_pause: true,
            ..Default::default()
        };
        let paused = tick(&mut session, &pause, FRAME_DT);
        assert_eq!(paused.state, SessionState::Paused);

        // Held keys do nothing while paused
        let held = InputState {
            move_left_paddle_up: true,
            move_right_paddle_down: true,
            ..Default::default()
        };
        for _ in 0..30 {
            let frame = tick(&mut session, &held, FRAME_DT);
            assert_eq!(frame.ball.pos, paused.ball.pos);
            assert_eq!(frame.left_paddle.pos, paused.left_paddle.pos);
            assert_eq!(frame.right_paddle.pos, paused.right_paddle.pos);
        }

        // Unpause
        let resumed = tick(&mut session, &pause, FRAME_DT);
        assert_eq!(resumed.state, SessionState::Running);
        assert_ne!(resumed.ball.pos, paused.ball.pos);
    }

    #[test]
    fn test_invalid_dt_is_skipped() {
        let mut session = Session::with_seed(12345);
        session.start();
        let before = session.snapshot();
        let after = tick(&mut session, &InputState::default(), -1.0);
        assert_eq!(before, after);
        let after = tick(&mut session, &InputState::default(), f32::NAN);
        assert_eq!(before, after);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut session = Session::with_seed(12345);
        session.start();
        let start = session.ball().pos;
        let vel = session.ball().vel;

        let snapshot = tick(&mut session, &InputState::default(), 10.0);
        let moved = snapshot.ball.pos - start;
        assert!((moved.x - vel.x / 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with same seed should produce identical results
        let mut a = Session::with_seed(99999);
        let mut b = Session::with_seed(99999);

        let inputs = [
            InputState {
                move_left_paddle_up: true,
                ..Default::default()
            },
            InputState {
                move_right_paddle_down: true,
                ..Default::default()
            },
            InputState::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                assert_eq!(tick(&mut a, input, FRAME_DT), tick(&mut b, input, FRAME_DT));
            }
        }
    }

    #[test]
    fn test_ten_hits_levels_up() {
        let mut session = Session::with_seed(777);
        session.start();

        // Rally the ball between both paddles by tracking it
        let mut hits = 0;
        let mut frames = 0;
        while session.state() == SessionState::Running && frames < 20_000 {
            let snapshot = session.snapshot();
            let input = crate::sim::autopilot::drive(&snapshot);
            let before = snapshot.score;
            let after = tick(&mut session, &input, FRAME_DT);
            if after.score > before || after.state == SessionState::RoundWon {
                hits += 1;
            }
            frames += 1;
        }

        assert_eq!(session.state(), SessionState::RoundWon);
        assert_eq!(hits, 10);
        let progression = session.progression();
        assert_eq!(progression.level, 2);
        assert_eq!(progression.round, 2);
        assert_eq!(progression.score, 0);
        assert!((session.ball().speed - 300.0 * 1.1).abs() < 1e-3);
    }
}
