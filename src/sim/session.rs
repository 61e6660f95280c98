//! Session lifecycle: start, pause, level-up acknowledgement, game over, restart
//!
//! A [`Session`] owns every entity and counter of one game. The presentation
//! layer drives it through the lifecycle methods here and [`super::tick`], and
//! reads it back through [`RenderSnapshot`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{CollisionEvent, advance};
use super::progression::{Progression, ProgressionEvent};
use super::state::{Ball, InputState, Paddle, SessionState, Side};
use crate::tuning::Tuning;

/// Shown when the ball is missed
pub const GAME_OVER_MESSAGE: &str = "Game Over";
/// Shown after the final round
pub const VICTORY_MESSAGE: &str = "Congratulations! You won the game!";
/// Shown while paused
pub const PAUSED_MESSAGE: &str = "Paused";

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub score: u32,
    pub level: u32,
    pub round: u32,
    pub max_rounds: u32,
    /// e.g. `"3/10"`
    pub round_label: String,
    pub state: SessionState,
    /// Overlay text for the current state, if any
    pub message: Option<String>,
    /// Logical playfield size
    pub bounds: Vec2,
}

/// One game, from first serve to game over or victory
#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    state: SessionState,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    progression: Progression,
}

impl Session {
    /// New session waiting to start. `seed` drives every launch direction.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: SessionState::NotStarted,
            left: Paddle::new(Side::Left, &tuning),
            right: Paddle::new(Side::Right, &tuning),
            ball: Ball::new(&tuning),
            progression: Progression::new(&tuning),
            tuning,
        }
    }

    /// Session with default tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Tuning::default(), seed)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn left_paddle(&self) -> &Paddle {
        &self.left
    }

    pub fn right_paddle(&self) -> &Paddle {
        &self.right
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Logical playfield size
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.tuning.width, self.tuning.height)
    }

    /// `NotStarted -> Running` with a fresh random launch. Ignored in every
    /// other state.
    pub fn start(&mut self) {
        if self.state != SessionState::NotStarted {
            log::debug!("start ignored in {:?}", self.state);
            return;
        }
        self.launch();
        log::info!(
            "Round {} started, ball speed {:.1}",
            self.progression.round_label(),
            self.ball.speed
        );
    }

    /// `Running <-> Paused`. Ignored in every other state.
    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                log::info!("Paused");
            }
            SessionState::Paused => {
                self.state = SessionState::Running;
                log::info!("Resumed");
            }
            _ => log::debug!("toggle_pause ignored in {:?}", self.state),
        }
    }

    /// Resume after a level-up with a fresh launch at the increased speed.
    /// Ignored unless in `RoundWon`.
    pub fn acknowledge_level_up(&mut self) {
        if self.state != SessionState::RoundWon {
            log::debug!("acknowledge_level_up ignored in {:?}", self.state);
            return;
        }
        self.launch();
        log::info!(
            "Round {} started, ball speed {:.1}",
            self.progression.round_label(),
            self.ball.speed
        );
    }

    /// Back to `NotStarted` with every entity and counter at its initial value.
    /// Valid from any state.
    pub fn restart(&mut self) {
        self.left = Paddle::new(Side::Left, &self.tuning);
        self.right = Paddle::new(Side::Right, &self.tuning);
        self.ball = Ball::new(&self.tuning);
        self.progression.reset(&mut self.ball);
        self.state = SessionState::NotStarted;
        log::info!("Session restarted");
    }

    /// Start/restart button: start a fresh session, otherwise restart
    pub fn press_primary(&mut self) {
        if self.state == SessionState::NotStarted {
            self.start();
        } else {
            self.restart();
        }
    }

    /// Pause button: start a fresh session, otherwise toggle pause
    pub fn press_pause_button(&mut self) {
        if self.state == SessionState::NotStarted {
            self.start();
        } else {
            self.toggle_pause();
        }
    }

    /// Overlay text for the current state
    pub fn message(&self) -> Option<String> {
        match self.state {
            SessionState::GameOver => Some(GAME_OVER_MESSAGE.to_string()),
            SessionState::Victory => Some(VICTORY_MESSAGE.to_string()),
            SessionState::Paused => Some(PAUSED_MESSAGE.to_string()),
            SessionState::RoundWon => Some(format!(
                "Congratulations! Round {} complete",
                self.progression.round.saturating_sub(1)
            )),
            SessionState::NotStarted | SessionState::Running => None,
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            left_paddle: self.left.clone(),
            right_paddle: self.right.clone(),
            ball: self.ball.clone(),
            score: self.progression.score,
            level: self.progression.level,
            round: self.progression.round,
            max_rounds: self.progression.max_rounds,
            round_label: self.progression.round_label(),
            state: self.state,
            message: self.message(),
            bounds: self.bounds(),
        }
    }

    /// Move the simulation forward by `dt` seconds. Caller has already
    /// checked the session is running and sanitised `dt`.
    pub(super) fn step(&mut self, input: &InputState, dt: f32) {
        let bounds = self.bounds();
        let events = advance(
            &mut self.left,
            &mut self.right,
            &mut self.ball,
            input,
            bounds,
            dt,
        );
        self.resolve(&events);
    }

    /// Apply collision outcomes in resolution order
    fn resolve(&mut self, events: &[CollisionEvent]) {
        for event in events {
            match *event {
                CollisionEvent::WallBounce(_) => {}
                CollisionEvent::Scored(_) => match self.progression.on_score(&mut self.ball) {
                    ProgressionEvent::ScoreChanged { .. } => {}
                    ProgressionEvent::LevelUp { level, round } => {
                        self.ball.stop();
                        self.state = SessionState::RoundWon;
                        log::info!("Level {} reached, round {} next", level, round);
                    }
                    ProgressionEvent::Victory => {
                        self.ball.stop();
                        self.state = SessionState::Victory;
                        log::info!("Victory at level {}", self.progression.level);
                        return;
                    }
                },
                CollisionEvent::Missed(side) => {
                    self.ball.stop();
                    self.state = SessionState::GameOver;
                    log::info!(
                        "Game over: {:?} paddle missed at level {}, score {}",
                        side,
                        self.progression.level,
                        self.progression.score
                    );
                }
            }
        }
    }

    /// Give the ball a random heading at its current speed and run
    fn launch(&mut self) {
        let spread = self.tuning.launch_spread;
        let angle = if spread > 0.0 {
            self.rng.random_range(-spread..spread)
        } else {
            0.0
        };
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.launch(angle, direction);
        self.state = SessionState::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_at_rest() {
        let session = Session::with_seed(7);
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.ball().pos, Vec2::new(400.0, 300.0));
        assert!(!session.ball().is_moving());
        assert_eq!(session.message(), None);
    }

    #[test]
    fn test_start_launches_within_spread() {
        for seed in 0..50 {
            let mut session = Session::with_seed(seed);
            session.start();
            assert_eq!(session.state(), SessionState::Running);

            let vel = session.ball().vel;
            assert!((vel.length() - 300.0).abs() < 1e-3);
            let angle = (vel.y / vel.x.abs()).atan();
            assert!(angle.abs() <= std::f32::consts::FRAC_PI_8 + 1e-5);
        }
    }

    #[test]
    fn test_both_launch_directions_occur() {
        let mut left = 0;
        let mut right = 0;
        for seed in 0..64 {
            let mut session = Session::with_seed(seed);
            session.start();
            if session.ball().vel.x < 0.0 {
                left += 1;
            } else {
                right += 1;
            }
        }
        assert!(left > 0 && right > 0);
    }

    #[test]
    fn test_same_seed_same_launch() {
        let mut a = Session::with_seed(4242);
        let mut b = Session::with_seed(4242);
        a.start();
        b.start();
        assert_eq!(a.ball().vel, b.ball().vel);
    }

    #[test]
    fn test_start_ignored_outside_not_started() {
        let mut session = Session::with_seed(1);
        session.start();
        let vel = session.ball().vel;
        session.start();
        assert_eq!(session.ball().vel, vel);

        session.toggle_pause();
        session.start();
        assert_eq!(session.state(), SessionState::Paused);
    }

    #[test]
    fn test_toggle_pause_only_while_playing() {
        let mut session = Session::with_seed(1);
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::NotStarted);

        session.start();
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Paused);
        assert_eq!(session.message().as_deref(), Some(PAUSED_MESSAGE));
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Running);

        session.state = SessionState::GameOver;
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::GameOver);
    }

    #[test]
    fn test_miss_ends_game() {
        let mut session = Session::with_seed(3);
        session.start();
        session.ball.pos = Vec2::new(12.0, 100.0);
        session.ball.vel = Vec2::new(-300.0, 0.0);

        session.step(&InputState::default(), 0.016);
        assert_eq!(session.state(), SessionState::GameOver);
        assert!(!session.ball().is_moving());
        assert_eq!(session.message().as_deref(), Some(GAME_OVER_MESSAGE));
    }

    #[test]
    fn test_level_up_waits_for_acknowledge() {
        let mut session = Session::with_seed(5);
        session.start();
        session.progression.score = 9;
        session.ball.pos = Vec2::new(42.0, 300.0);
        session.ball.vel = Vec2::new(-300.0, 0.0);

        session.step(&InputState::default(), 0.016);
        assert_eq!(session.state(), SessionState::RoundWon);
        assert_eq!(session.progression().round, 2);
        assert_eq!(session.progression().score, 0);
        assert!(!session.ball().is_moving());
        assert!((session.ball().speed - 330.0).abs() < 1e-3);
        assert_eq!(
            session.message().as_deref(),
            Some("Congratulations! Round 1 complete")
        );

        // Only acknowledge resumes
        session.start();
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::RoundWon);

        session.acknowledge_level_up();
        assert_eq!(session.state(), SessionState::Running);
        assert!((session.ball().vel.length() - 330.0).abs() < 1e-3);

        session.acknowledge_level_up();
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_victory_then_restart() {
        let mut session = Session::with_seed(9);
        session.start();
        session.progression.round = 10;
        session.progression.level = 10;
        session.progression.score = 9;
        session.ball.pos = Vec2::new(758.0, 300.0);
        session.ball.vel = Vec2::new(300.0, 0.0);

        session.step(&InputState::default(), 0.016);
        assert_eq!(session.state(), SessionState::Victory);
        assert_eq!(session.message().as_deref(), Some(VICTORY_MESSAGE));
        assert!(session.progression().round <= session.progression().max_rounds);

        session.restart();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.progression().score, 0);
        assert_eq!(session.progression().level, 1);
        assert_eq!(session.progression().round, 1);
        assert_eq!(session.ball().speed, 300.0);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut session = Session::with_seed(11);
        session.start();
        session.left.pos.y = 0.0;
        session.right.speed = 1.0;
        session.ball.speed = 999.0;

        session.restart();
        let first = session.snapshot();
        session.restart();
        assert_eq!(session.snapshot(), first);

        assert_eq!(first.state, SessionState::NotStarted);
        assert_eq!(first.left_paddle.pos.y, 250.0);
        assert_eq!(first.right_paddle.speed, 400.0);
        assert_eq!(first.ball.speed, 300.0);
        assert_eq!(first.ball.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_buttons() {
        let mut session = Session::with_seed(2);
        session.press_pause_button();
        assert_eq!(session.state(), SessionState::Running);
        session.press_pause_button();
        assert_eq!(session.state(), SessionState::Paused);

        session.press_primary();
        assert_eq!(session.state(), SessionState::NotStarted);
        session.press_primary();
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = Session::with_seed(1);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["state"], "NotStarted");
        assert_eq!(json["roundLabel"], "1/10");
        assert_eq!(json["maxRounds"], 10);
        assert!(json["message"].is_null());
    }
}
