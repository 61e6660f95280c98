//! Score, level and round progression

use serde::{Deserialize, Serialize};

use super::state::Ball;
use crate::tuning::Tuning;

/// Outcome of a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionEvent {
    /// Point added, no threshold reached
    ScoreChanged { score: u32 },
    /// Threshold reached; a new round begins after acknowledgement
    LevelUp { level: u32, round: u32 },
    /// Final round completed
    Victory,
}

/// Score/level/round counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Points in the current level, always below `points_per_level` between calls
    pub score: u32,
    /// Starts at 1
    pub level: u32,
    /// In `[1, max_rounds]`
    pub round: u32,
    pub max_rounds: u32,
    pub points_per_level: u32,
    speed_multiplier: f32,
    initial_ball_speed: f32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            level: 1,
            round: 1,
            max_rounds: tuning.max_rounds,
            points_per_level: tuning.points_per_level,
            speed_multiplier: tuning.level_speed_multiplier,
            initial_ball_speed: tuning.ball_speed,
        }
    }

    /// Record a returned ball.
    ///
    /// On reaching the threshold the score resets, level and round advance,
    /// and (unless that was the final round) the ball speeds up keeping its
    /// current heading.
    pub fn on_score(&mut self, ball: &mut Ball) -> ProgressionEvent {
        self.score += 1;
        if self.score < self.points_per_level {
            return ProgressionEvent::ScoreChanged { score: self.score };
        }

        self.score = 0;
        self.level += 1;
        self.round += 1;

        if self.round > self.max_rounds {
            self.round = self.max_rounds;
            log::debug!("Final round cleared at level {}", self.level);
            return ProgressionEvent::Victory;
        }

        ball.set_speed(ball.speed * self.speed_multiplier);
        log::debug!(
            "Level up: level {}, round {}/{}, ball speed {:.1}",
            self.level,
            self.round,
            self.max_rounds,
            ball.speed
        );
        ProgressionEvent::LevelUp {
            level: self.level,
            round: self.round,
        }
    }

    /// Back to level 1, round 1, and the ball's starting speed
    pub fn reset(&mut self, ball: &mut Ball) {
        self.score = 0;
        self.level = 1;
        self.round = 1;
        ball.set_speed(self.initial_ball_speed);
    }

    /// Display label such as `"3/10"`
    pub fn round_label(&self) -> String {
        format!("{}/{}", self.round, self.max_rounds)
    }
}
