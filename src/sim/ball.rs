//! Ball physics: integration, wall bounce, goals, paddle rebound
//!
//! The ball is created once per match and ticked until it scores, then
//! frozen until the scene resets it. Players are handed in by the caller
//! each tick; the ball holds no references of its own.

use glam::Vec2;

use crate::audio::{AudioCue, CueQueue};
use crate::consts::*;

use super::paddle::Player;

/// Goal line the ball went out over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// Out past +80; the left player scored
    PastRight,
    /// Out past -80; the right player scored
    PastLeft,
}

impl Goal {
    /// Index into the player pair of whoever scored
    pub fn scorer(self) -> usize {
        match self {
            Goal::PastRight => 0,
            Goal::PastLeft => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BallController {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half-extent of the square ball
    pub size: f32,
    pub scored: bool,
    pub winner: Option<Goal>,
}

impl BallController {
    /// Serve from center toward the right at `serve_speed`
    pub fn new(serve_speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(serve_speed, 0.0),
            size: BALL_SIZE,
            scored: false,
            winner: None,
        }
    }

    /// Re-center and serve toward the side that just conceded
    pub fn reset(&mut self) {
        self.pos = Vec2::ZERO;
        self.vel = Vec2::new(-self.vel.x, 0.0);
        self.scored = false;
        self.winner = None;
    }

    /// Advance one tick. Paddles must already be updated for this tick.
    /// Scoring and paddle contact are mutually exclusive within a tick, and
    /// at most one paddle can rebound the ball.
    pub fn tick(&mut self, dt: f32, players: &mut [Player; 2], cues: &mut CueQueue) {
        if self.scored {
            return;
        }

        self.pos += self.vel * dt;

        // wall bounce, no energy loss
        if self.pos.y + self.size > WALL_Y {
            self.pos.y = WALL_Y - self.size;
            self.vel.y = -self.vel.y;
        }
        if self.pos.y - self.size < -WALL_Y {
            self.pos.y = -WALL_Y + self.size;
            self.vel.y = -self.vel.y;
        }

        // goal lines take priority over paddle contact
        if self.pos.x + self.size > GOAL_X {
            self.pos.x = GOAL_X + self.size;
            self.score_goal(Goal::PastRight, players, cues);
            return;
        }
        if self.pos.x - self.size < -GOAL_X {
            self.pos.x = -GOAL_X - self.size;
            self.score_goal(Goal::PastLeft, players, cues);
            return;
        }

        for player in players.iter_mut() {
            if self.rebound_off(player, cues) {
                return;
            }
        }
    }

    fn score_goal(&mut self, goal: Goal, players: &mut [Player; 2], cues: &mut CueQueue) {
        self.scored = true;
        self.winner = Some(goal);
        players[goal.scorer()].score += 1;
        cues.push(AudioCue::Score);
    }

    /// Axis-aligned overlap test and rebound against one paddle
    fn rebound_off(&mut self, player: &mut Player, cues: &mut CueQueue) -> bool {
        let paddle = player.controller.pos;
        let overlap_x = (self.pos.x - paddle.x).abs() <= player.half_width + self.size;
        let overlap_y = (self.pos.y - paddle.y).abs() <= player.half_height + self.size;
        if !overlap_x || !overlap_y {
            return false;
        }

        // place the ball flush on the face it arrived at, so it cannot
        // stick inside the paddle on the next tick
        if self.vel.x < 0.0 {
            self.pos.x = paddle.x + player.half_width + self.size;
        } else {
            self.pos.x = paddle.x - player.half_width - self.size;
        }

        player.pulse_timer = HIT_PULSE_SECS;

        self.vel.x = -self.vel.x + BOUNCE_EPSILON;

        // bounce angle from contact offset on the face, plus english from
        // the paddle's own motion
        let hit = (self.pos.y - paddle.y) / player.half_height;
        self.vel.y +=
            hit * HIT_INFLUENCE + player.controller.vel_y * PADDLE_INFLUENCE + BOUNCE_EPSILON;

        cues.push(AudioCue::PaddleHit);
        true
    }
}
