//! Paddle physics and per-player state
//!
//! A paddle is driven once per tick by exactly one driver - human input or
//! the AI - which hands in a summed acceleration. Both go through the same
//! [`PaddleController::tick`] path, so control schemes are interchangeable.

use glam::Vec2;

use crate::config::MatchConfig;
use crate::consts::*;
use crate::input::{Button, InputSnapshot};
use crate::lighten;

/// Integrates one paddle along the y axis
#[derive(Debug, Clone)]
pub struct PaddleController {
    pub pos: Vec2,
    /// Vertical velocity
    pub vel_y: f32,
    /// Acceleration magnitude one driver impulse contributes
    pub accel_speed: f32,
    /// Linear drag coefficient
    pub damping: f32,
}

impl PaddleController {
    pub fn new(x: f32, accel_speed: f32, damping: f32) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            vel_y: 0.0,
            accel_speed,
            damping,
        }
    }

    /// Advance one tick with the driver's summed acceleration.
    ///
    /// Drag and the position step both read the start-of-tick velocity; the
    /// velocity update comes last. This ordering is part of the paddle's
    /// trajectory shape and must not be rearranged.
    pub fn tick(&mut self, dt: f32, accel: f32, half_height: f32) {
        let accel = accel - self.vel_y * self.damping;
        self.pos.y += self.vel_y * dt + 0.5 * accel * dt * dt;
        self.vel_y += accel * dt;

        // inelastic wall clamp
        let limit = WALL_Y - half_height;
        if self.pos.y > limit {
            self.pos.y = limit;
            self.vel_y *= -WALL_RESTITUTION;
        }
        if self.pos.y < -limit {
            self.pos.y = -limit;
            self.vel_y *= -WALL_RESTITUTION;
        }
    }
}

/// One of the two match participants
#[derive(Debug, Clone)]
pub struct Player {
    pub controller: PaddleController,
    pub score: u32,
    pub half_width: f32,
    pub half_height: f32,
    pub color: u32,
    pub ai_mode: bool,
    /// Arrow-cluster bindings when true, letter-cluster otherwise
    pub arrow_controls: bool,
    /// Seconds left on the contact flash
    pub pulse_timer: f32,
}

impl Player {
    pub fn new(arrow_controls: bool) -> Self {
        Self {
            controller: PaddleController::new(0.0, PADDLE_ACCEL_SCALE, PADDLE_DAMPING_SCALE),
            score: 0,
            half_width: PADDLE_HALF_WIDTH,
            half_height: PADDLE_HALF_HEIGHT,
            color: if arrow_controls { 0x004DABF7 } else { 0x00FF6B6B },
            ai_mode: false,
            arrow_controls,
            pulse_timer: 0.0,
        }
    }

    /// Re-arm for a fresh match at rest position `x`
    pub fn start_match(&mut self, x: f32, ai_mode: bool, config: &MatchConfig) {
        self.controller = PaddleController::new(
            x,
            config.paddle_speed * PADDLE_ACCEL_SCALE,
            config.paddle_damping * PADDLE_DAMPING_SCALE,
        );
        self.ai_mode = ai_mode;
        self.score = 0;
        self.pulse_timer = 0.0;
    }

    /// Between rounds: back to center, standing still; score stays
    pub fn reset_round(&mut self) {
        self.controller.pos.y = 0.0;
        self.controller.vel_y = 0.0;
    }

    /// Acceleration the human driver requests this tick
    pub fn input_accel(&self, input: &InputSnapshot) -> f32 {
        let (up, down) = if self.arrow_controls {
            (Button::UpArrow, Button::DownArrow)
        } else {
            (Button::Up, Button::Down)
        };

        let mut accel = 0.0;
        if input.is_down(up) {
            accel -= self.controller.accel_speed;
        }
        if input.is_down(down) {
            accel += self.controller.accel_speed;
        }
        accel
    }

    pub fn tick(&mut self, dt: f32, accel: f32) {
        self.controller.tick(dt, accel, self.half_height);
        if self.pulse_timer > 0.0 {
            self.pulse_timer = (self.pulse_timer - dt).max(0.0);
        }
    }

    /// Paddle color with the contact pulse applied
    pub fn draw_color(&self) -> u32 {
        let t = self.pulse_timer / HIT_PULSE_SECS;
        if t > 0.0 { lighten(self.color, t) } else { self.color }
    }
}
