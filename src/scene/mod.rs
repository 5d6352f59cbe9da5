//! Scene composer: the menu/match state machine
//!
//! One call to [`Scene::tick`] consumes the tick's input snapshot, advances
//! exactly one phase, and issues every draw call for the frame. All
//! persistent effects on shared state go through Player/Ball/effect
//! mutation; pixels only ever move through the rasterizer.
//!
//! Phase graph: Menu <-> Settings, Menu -> Countdown -> Playing ->
//! Celebration -> Playing (loop on score) -> TimeUp -> Menu, with Paused
//! reachable from Playing.

mod backdrop;

pub use backdrop::Backdrop;

use std::path::PathBuf;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioCue, CueQueue};
use crate::config::MatchConfig;
use crate::consts::*;
use crate::input::{Button, InputSnapshot};
use crate::raster::FrameBuffer;
use crate::rgb;
use crate::sim::{BallController, FlashEffect, ParticleBurst, Player, ai};

const MENU_ITEMS: [&str; 4] = ["PLAY VS AI", "PLAY VS FRIEND", "SETTINGS", "EXIT"];
const PAUSE_ITEMS: [&str; 3] = ["RESUME", "RESTART", "MAIN MENU"];
const SETTING_ITEMS: [&str; 9] = [
    "BALL SPEED",
    "PADDLE SPEED",
    "PADDLE FRICTION",
    "AI DIFFICULTY",
    "ENABLE MUSIC",
    "MUSIC VOLUME",
    "SFX VOLUME",
    "GAME DURATION",
    "BACK",
];
const SETTINGS_BACK: usize = SETTING_ITEMS.len() - 1;

const WHITE: u32 = 0x00FFFFFF;
const HIGHLIGHT: u32 = 0x00FFCC66;
const DIM: u32 = 0x00666666;
const ROW_BG: u32 = 0x00102030;
const VALUE_COLOR: u32 = 0x00AAAAAA;
const SCORE_COLOR: u32 = 0x00BBFFBB;
const TIMER_WARN: u32 = 0x00FF0000;
const BALL_COLOR: u32 = 0x0000FFFF;

/// Which screen the scene is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Settings,
    Countdown,
    Playing,
    Celebration,
    Paused,
    TimeUp,
}

/// The whole game: two players, one ball, effects, and the phase flow
pub struct Scene {
    pub config: MatchConfig,
    config_path: PathBuf,
    phase: Phase,

    menu_index: usize,
    settings_index: usize,
    pause_index: usize,

    players: [Player; 2],
    ball: BallController,
    burst: ParticleBurst,
    flash: FlashEffect,
    backdrop: Backdrop,

    countdown_value: i32,
    countdown_time: f32,
    match_elapsed: f32,
    time_up_delay: f32,
    warn_tick_timer: f32,

    cues: CueQueue,
    rng: Pcg32,
    quit: bool,
}

fn step_index(index: usize, len: usize, delta: i32) -> usize {
    (index as i32 + delta).rem_euclid(len as i32) as usize
}

fn nav_up(input: &InputSnapshot) -> bool {
    input.pressed(Button::UpArrow) || input.pressed(Button::Up)
}

fn nav_down(input: &InputSnapshot) -> bool {
    input.pressed(Button::DownArrow) || input.pressed(Button::Down)
}

impl Scene {
    pub fn new(config: MatchConfig, config_path: impl Into<PathBuf>, seed: u64) -> Self {
        Self {
            config,
            config_path: config_path.into(),
            phase: Phase::Menu,
            menu_index: 0,
            settings_index: 0,
            pause_index: 0,
            players: [Player::new(false), Player::new(true)],
            ball: BallController::new(0.0),
            burst: ParticleBurst::default(),
            flash: FlashEffect::default(),
            backdrop: Backdrop::default(),
            countdown_value: 3,
            countdown_time: 0.0,
            match_elapsed: 0.0,
            time_up_delay: 0.0,
            warn_tick_timer: 0.0,
            cues: CueQueue::default(),
            rng: Pcg32::seed_from_u64(seed),
            quit: false,
        }
    }

    /// Advance one tick and render the frame
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32, frame: &mut FrameBuffer) {
        match self.phase {
            Phase::Menu => self.tick_menu(input, dt, frame),
            Phase::Settings => self.tick_settings(input, dt, frame),
            Phase::Countdown => self.tick_countdown(dt, frame),
            Phase::Playing => self.tick_playing(input, dt, frame),
            Phase::Celebration => self.tick_celebration(dt, frame),
            Phase::Paused => self.tick_paused(input, dt, frame),
            Phase::TimeUp => self.tick_time_up(dt, frame),
        }
        self.draw_effects(frame);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Set when EXIT is chosen; the host loop shuts down between ticks
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Cues emitted since the last drain, for the audio collaborator
    pub fn drain_cues(&mut self) -> impl Iterator<Item = AudioCue> + '_ {
        self.cues.drain()
    }

    pub fn cues(&self) -> &CueQueue {
        &self.cues
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player; 2] {
        &mut self.players
    }

    pub fn ball(&self) -> &BallController {
        &self.ball
    }

    pub fn ball_mut(&mut self) -> &mut BallController {
        &mut self.ball
    }

    pub fn countdown_value(&self) -> i32 {
        self.countdown_value
    }

    pub fn match_elapsed(&self) -> f32 {
        self.match_elapsed
    }

    // === Menu ===

    fn tick_menu(&mut self, input: &InputSnapshot, dt: f32, frame: &mut FrameBuffer) {
        self.backdrop.draw_simple(dt, frame);
        frame.draw_text("PING PONG", 0.0, -22.0, 1.5, 0.8, WHITE);

        for (i, item) in MENU_ITEMS.iter().enumerate() {
            self.draw_row(frame, item, i as f32 * 9.0, 33.0, -29.0, i == self.menu_index);
        }

        if nav_up(input) {
            self.cues.push(AudioCue::Navigate);
            self.menu_index = step_index(self.menu_index, MENU_ITEMS.len(), -1);
        }
        if nav_down(input) {
            self.cues.push(AudioCue::Navigate);
            self.menu_index = step_index(self.menu_index, MENU_ITEMS.len(), 1);
        }
        if input.pressed(Button::Enter) {
            self.cues.push(AudioCue::Confirm);
            match self.menu_index {
                0 => self.start_match(true),
                1 => self.start_match(false),
                2 => {
                    self.settings_index = 0;
                    self.phase = Phase::Settings;
                }
                _ => self.quit = true,
            }
        }
    }

    fn start_match(&mut self, vs_ai: bool) {
        self.players[0].start_match(-PADDLE_X, false, &self.config);
        self.players[1].start_match(PADDLE_X, vs_ai, &self.config);
        self.ball = BallController::new(self.config.ball_speed * BALL_SPEED_SCALE);
        self.burst.cancel();
        self.flash.cancel();

        self.countdown_value = 3;
        self.countdown_time = 0.0;
        self.match_elapsed = 0.0;
        self.time_up_delay = 0.0;
        self.warn_tick_timer = 0.0;
        self.phase = Phase::Countdown;

        log::info!(
            "match start: {} for {}s, difficulty {:?}",
            if vs_ai { "vs ai" } else { "two players" },
            self.config.game_duration_secs,
            self.config.ai_difficulty,
        );
    }

    // === Settings ===

    fn tick_settings(&mut self, input: &InputSnapshot, dt: f32, frame: &mut FrameBuffer) {
        self.backdrop.draw_simple(dt, frame);
        frame.draw_text("SETTINGS", 0.0, -42.0, 1.2, 0.7, WHITE);

        for (i, label) in SETTING_ITEMS.iter().enumerate() {
            let y = -30.0 + i as f32 * 9.0;
            let selected = i == self.settings_index;
            let color = if selected { HIGHLIGHT } else { DIM };

            frame.fill_rect(0.0, y, 52.0, 4.0, ROW_BG);
            frame.draw_text(label, -14.0, y, 0.6, 0.6, color);
            let value = self.setting_value(i);
            if !value.is_empty() {
                frame.draw_text(&value, 32.0, y, 0.6, 0.6, VALUE_COLOR);
            }
            if selected {
                frame.fill_rect(-44.0, y, 1.2, 1.2, WHITE);
            }
        }

        if nav_up(input) {
            self.cues.push(AudioCue::Navigate);
            self.settings_index = step_index(self.settings_index, SETTING_ITEMS.len(), -1);
        }
        if nav_down(input) {
            self.cues.push(AudioCue::Navigate);
            self.settings_index = step_index(self.settings_index, SETTING_ITEMS.len(), 1);
        }
        if input.pressed(Button::LeftArrow) {
            self.cues.push(AudioCue::SettingAdjust);
            self.adjust_setting(-1);
        }
        if input.pressed(Button::RightArrow) {
            self.cues.push(AudioCue::SettingAdjust);
            self.adjust_setting(1);
        }
        if input.pressed(Button::Enter) && self.settings_index == SETTINGS_BACK {
            self.cues.push(AudioCue::Back);
            match self.config.save(&self.config_path) {
                Ok(()) => log::info!("config saved to {}", self.config_path.display()),
                Err(err) => log::warn!("config save failed: {err}"),
            }
            self.phase = Phase::Menu;
        }
    }

    fn setting_value(&self, index: usize) -> String {
        match index {
            0 => format!("{:.1}", self.config.ball_speed),
            1 => format!("{:.1}", self.config.paddle_speed),
            2 => format!("{:.1}", self.config.paddle_damping),
            3 => self.config.ai_difficulty.label().to_string(),
            4 => if self.config.music_enabled { "ON" } else { "OFF" }.to_string(),
            5 => format!("{}%", (self.config.music_volume * 100.0).round() as i32),
            6 => format!("{}%", (self.config.sfx_volume * 100.0).round() as i32),
            7 => format!("{}S", self.config.game_duration_secs as i32),
            _ => String::new(),
        }
    }

    fn adjust_setting(&mut self, dir: i32) {
        let step = dir as f32 * 0.1;
        match self.settings_index {
            0 => self.config.set_ball_speed(self.config.ball_speed + step),
            1 => self.config.set_paddle_speed(self.config.paddle_speed + step),
            2 => self.config.set_paddle_damping(self.config.paddle_damping + step),
            3 => self.config.ai_difficulty = self.config.ai_difficulty.step(dir),
            4 => self.config.music_enabled = dir > 0,
            5 => self.config.set_music_volume(self.config.music_volume + step),
            6 => self.config.set_sfx_volume(self.config.sfx_volume + step),
            7 => self
                .config
                .set_game_duration(self.config.game_duration_secs + dir as f32),
            _ => {}
        }
    }

    // === Countdown ===

    fn tick_countdown(&mut self, dt: f32, frame: &mut FrameBuffer) {
        self.backdrop.draw_simple(dt, frame);

        self.countdown_time += dt;
        if self.countdown_time >= COUNTDOWN_STEP_SECS {
            self.countdown_time = 0.0;
            self.countdown_value -= 1;

            if self.countdown_value > 0 {
                self.cues.push(AudioCue::CountdownTick);
            } else if self.countdown_value == 0 {
                self.cues.push(AudioCue::Go);
            }
        }

        if self.countdown_value > 0 {
            let text = self.countdown_value.to_string();
            frame.draw_text(&text, 0.0, 0.0, 2.0, 1.0, WHITE);
        } else {
            frame.draw_text("GO!", 0.0, 0.0, 2.0, 1.0, HIGHLIGHT);
        }

        if self.countdown_value < 0 {
            self.phase = Phase::Playing;
        }
    }

    // === Playing ===

    fn tick_playing(&mut self, input: &InputSnapshot, dt: f32, frame: &mut FrameBuffer) {
        if input.pressed(Button::Pause) {
            self.pause_index = 0;
            self.phase = Phase::Paused;
            self.draw_pause_menu(dt, frame);
            return;
        }

        self.backdrop.draw(dt, frame);

        // drivers feed the paddles, then the ball consumes their updated
        // positions: paddle 1, paddle 2, ball, every tick
        for i in 0..2 {
            let accel = if self.players[i].ai_mode {
                ai::decide(
                    &self.players[i],
                    self.ball.pos,
                    self.ball.vel,
                    self.config.ai_difficulty,
                    &mut self.rng,
                )
            } else {
                self.players[i].input_accel(input)
            };
            self.players[i].tick(dt, accel);
        }
        self.ball.tick(dt, &mut self.players, &mut self.cues);

        self.match_elapsed += dt;
        self.draw_match_timer(dt, frame);
        self.draw_entities(frame);

        // the clock outranks a goal scored on the same tick
        if self.match_elapsed >= self.config.game_duration_secs {
            self.cues.push(AudioCue::Winner);
            self.time_up_delay = 0.0;
            self.phase = Phase::TimeUp;
            log::info!(
                "time up: {} - {}",
                self.players[0].score,
                self.players[1].score
            );
            return;
        }

        if self.ball.scored {
            self.burst
                .start(self.ball.pos.x, self.ball.pos.y, &mut self.rng);
            self.flash.start();
            self.phase = Phase::Celebration;
        }
    }

    fn draw_match_timer(&mut self, dt: f32, frame: &mut FrameBuffer) {
        let time_left = (self.config.game_duration_secs - self.match_elapsed).max(0.0);
        let minutes = time_left as i32 / 60;
        let seconds = time_left as i32 % 60;
        let text = format!("{minutes:02}:{seconds:02}");

        if minutes == 0 && seconds <= 5 {
            frame.draw_text(&text, 0.0, -40.0, 0.8, 0.8, TIMER_WARN);

            self.warn_tick_timer += dt;
            if self.warn_tick_timer >= 1.0 {
                self.warn_tick_timer = 0.0;
                self.cues.push(AudioCue::TimerTick);
            }
        } else {
            frame.draw_text(&text, 0.0, -40.0, 0.8, 0.8, WHITE);
        }
    }

    fn draw_entities(&self, frame: &mut FrameBuffer) {
        for player in &self.players {
            frame.fill_rect(
                player.controller.pos.x,
                player.controller.pos.y,
                player.half_width,
                player.half_height,
                player.draw_color(),
            );
        }
        frame.fill_rect(
            self.ball.pos.x,
            self.ball.pos.y,
            self.ball.size,
            self.ball.size,
            BALL_COLOR,
        );

        let left_score = self.players[0].score.to_string();
        let right_score = self.players[1].score.to_string();
        frame.draw_text(&left_score, -10.0, 40.0, 0.7, 0.7, SCORE_COLOR);
        frame.draw_text(&right_score, 10.0, 40.0, 0.7, 0.7, SCORE_COLOR);
    }

    // === Celebration ===

    fn tick_celebration(&mut self, dt: f32, frame: &mut FrameBuffer) {
        self.flash.tick(dt);
        self.burst.tick(dt);

        // backdrop clock holds while the effects play out
        self.backdrop.draw(0.0, frame);
        self.draw_entities(frame);

        if self.flash.finished() && self.burst.finished() {
            self.ball.reset();
            self.players[0].reset_round();
            self.players[1].reset_round();
            self.phase = Phase::Playing;
        }
    }

    // === Paused ===

    fn tick_paused(&mut self, input: &InputSnapshot, dt: f32, frame: &mut FrameBuffer) {
        if nav_up(input) {
            self.cues.push(AudioCue::Navigate);
            self.pause_index = step_index(self.pause_index, PAUSE_ITEMS.len(), -1);
        }
        if nav_down(input) {
            self.cues.push(AudioCue::Navigate);
            self.pause_index = step_index(self.pause_index, PAUSE_ITEMS.len(), 1);
        }

        if input.pressed(Button::Pause) {
            self.phase = Phase::Playing;
        } else if input.pressed(Button::Enter) {
            self.cues.push(AudioCue::Confirm);
            match self.pause_index {
                0 => self.phase = Phase::Playing,
                1 => {
                    self.cues.push(AudioCue::Back);
                    self.restart_match();
                }
                _ => self.abandon_match(),
            }
        }

        if self.phase == Phase::Paused {
            self.draw_pause_menu(dt, frame);
        } else {
            self.backdrop.draw_simple(dt, frame);
        }
    }

    fn draw_pause_menu(&mut self, dt: f32, frame: &mut FrameBuffer) {
        self.backdrop.draw_simple(dt, frame);
        frame.draw_text("PAUSED", 0.0, -17.0, 1.2, 0.7, WHITE);
        for (i, item) in PAUSE_ITEMS.iter().enumerate() {
            self.draw_row(frame, item, i as f32 * 9.0, 33.0, -29.0, i == self.pause_index);
        }
    }

    /// Zero the scores, reset the entities, and run the countdown again
    fn restart_match(&mut self) {
        self.players[0].reset_round();
        self.players[1].reset_round();
        self.players[0].score = 0;
        self.players[1].score = 0;
        self.ball.reset();
        self.burst.cancel();
        self.flash.cancel();

        self.countdown_value = 3;
        self.countdown_time = 0.0;
        self.match_elapsed = 0.0;
        self.time_up_delay = 0.0;
        self.warn_tick_timer = 0.0;
        self.phase = Phase::Countdown;
    }

    /// Leave the match entirely, back to the main menu
    fn abandon_match(&mut self) {
        self.ball.reset();
        self.players[0].reset_round();
        self.players[1].reset_round();
        self.burst.cancel();
        self.flash.cancel();
        self.phase = Phase::Menu;
    }

    // === Time up ===

    fn tick_time_up(&mut self, dt: f32, frame: &mut FrameBuffer) {
        self.backdrop.draw_simple(dt, frame);

        let (banner, color) = match self.players[0].score.cmp(&self.players[1].score) {
            std::cmp::Ordering::Greater => ("PLAYER 1 WINS!", self.players[0].color),
            std::cmp::Ordering::Less => ("PLAYER 2 WINS!", self.players[1].color),
            std::cmp::Ordering::Equal => ("DRAW!", HIGHLIGHT),
        };
        frame.draw_text("TIME IS UP!", 0.0, -10.0, 0.8, 0.7, WHITE);
        frame.draw_text(banner, 0.0, 0.0, 1.2, 0.8, color);

        self.time_up_delay += dt;
        if self.time_up_delay >= TIME_UP_RETURN_SECS {
            self.phase = Phase::Menu;
        }
    }

    // === Shared drawing ===

    fn draw_row(
        &self,
        frame: &mut FrameBuffer,
        label: &str,
        y: f32,
        half_w: f32,
        marker_x: f32,
        selected: bool,
    ) {
        let color = if selected { HIGHLIGHT } else { DIM };
        frame.fill_rect(0.0, y, half_w, 4.0, ROW_BG);
        frame.draw_text(label, 0.0, y, 0.6, 0.6, color);
        if selected {
            frame.fill_rect(marker_x, y, 1.2, 1.2, WHITE);
        }
    }

    fn draw_effects(&self, frame: &mut FrameBuffer) {
        if self.burst.active {
            // palette keyed to the goal side the burst came from
            let (r, g, b) = if self.burst.origin.x > 0.0 {
                (77.0, 171.0, 247.0)
            } else {
                (255.0, 107.0, 107.0)
            };
            for p in &self.burst.particles {
                let a = (p.life / self.burst.lifetime).clamp(0.0, 1.0);
                let color = rgb((r * a) as u32, (g * a) as u32, (b * a) as u32);
                frame.fill_rect(p.pos.x, p.pos.y, 1.0, 1.0, color);
            }
        }

        if self.flash.active {
            let v = (255.0 * (0.3 + 0.7 * self.flash.alpha)) as u32;
            frame.fill_rect(0.0, 0.0, 100.0, 100.0, rgb(v, v, v));
        }
    }
}
