//! Pixel Pong entry point
//!
//! The OS window, raw key capture, audio playback, and the blit to screen
//! belong to the host embedding this crate. This binary stands in for them
//! with a scripted, headless exhibition match: it drives the menu, lets two
//! AI paddles play a short game, and logs what the host would have presented.

use pixel_pong::input::{Button, InputSnapshot};
use pixel_pong::{FrameBuffer, MatchConfig, Phase, Scene};

const CONFIG_PATH: &str = "config/config.json";
const TICK_DT: f32 = 1.0 / 120.0;

fn main() {
    env_logger::init();

    let mut config = MatchConfig::load(CONFIG_PATH);
    config.set_game_duration(15.0);

    let mut scene = Scene::new(config, CONFIG_PATH, 0xC0FFEE);
    let mut frame = FrameBuffer::new(1080, 720);
    let mut input = InputSnapshot::default();

    // menu: activate "PLAY VS AI"
    input.set(Button::Enter, true);
    scene.tick(&input, TICK_DT, &mut frame);
    input.begin_tick();
    input.set(Button::Enter, false);

    // the exhibition plays itself on both sides
    for player in scene.players_mut() {
        player.ai_mode = true;
    }

    let mut ticks: u64 = 0;
    let mut cues: u64 = 0;
    loop {
        input.begin_tick();
        scene.tick(&input, TICK_DT, &mut frame);
        ticks += 1;
        cues += scene.drain_cues().count() as u64;

        // the match is over once the time-up banner hands back to the menu
        if scene.phase() == Phase::Menu || scene.quit_requested() {
            break;
        }
        if ticks > 1_000_000 {
            log::error!("demo never reached the menu again, bailing out");
            break;
        }
    }

    let [left, right] = scene.players();
    log::info!(
        "exhibition over after {ticks} ticks: {} - {} ({cues} audio cues, last frame {}x{})",
        left.score,
        right.score,
        frame.width(),
        frame.height(),
    );
    println!("final score {} - {}", left.score, right.score);
}
