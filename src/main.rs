mod frontend;

use std::path::Path;

use macroquad::input::prevent_quit;
use macroquad::prelude::*;
use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use tracing::{info, warn};

use gold_snake::config::{DEFAULT_SETTINGS_PATH, Settings};
use gold_snake::highscore::FileHighScoreStore;
use gold_snake::{App, Flow, GameRules};

fn window_conf() -> Conf {
    Conf {
        window_title: "Gold Snake".to_owned(),
        window_width: 800,
        window_height: 600,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    gold_snake::logging::init();

    let settings = Settings::load(Path::new(DEFAULT_SETTINGS_PATH)).unwrap_or_else(|e| {
        warn!(error = %e, "Using default settings");
        Settings::default()
    });
    let grid = settings.grid();

    let mut audio = frontend::sound::load(settings.sound_volume).await;
    let store = FileHighScoreStore::new(&settings.high_score_path);
    let mut app = App::new(GameRules::from(&settings), store, StdRng::from_os_rng());
    let mut backdrop = frontend::draw::Backdrop::new(grid);

    // Window close becomes a Quit intent so a pending high score is saved first
    prevent_quit();

    let mut last_time = get_time();
    loop {
        let now = get_time();
        let dt = (now - last_time).max(0.0) as f32;
        last_time = now;

        let intents = frontend::keys::poll_intents();
        if app.update(&intents, now, audio.as_mut()) == Flow::Exit {
            break;
        }

        clear_background(BLACK);
        backdrop.draw(dt);
        frontend::draw::draw_screen(&app.screen(now), grid, now);

        next_frame().await;
    }

    info!("Bye");
}
