//! Dodgefall entry point
//!
//! Takes over the terminal, runs one session and prints how many screen
//! clears were used. Set `DODGEFALL_SETTINGS` to a JSON file to tune the
//! game and `RUST_LOG` to see logs on stderr.

use glam::Vec2;

use dodgefall::platform::TerminalPlatform;
use dodgefall::{Game, Settings};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("dodgefall: {}", e);
        std::process::exit(1);
    }
}

fn run() -> dodgefall::Result<()> {
    let settings = Settings::from_env()?;

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Dodgefall starting with seed {}", seed);

    let field = Vec2::new(settings.screen_width, settings.screen_height);
    let platform = TerminalPlatform::new(field)?;
    let mut game = Game::new(platform, settings, seed);
    let summary = game.run()?;

    if log::log_enabled!(log::Level::Debug) {
        if let Ok(json) = serde_json::to_string(&summary) {
            log::debug!("Summary: {}", json);
        }
    }
    println!("\n ==== You used {} screen clears ====", summary.bombs_used);
    Ok(())
}
