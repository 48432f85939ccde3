//! Dodgefall - a falling-block dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, collisions, game state)
//! - `game`: Fixed-rate orchestrator driving a `Platform`
//! - `platform`: Terminal and headless presentation layers
//! - `renderer`: Draw step and half-block framebuffer
//! - `settings`: Data-driven tuning

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use game::Game;
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Frame rate the loop is paced to
    pub const TICK_RATE_HZ: u32 = 60;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 5.0;
    pub const PLAYER_START_X: f32 = 200.0;
    pub const PLAYER_START_Y: f32 = 550.0;
    pub const NORMAL_SPEED: f32 = 6.0;
    /// Speed while the slow key is held, for precise dodging
    pub const SLOW_SPEED: f32 = 3.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 15.0;
    pub const SPAWN_INTERVAL_MS: u64 = 100;
    pub const SPAWN_BATCH: u32 = 4;
    pub const FALL_SPEED_MIN: u32 = 2;
    pub const FALL_SPEED_MAX: u32 = 5;
    /// Obstacle colour channels are drawn from `0..=OBSTACLE_COLOR_MAX`
    pub const OBSTACLE_COLOR_MAX: u8 = 128;
}

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BACKGROUND: Color = Color::rgb(200, 200, 255);
    pub const PLAYER: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
