//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::circle_rect_intersects;
pub use input::{HeldKeys, InputEvent, Key, TimerId};
pub use rect::Rect;
pub use state::{
    EndReason, GamePhase, GameState, Obstacle, ObstaclePool, Player, SessionSummary,
};
pub use tick::{TickInput, tick};
