//! Platform abstraction layer
//!
//! Everything outside the simulation goes through [`Platform`]:
//! - Input events and held-key state
//! - Recurring timers
//! - Drawing primitives and presenting a frame
//! - Frame pacing

pub mod headless;
pub mod terminal;
pub mod timer;

use std::time::Duration;

use glam::Vec2;

use crate::Color;
use crate::error::Result;
use crate::sim::{HeldKeys, InputEvent, Rect, TimerId};

pub use headless::HeadlessPlatform;
pub use terminal::TerminalPlatform;
pub use timer::TimerQueue;

/// The presentation/platform collaborator the game loop drives
pub trait Platform {
    /// Drain every pending event
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    /// Keys currently held down
    fn held_keys(&self) -> HeldKeys;

    /// Register a timer that fires `TimerFired(id)` every `interval`
    fn register_recurring_timer(&mut self, interval: Duration) -> TimerId;

    /// Fill the whole frame with one colour
    fn clear(&mut self, color: Color);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn draw_filled_rect(&mut self, rect: &Rect, color: Color);

    /// Show the frame drawn since the last `clear`
    fn present(&mut self) -> Result<()>;

    /// Block until one frame at `target_hz` has elapsed since the last call
    fn wait_for_next_frame(&mut self, target_hz: u32);

    /// Release platform resources
    fn shutdown(&mut self) -> Result<()>;
}

/// Duration of one frame at `hz`, rounded to the nearest nanosecond
#[inline]
pub fn frame_duration(hz: u32) -> Duration {
    let hz = u64::from(hz.max(1));
    Duration::from_nanos((1_000_000_000 + hz / 2) / hz)
}
