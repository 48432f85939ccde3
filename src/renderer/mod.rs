//! Draw step
//!
//! Issues draw calls for the current state. Purely a side effect: nothing
//! here feeds back into the simulation.

pub mod framebuffer;

pub use framebuffer::Framebuffer;

use crate::Color;
use crate::platform::Platform;
use crate::sim::GameState;

/// Draw the player and every live obstacle, then present the frame
pub fn draw_frame<P: Platform + ?Sized>(state: &GameState, platform: &mut P) -> crate::Result<()> {
    platform.draw_circle(state.player.pos, state.player.radius, Color::PLAYER);
    for obstacle in state.obstacles.iter() {
        platform.draw_filled_rect(&obstacle.rect(), obstacle.color);
    }
    platform.present()
}
