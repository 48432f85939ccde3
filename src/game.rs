//! Game orchestrator
//!
//! Owns the session state and drives one fixed-rate frame at a time:
//! clear, drain events, tick the simulation, draw, pace.

use std::time::Duration;

use crate::Color;
use crate::error::Result;
use crate::platform::Platform;
use crate::renderer;
use crate::settings::Settings;
use crate::sim::{GameState, SessionSummary, TickInput, tick};

pub struct Game<P: Platform> {
    platform: P,
    state: GameState,
}

impl<P: Platform> Game<P> {
    /// Start a session, registering the spawn timer if enabled
    pub fn new(mut platform: P, settings: Settings, seed: u64) -> Self {
        let mut state = GameState::new(settings, seed);
        match state.settings.spawn_interval_ms {
            Some(ms) => {
                let id = platform.register_recurring_timer(Duration::from_millis(ms));
                state.spawn_timer = Some(id);
            }
            None => log::info!("Spawn timer disabled"),
        }
        log::info!("Session started with seed {}", seed);
        Self { platform, state }
    }

    /// Wrap an existing state (its spawn timer, if any, must already be registered)
    pub fn with_state(platform: P, state: GameState) -> Self {
        Self { platform, state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Run one frame
    pub fn step(&mut self) -> Result<()> {
        self.platform.clear(Color::BACKGROUND);

        let events = self.platform.poll_events()?;
        let held = self.platform.held_keys();
        tick(&mut self.state, &TickInput::new(events, held));

        renderer::draw_frame(&self.state, &mut self.platform)?;
        self.platform
            .wait_for_next_frame(self.state.settings.tick_rate_hz);
        Ok(())
    }

    /// Run frames until the session stops, then release the platform
    pub fn run(&mut self) -> Result<SessionSummary> {
        let result = self.run_frames();
        let shutdown = self.platform.shutdown();
        result?;
        shutdown?;

        let summary = self.state.summary();
        log::info!(
            "Session over after {} ticks ({:?}), {} bombs used",
            summary.ticks,
            summary.end_reason,
            summary.bombs_used
        );
        Ok(summary)
    }

    fn run_frames(&mut self) -> Result<()> {
        while self.state.is_running() {
            self.step()?;
        }
        Ok(())
    }
}
