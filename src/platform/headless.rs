//! Scripted platform with a simulated clock
//!
//! Nothing is displayed. Events are fed frame by frame from a script, the
//! clock advances exactly one frame per `wait_for_next_frame`, and draw
//! calls are only counted. Used by tests and for replaying a seed quickly.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;

use super::{Platform, TimerQueue, frame_duration};
use crate::Color;
use crate::error::Result;
use crate::sim::{HeldKeys, InputEvent, Key, Rect, TimerId};

/// Counts of draw calls issued since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub clears: u64,
    pub circles: u64,
    pub rects: u64,
    pub presents: u64,
    /// Rectangles drawn in the most recently presented frame
    pub last_frame_rects: u64,
}

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    script: VecDeque<Vec<InputEvent>>,
    held: HeldKeys,
    timers: TimerQueue,
    clock: Duration,
    frames: u64,
    quit_after: Option<u64>,
    frame_rects: u64,
    stats: DrawStats,
    shut_down: bool,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events delivered on the next unscripted frame
    pub fn push_frame(&mut self, events: impl IntoIterator<Item = InputEvent>) -> &mut Self {
        self.script.push_back(events.into_iter().collect());
        self
    }

    /// Queue `count` frames with no scripted events
    pub fn push_idle_frames(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.script.push_back(Vec::new());
        }
        self
    }

    /// Deliver `Quit` on the first poll once `frames` frames have elapsed
    pub fn quit_after(mut self, frames: u64) -> Self {
        self.quit_after = Some(frames);
        self
    }

    /// Start with a key already held
    pub fn holding(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = self.script.pop_front().unwrap_or_default();

        for event in &events {
            match *event {
                InputEvent::KeyDown(key) => self.held.insert(key),
                InputEvent::KeyUp(key) => self.held.remove(key),
                _ => {}
            }
        }

        events.extend(self.timers.due(self.clock).into_iter().map(InputEvent::TimerFired));

        if self.quit_after.is_some_and(|limit| self.frames >= limit) {
            events.push(InputEvent::Quit);
        }

        Ok(events)
    }

    fn held_keys(&self) -> HeldKeys {
        self.held
    }

    fn register_recurring_timer(&mut self, interval: Duration) -> TimerId {
        self.timers.register(interval, self.clock)
    }

    fn clear(&mut self, _color: Color) {
        self.stats.clears += 1;
        self.frame_rects = 0;
    }

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.stats.circles += 1;
    }

    fn draw_filled_rect(&mut self, _rect: &Rect, _color: Color) {
        self.stats.rects += 1;
        self.frame_rects += 1;
    }

    fn present(&mut self) -> Result<()> {
        self.stats.presents += 1;
        self.stats.last_frame_rects = self.frame_rects;
        Ok(())
    }

    fn wait_for_next_frame(&mut self, target_hz: u32) {
        self.clock += frame_duration(target_hz);
        self.frames += 1;
    }

    fn shutdown(&mut self) -> Result<()> {
        self.shut_down = true;
        Ok(())
    }
}
