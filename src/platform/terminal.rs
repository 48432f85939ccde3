//! Terminal platform built on crossterm
//!
//! Raw mode + alternate screen, half-block rendering. Terminals that speak
//! the kitty keyboard protocol report real key releases (and a bare Left
//! Shift). Elsewhere a key counts as held while it keeps auto-repeating, and
//! Shift is read off the arrow keys' modifiers.

use std::collections::HashMap;
use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, style, terminal,
};
use glam::Vec2;

use super::{Platform, TimerQueue, frame_duration};
use crate::Color;
use crate::error::Result;
use crate::renderer::Framebuffer;
use crate::sim::{HeldKeys, InputEvent, Key, Rect, TimerId};

/// Without release events, a fresh press is held at least this long. Longer
/// than common auto-repeat delays (X11 660 ms, Windows 500 ms).
const PRESS_HOLD: Duration = Duration::from_millis(700);

/// Once a key is repeating, it is dropped this long after its last repeat
const REPEAT_HOLD: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy)]
struct Held {
    last_seen: Instant,
    repeating: bool,
}

impl Held {
    fn window(&self) -> Duration {
        if self.repeating { REPEAT_HOLD } else { PRESS_HOLD }
    }
}

/// What a physical key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Game(Key),
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
    let action = match code {
        KeyCode::Char('c') | KeyCode::Char('C') if modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Quit
        }
        KeyCode::Up => KeyAction::Game(Key::Up),
        KeyCode::Down => KeyAction::Game(Key::Down),
        KeyCode::Left => KeyAction::Game(Key::Left),
        KeyCode::Right => KeyAction::Game(Key::Right),
        KeyCode::Modifier(ModifierKeyCode::LeftShift) => KeyAction::Game(Key::Slow),
        KeyCode::Char('x') | KeyCode::Char('X') => KeyAction::Game(Key::Bomb),
        KeyCode::Esc => KeyAction::Game(Key::Escape),
        _ => return None,
    };
    Some(action)
}

fn is_arrow(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right
    )
}

/// Held-key bookkeeping
#[derive(Debug, Default)]
struct KeyTracker {
    /// Terminal reports releases; no timeout needed
    release_events: bool,
    held: HashMap<Key, Held>,
}

impl KeyTracker {
    fn new(release_events: bool) -> Self {
        Self {
            release_events,
            held: HashMap::new(),
        }
    }

    /// Returns true if the key was not already down. A press of a key that
    /// is still held is a repeat.
    fn press(&mut self, key: Key, now: Instant) -> bool {
        match self.held.get_mut(&key) {
            Some(held) => {
                held.last_seen = now;
                held.repeating = true;
                false
            }
            None => {
                let held = Held {
                    last_seen: now,
                    repeating: false,
                };
                self.held.insert(key, held);
                true
            }
        }
    }

    /// Returns true if the key was down
    fn release(&mut self, key: Key) -> bool {
        self.held.remove(&key).is_some()
    }

    /// Drop keys that stopped repeating
    fn expire(&mut self, now: Instant) -> Vec<Key> {
        if self.release_events {
            return Vec::new();
        }
        let expired: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, held)| now.duration_since(held.last_seen) > held.window())
            .map(|(key, _)| *key)
            .collect();
        for key in &expired {
            self.held.remove(key);
        }
        expired
    }

    fn held(&self) -> HeldKeys {
        self.held.keys().copied().collect()
    }

    /// Turn one key event into game events
    fn handle(&mut self, key: KeyEvent, now: Instant, events: &mut Vec<InputEvent>) {
        let pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);

        if !self.release_events && is_arrow(key.code) && pressed {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                if self.press(Key::Slow, now) {
                    events.push(InputEvent::KeyDown(Key::Slow));
                }
            } else if self.release(Key::Slow) {
                events.push(InputEvent::KeyUp(Key::Slow));
            }
        }

        match map_key(key.code, key.modifiers) {
            Some(KeyAction::Quit) if pressed => events.push(InputEvent::Quit),
            Some(KeyAction::Game(k)) if pressed => {
                if self.press(k, now) {
                    events.push(InputEvent::KeyDown(k));
                }
            }
            Some(KeyAction::Game(k)) => {
                if self.release(k) {
                    events.push(InputEvent::KeyUp(k));
                }
            }
            _ => log::trace!("Ignoring key {:?}", key),
        }
    }
}

pub struct TerminalPlatform {
    out: Stdout,
    framebuffer: Framebuffer,
    keys: KeyTracker,
    timers: TimerQueue,
    started: Instant,
    last_frame: Instant,
    enhanced: bool,
    /// Terminal is in raw mode / alternate screen and must be restored
    active: bool,
}

impl TerminalPlatform {
    /// Take over the terminal. Fails if it is not interactive.
    pub fn new(field: Vec2) -> Result<Self> {
        terminal::enable_raw_mode()?;

        let now = Instant::now();
        // From here on Drop restores the terminal if setup fails
        let mut platform = Self {
            out: stdout(),
            framebuffer: Framebuffer::new(0, 0, field),
            keys: KeyTracker::default(),
            timers: TimerQueue::new(),
            started: now,
            last_frame: now,
            enhanced: false,
            active: true,
        };
        platform.enter()?;
        Ok(platform)
    }

    fn enter(&mut self) -> Result<()> {
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        self.enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.enhanced {
            execute!(
                self.out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
            log::info!("Keyboard enhancement enabled");
        } else {
            log::warn!("Terminal lacks key release events; inferring held keys from repeats");
        }
        self.keys = KeyTracker::new(self.enhanced);

        let (cols, rows) = terminal::size()?;
        self.framebuffer.resize(cols, rows);
        log::info!("Terminal {}x{}", cols, rows);
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        if self.enhanced {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.out,
            style::ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        if self.framebuffer.cells() == (cols, rows) {
            return Ok(());
        }
        self.framebuffer.resize(cols, rows);
        execute!(self.out, terminal::Clear(terminal::ClearType::All))?;
        log::debug!("Terminal resized to {}x{}", cols, rows);
        Ok(())
    }
}

impl Platform for TerminalPlatform {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let now = Instant::now();
        let mut events = Vec::new();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.keys.handle(key, now, &mut events),
                Event::Resize(cols, rows) => self.resize(cols, rows)?,
                other => log::trace!("Ignoring {:?}", other),
            }
        }

        events.extend(self.keys.expire(now).into_iter().map(InputEvent::KeyUp));
        events.extend(
            self.timers
                .due(now.duration_since(self.started))
                .into_iter()
                .map(InputEvent::TimerFired),
        );
        Ok(events)
    }

    fn held_keys(&self) -> HeldKeys {
        self.keys.held()
    }

    fn register_recurring_timer(&mut self, interval: Duration) -> TimerId {
        self.timers.register(interval, self.started.elapsed())
    }

    fn clear(&mut self, color: Color) {
        self.framebuffer.clear(color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.framebuffer.fill_circle(center, radius, color);
    }

    fn draw_filled_rect(&mut self, rect: &Rect, color: Color) {
        self.framebuffer.fill_rect(rect, color);
    }

    fn present(&mut self) -> Result<()> {
        self.framebuffer.render(&mut self.out)?;
        Ok(())
    }

    fn wait_for_next_frame(&mut self, target_hz: u32) {
        let frame = frame_duration(target_hz);
        let elapsed = self.last_frame.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        self.last_frame = Instant::now();
    }

    fn shutdown(&mut self) -> Result<()> {
        self.restore()
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}
