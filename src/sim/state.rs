//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::circle_rect_intersects;
use super::input::{HeldKeys, Key, TimerId};
use super::rect::Rect;
use crate::Color;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Session over (terminal)
    Stopped,
}

/// Why the session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Platform quit (window closed, Ctrl+C)
    Quit,
    /// Escape key
    Escape,
    /// Player touched an obstacle
    Collision,
}

/// The player's circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        let mut player = Self {
            pos: settings.player_start,
            radius: settings.player_radius,
        };
        // A start position outside the field is pulled back in
        player.clamp_to(Vec2::new(settings.screen_width, settings.screen_height));
        player
    }

    /// Move by `speed` along every held direction, then clamp to the field.
    ///
    /// Diagonals are the plain sum of both axes, so moving diagonally covers
    /// more ground per tick than moving straight.
    pub fn update(&mut self, held: &HeldKeys, speed: f32, field: Vec2) {
        let mut delta = Vec2::ZERO;
        if held.contains(Key::Up) {
            delta.y -= speed;
        }
        if held.contains(Key::Down) {
            delta.y += speed;
        }
        if held.contains(Key::Left) {
            delta.x -= speed;
        }
        if held.contains(Key::Right) {
            delta.x += speed;
        }

        self.pos += delta;
        self.clamp_to(field);
    }

    /// Keep the whole circle inside `[0, field]` on both axes
    pub fn clamp_to(&mut self, field: Vec2) {
        let min = Vec2::splat(self.radius);
        let max = field - self.radius;
        self.pos = self.pos.max(min).min(max);
    }
}

/// A falling square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per tick, fixed at spawn
    pub fall_speed: f32,
    /// Cosmetic only
    pub color: Color,
}

impl Obstacle {
    /// Spawn centred on a random column of the top edge
    pub fn spawn<R: Rng>(rng: &mut R, settings: &Settings) -> Self {
        let x = rng.random_range(0..=settings.screen_width as u32) as f32;
        let fall_speed =
            rng.random_range(settings.fall_speed_min..=settings.fall_speed_max) as f32;
        let max = settings.obstacle_color_max;
        let color = Color::rgb(
            rng.random_range(0..=max),
            rng.random_range(0..=max),
            rng.random_range(0..=max),
        );

        let rect = Rect::centered_square(Vec2::new(x, 0.0), settings.obstacle_size);
        Self {
            pos: rect.top_left(),
            size: settings.obstacle_size,
            fall_speed,
            color,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Move down by this obstacle's own speed
    #[inline]
    pub fn advance(&mut self) {
        self.pos.y += self.fall_speed;
    }

    /// True once the top edge has passed the bottom of the screen
    #[inline]
    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        self.pos.y > screen_height
    }
}

/// Unordered collection of live obstacles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Spawn `count` new obstacles along the top edge
    pub fn spawn_batch<R: Rng>(&mut self, rng: &mut R, settings: &Settings, count: u32) {
        self.obstacles
            .extend((0..count).map(|_| Obstacle::spawn(rng, settings)));
    }

    /// Advance every obstacle, then drop those that fell past the bottom.
    /// Returns the number removed.
    pub fn advance(&mut self, screen_height: f32) -> usize {
        for obstacle in &mut self.obstacles {
            obstacle.advance();
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen(screen_height));
        before - self.obstacles.len()
    }

    /// Remove everything. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let count = self.obstacles.len();
        self.obstacles.clear();
        count
    }

    /// First obstacle touching the given circle, if any
    pub fn first_hit(&self, center: Vec2, radius: f32) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| circle_rect_intersects(&o.rect(), center, radius))
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}

/// End-of-session report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub bombs_used: u32,
    pub ticks: u64,
    pub end_reason: Option<EndReason>,
}

/// Complete session state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
    pub player: Player,
    /// Player speed for the current mode (normal or slow)
    pub current_speed: f32,
    pub obstacles: ObstaclePool,
    pub bombs_used: u32,
    /// Simulation tick counter
    pub ticks: u64,
    /// Timer whose firings spawn obstacle batches
    pub spawn_timer: Option<TimerId>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            player: Player::new(&settings),
            current_speed: settings.normal_speed,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: GamePhase::Running,
            end_reason: None,
            obstacles: ObstaclePool::new(),
            bombs_used: 0,
            ticks: 0,
            spawn_timer: None,
            settings,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Playfield size as a vector
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.settings.screen_width, self.settings.screen_height)
    }

    /// Enter the terminal phase. The first reason given is kept.
    pub fn stop(&mut self, reason: EndReason) {
        if self.phase == GamePhase::Stopped {
            return;
        }
        log::info!("Session stopping at tick {}: {:?}", self.ticks, reason);
        self.phase = GamePhase::Stopped;
        self.end_reason = Some(reason);
    }

    /// Clear the screen of obstacles and count the bomb
    pub fn bomb(&mut self) {
        let cleared = self.obstacles.clear();
        self.bombs_used += 1;
        log::info!("Bomb #{} cleared {} obstacles", self.bombs_used, cleared);
    }

    /// Spawn one batch of obstacles from the session RNG
    pub fn spawn_batch(&mut self) {
        let count = self.settings.spawn_batch;
        self.obstacles
            .spawn_batch(&mut self.rng, &self.settings, count);
        log::debug!(
            "Spawned {} obstacles ({} live)",
            count,
            self.obstacles.len()
        );
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            bombs_used: self.bombs_used,
            ticks: self.ticks,
            end_reason: self.end_reason,
        }
    }
}
