//! Fixed-step simulation tick
//!
//! Advances the game state by exactly one frame. Pure with respect to the
//! outside world: everything the tick needs arrives in [`TickInput`].

use super::input::{HeldKeys, InputEvent, Key};
use super::state::{EndReason, GameState};

/// Input for a single tick: the drained event queue plus the held-key snapshot
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
}

impl TickInput {
    pub fn new(events: Vec<InputEvent>, held: HeldKeys) -> Self {
        Self { events, held }
    }

    /// No events, nothing held
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Apply one discrete event
fn apply_event(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::Quit => state.stop(EndReason::Quit),
        InputEvent::KeyDown(Key::Slow) => state.current_speed = state.settings.slow_speed,
        InputEvent::KeyUp(Key::Slow) => state.current_speed = state.settings.normal_speed,
        InputEvent::KeyDown(Key::Escape) => state.stop(EndReason::Escape),
        InputEvent::KeyDown(Key::Bomb) => state.bomb(),
        InputEvent::TimerFired(id) if state.spawn_timer == Some(id) => state.spawn_batch(),
        other => log::trace!("Ignoring {:?}", other),
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.is_running() {
        return;
    }

    state.ticks += 1;

    // Every queued event is applied, even after one of them stops the
    // session; the rest of the frame still runs.
    for event in &input.events {
        apply_event(state, *event);
    }

    let field = state.field();
    state
        .player
        .update(&input.held, state.current_speed, field);

    let culled = state.obstacles.advance(field.y);
    if culled > 0 {
        log::trace!("Culled {} obstacles", culled);
    }

    let hit = state
        .obstacles
        .first_hit(state.player.pos, state.player.radius)
        .map(|o| o.pos);
    if let Some(pos) = hit {
        log::info!(
            "Player at {:?} hit obstacle at {:?} on tick {}",
            state.player.pos,
            pos,
            state.ticks
        );
        state.stop(EndReason::Collision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use crate::settings::Settings;
    use crate::sim::input::TimerId;
    use crate::sim::state::{GamePhase, Obstacle};
    use glam::Vec2;

    fn quiet_state(seed: u64) -> GameState {
        let settings = Settings {
            spawn_interval_ms: None,
            ..Default::default()
        };
        GameState::new(settings, seed)
    }

    fn events(events: &[InputEvent]) -> TickInput {
        TickInput::new(events.to_vec(), HeldKeys::new())
    }

    #[test]
    fn test_slow_mode_toggle() {
        let mut state = quiet_state(1);
        assert_eq!(state.current_speed, 6.0);

        tick(&mut state, &events(&[InputEvent::KeyDown(Key::Slow)]));
        assert_eq!(state.current_speed, 3.0);

        let held: HeldKeys = [Key::Right].into_iter().collect();
        tick(&mut state, &TickInput::new(Vec::new(), held));
        assert_eq!(state.player.pos.x, 203.0);

        tick(&mut state, &events(&[InputEvent::KeyUp(Key::Slow)]));
        assert_eq!(state.current_speed, 6.0);
    }

    #[test]
    fn test_escape_stops() {
        let mut state = quiet_state(1);
        tick(&mut state, &events(&[InputEvent::KeyDown(Key::Escape)]));
        assert_eq!(state.phase, GamePhase::Stopped);
        assert_eq!(state.end_reason, Some(EndReason::Escape));
        assert_eq!(state.bombs_used, 0);
    }

    #[test]
    fn test_quit_stops() {
        let mut state = quiet_state(1);
        tick(&mut state, &events(&[InputEvent::Quit]));
        assert_eq!(state.end_reason, Some(EndReason::Quit));
    }

    #[test]
    fn test_escape_keyup_ignored() {
        let mut state = quiet_state(1);
        tick(&mut state, &events(&[InputEvent::KeyUp(Key::Escape), InputEvent::KeyUp(Key::Bomb)]));
        assert!(state.is_running());
        assert_eq!(state.bombs_used, 0);
    }

    #[test]
    fn test_events_after_stop_still_apply() {
        let mut state = quiet_state(1);
        tick(
            &mut state,
            &events(&[InputEvent::KeyDown(Key::Escape), InputEvent::KeyDown(Key::Bomb)]),
        );
        assert_eq!(state.phase, GamePhase::Stopped);
        assert_eq!(state.bombs_used, 1);
    }

    #[test]
    fn test_stopped_state_is_frozen() {
        let mut state = quiet_state(1);
        tick(&mut state, &events(&[InputEvent::Quit]));
        let ticks = state.ticks;
        tick(&mut state, &events(&[InputEvent::KeyDown(Key::Bomb)]));
        assert_eq!(state.ticks, ticks);
        assert_eq!(state.bombs_used, 0);
    }

    #[test]
    fn test_spawn_timer_matches_id() {
        let mut state = quiet_state(1);
        state.spawn_timer = Some(TimerId(3));

        tick(&mut state, &events(&[InputEvent::TimerFired(TimerId(9))]));
        assert!(state.obstacles.is_empty());

        tick(&mut state, &events(&[InputEvent::TimerFired(TimerId(3))]));
        assert_eq!(state.obstacles.len(), 4);
    }

    #[test]
    fn test_bomb_with_ten_live_obstacles() {
        let mut state = quiet_state(1);
        for i in 0..10 {
            state.obstacles.push(Obstacle {
                pos: Vec2::new(i as f32 * 30.0, 0.0),
                size: 15.0,
                fall_speed: 2.0,
                color: Color::rgb(10, 10, 10),
            });
        }
        tick(&mut state, &events(&[InputEvent::KeyDown(Key::Bomb)]));
        assert_eq!(state.obstacles.len(), 0);
        assert_eq!(state.bombs_used, 1);
        assert!(state.is_running());
    }

    #[test]
    fn test_collision_on_exact_tick() {
        let mut state = quiet_state(1);
        // Centred over the player, bottom edge at 515, falling 5 px/tick.
        // Bottom reaches 550 (the player's centre) on tick 7.
        state.obstacles.push(Obstacle {
            pos: Vec2::new(192.5, 500.0),
            size: 15.0,
            fall_speed: 5.0,
            color: Color::rgb(0, 0, 0),
        });

        for _ in 0..6 {
            tick(&mut state, &TickInput::idle());
            assert!(state.is_running(), "stopped early on tick {}", state.ticks);
        }
        tick(&mut state, &TickInput::idle());
        assert_eq!(state.phase, GamePhase::Stopped);
        assert_eq!(state.end_reason, Some(EndReason::Collision));
        assert_eq!(state.ticks, 7);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut state1 = GameState::new(settings.clone(), 99999);
        let mut state2 = GameState::new(settings, 99999);
        state1.spawn_timer = Some(TimerId(0));
        state2.spawn_timer = Some(TimerId(0));

        let held: HeldKeys = [Key::Left].into_iter().collect();
        for i in 0..30 {
            let events = if i % 6 == 0 {
                vec![InputEvent::TimerFired(TimerId(0))]
            } else {
                Vec::new()
            };
            let input = TickInput::new(events, held);
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.ticks, state2.ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.obstacles, state2.obstacles);
    }
}
