//! Input vocabulary shared by the simulation and the platform layer

use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to. Platforms map physical keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Modifier held for precise, slower movement
    Slow,
    /// Clear every obstacle on screen
    Bomb,
    Escape,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Slow,
        Key::Bomb,
        Key::Escape,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Handle returned when registering a recurring timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// A discrete event drained from the platform once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window closed / interrupt
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    TimerFired(TimerId),
}

/// Set of keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut held = HeldKeys::new();
        for key in iter {
            held.insert(key);
        }
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_set_ops() {
        let mut held = HeldKeys::new();
        assert!(held.is_empty());

        held.insert(Key::Left);
        held.insert(Key::Up);
        held.insert(Key::Left);
        assert!(held.contains(Key::Left));
        assert!(held.contains(Key::Up));
        assert!(!held.contains(Key::Right));
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![Key::Up, Key::Left]);

        held.remove(Key::Left);
        assert!(!held.contains(Key::Left));
        assert!(held.contains(Key::Up));
    }

    #[test]
    fn test_collect() {
        let held: HeldKeys = [Key::Down, Key::Right].into_iter().collect();
        assert!(held.contains(Key::Down) && held.contains(Key::Right));
        assert!(!held.contains(Key::Slow));
    }
}
