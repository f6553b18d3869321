use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use vein_control::bsp::pin::Pin;

/// Terminals report presses and auto-repeats of a key, but never its release.
/// A key counts as held for this long after the last report. It has to outlast the
/// delay before the first auto-repeat (up to 600 ms on common terminals), otherwise
/// a held key reads as a series of presses.
pub const HOLD: Duration = Duration::from_millis(650);

/// Remembers when each key was last reported by the terminal
#[derive(Default)]
pub struct Keyboard {
    last_seen: RefCell<HashMap<KeyCode, Instant>>,
}

impl Keyboard {
    pub fn on_key(&self, code: KeyCode) {
        self.last_seen.borrow_mut().insert(code, Instant::now());
    }

    fn is_held(&self, keys: &[KeyCode]) -> bool {
        let last_seen = self.last_seen.borrow();
        keys.iter().any(|key| {
            last_seen
                .get(key)
                .map(|seen| seen.elapsed() < HOLD)
                .unwrap_or(false)
        })
    }
}

/// Button wired to one or more keys
pub struct KeyboardPin<'a> {
    keyboard: &'a Keyboard,
    keys: &'static [KeyCode],
}

impl<'a> KeyboardPin<'a> {
    /// Factory function to create a [KeyboardPin]
    pub fn create(keyboard: &'a Keyboard, keys: &'static [KeyCode]) -> KeyboardPin<'a> {
        KeyboardPin { keyboard, keys }
    }
}

impl Pin for KeyboardPin<'_> {
    /// returns true if one of the keys is held
    fn is_down(&self) -> bool {
        self.keyboard.is_held(self.keys)
    }
}
