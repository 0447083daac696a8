//! Input latch
//!
//! Host event handlers write here at any time; the game reads one
//! `TickInput` at the start of each tick, so a tick never sees input change
//! halfway through.

use crate::clamp_craft_y;
use crate::consts::*;
use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            _ => None,
        }
    }
}

/// Held keys and last pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    up: bool,
    down: bool,
    pointer_y: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            up: false,
            down: false,
            pointer_y: INITIAL_CRAFT_Y,
        }
    }
}

impl InputState {
    pub fn set_key(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
        }
    }

    /// Pointer position relative to the top of the play area. The craft is
    /// centred on the pointer, so the stored target is its top edge.
    pub fn set_pointer(&mut self, play_area_y: f32) {
        self.pointer_y = clamp_craft_y(play_area_y - CRAFT_HEIGHT / 2.0);
    }

    /// Set the craft-top target directly (autopilot)
    pub fn set_pointer_target(&mut self, craft_y: f32) {
        self.pointer_y = clamp_craft_y(craft_y);
    }

    pub fn pointer_y(&self) -> f32 {
        self.pointer_y
    }

    /// Forget the pointer position; held keys are left as they are
    pub fn reset_pointer(&mut self) {
        self.pointer_y = INITIAL_CRAFT_Y;
    }

    pub fn sample(&self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            pointer_y: self.pointer_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom_key("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_dom_key("w"), None);
    }

    #[test]
    fn test_held_state_not_edges() {
        let mut input = InputState::default();
        input.set_key(Key::Up, true);
        assert!(input.sample().up);
        assert!(input.sample().up);
        input.set_key(Key::Up, false);
        assert!(!input.sample().up);
    }

    #[test]
    fn test_pointer_centres_and_clamps() {
        let mut input = InputState::default();
        input.set_pointer(120.0);
        assert_eq!(input.pointer_y(), 100.0);
        input.set_pointer(-50.0);
        assert_eq!(input.pointer_y(), 0.0);
        input.set_pointer(10_000.0);
        assert_eq!(input.pointer_y(), GAME_HEIGHT - CRAFT_HEIGHT);
    }
}
