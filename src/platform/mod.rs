//! Platform abstraction layer
//!
//! Host-facing helpers that feed the simulation:
//! - Keyboard state (held left/right)
//! - Viewport sizing from the window

use crate::sim::{TickInput, Viewport};

/// Pixels trimmed from the window size so the canvas never triggers scrollbars
pub const WINDOW_MARGIN: f32 = 5.0;

/// Viewport for a window of the given inner size
pub fn viewport_for_window(inner_width: f32, inner_height: f32) -> Viewport {
    Viewport::new(
        (inner_width - WINDOW_MARGIN).max(0.0),
        (inner_height - WINDOW_MARGIN).max(0.0),
    )
}

/// Direction a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` name
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held-key state, updated by the host's key events and sampled once per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardInput {
    left: bool,
    right: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Returns true if the key is a game key.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Handle a key release. Returns true if the key is a game key.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    fn set(&mut self, key: &str, pressed: bool) -> bool {
        match Direction::from_key(key) {
            Some(Direction::Left) => self.left = pressed,
            Some(Direction::Right) => self.right = pressed,
            None => return false,
        }
        true
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the next tick
    pub fn sample(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("a"), None);
    }

    #[test]
    fn test_held_keys() {
        let mut keys = KeyboardInput::new();
        assert!(keys.key_down("ArrowRight"));
        assert!(!keys.key_down("Space"));
        assert_eq!(
            keys.sample(),
            TickInput {
                left: false,
                right: true
            }
        );

        keys.key_down("ArrowLeft");
        assert_eq!(
            keys.sample(),
            TickInput {
                left: true,
                right: true
            }
        );

        keys.key_up("ArrowRight");
        assert_eq!(
            keys.sample(),
            TickInput {
                left: true,
                right: false
            }
        );

        keys.clear();
        assert_eq!(keys.sample(), TickInput::default());
    }

    #[test]
    fn test_viewport_for_window() {
        assert_eq!(
            viewport_for_window(805.0, 605.0),
            Viewport::new(800.0, 600.0)
        );
        assert_eq!(viewport_for_window(2.0, 2.0), Viewport::new(0.0, 0.0));
    }
}
