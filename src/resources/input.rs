//! Per-frame input resource.
//!
//! The frame driver fills [`FrameInput`] before each update: the keys held
//! down right now, plus the clicks and button releases collected since the
//! previous frame. Actors turn these samples into events on their own
//! dispatchers during the scene update. The driver clears the samples once
//! the frame is done.

use bevy_ecs::prelude::Resource;
use smallvec::SmallVec;

use crate::events::input::{Key, PointerSample};

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Keys currently held, in press order, without duplicates.
    pub keys: SmallVec<[Key; 8]>,
    pub clicks: Vec<PointerSample>,
    pub mouse_up: Vec<PointerSample>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn with_click(mut self, x: f32, y: f32) -> Self {
        self.clicks.push(PointerSample::new(x, y));
        self
    }

    pub fn with_mouse_up(mut self, x: f32, y: f32) -> Self {
        self.mouse_up.push(PointerSample::new(x, y));
        self
    }

    pub fn press(&mut self, key: Key) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.keys.retain(|k| *k != key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Drop the pointer samples; held keys stay held.
    pub fn clear_samples(&mut self) {
        self.clicks.clear();
        self.mouse_up.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_idempotent() {
        let mut input = FrameInput::new();
        input.press(Key::Left);
        input.press(Key::Left);
        input.press(Key::Space);
        assert_eq!(input.keys.as_slice(), &[Key::Left, Key::Space]);
        input.release(Key::Left);
        assert!(!input.is_pressed(Key::Left));
        assert!(input.is_pressed(Key::Space));
    }

    #[test]
    fn test_clear_samples_keeps_keys() {
        let mut input = FrameInput::new()
            .with_key(Key::Up)
            .with_click(1.0, 2.0)
            .with_mouse_up(3.0, 4.0);
        input.clear_samples();
        assert!(input.clicks.is_empty());
        assert!(input.mouse_up.is_empty());
        assert!(input.is_pressed(Key::Up));
    }
}
