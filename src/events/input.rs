//! Input primitives supplied by the frame driver.
//!
//! The engine does not read hardware itself. Each tick the driver fills the
//! [`FrameInput`](crate::resources::input::FrameInput) resource with the keys
//! currently held and the pointer samples collected since the last tick.

use serde::{Deserialize, Serialize};

/// Keyboard keys the engine publishes events for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Shift,
    W,
    A,
    S,
    D,
    Num1,
    Num2,
    Num3,
    Num4,
    /// Any other key, by platform key code.
    Other(u32),
}

/// Screen-space pointer position of one click or release.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
