//! Input systems.
//!
//! - [`publish_input_events`] turns the [`FrameInput`] samples into events on
//!   one actor's dispatcher during its update.
//! - `poll_raylib_input` (feature `raylib`) reads hardware input into
//!   [`FrameInput`] and reports whether the debug toggle was pressed.

use bevy_ecs::prelude::{Entity, World};

use crate::components::actor::Actor;
use crate::components::eventdispatcher::EventDispatcher;
use crate::events::{EventType, GameEvent};
use crate::resources::input::FrameInput;

/// Queue key, click and mouse-up events for `entity`.
///
/// Every held key produces a `Key` event. Each click inside the actor's box
/// produces `Click` then `MouseDown`; each release inside it produces
/// `MouseUp`. Returns the number of events queued.
pub fn publish_input_events(world: &mut World, entity: Entity) -> usize {
    let Some(actor) = world.get::<Actor>(entity).copied() else {
        return 0;
    };
    let mut queued: Vec<(EventType, GameEvent)> = Vec::new();
    if let Some(input) = world.get_resource::<FrameInput>() {
        for &key in &input.keys {
            queued.push((EventType::Key(key), GameEvent::Key { actor: entity, key }));
        }
        for click in input.clicks.iter().filter(|c| actor.contains(c.x, c.y)) {
            queued.push((EventType::Click, GameEvent::Click { x: click.x, y: click.y }));
            queued.push((
                EventType::MouseDown,
                GameEvent::MouseDown { x: click.x, y: click.y },
            ));
        }
        for up in input.mouse_up.iter().filter(|c| actor.contains(c.x, c.y)) {
            queued.push((EventType::MouseUp, GameEvent::MouseUp { x: up.x, y: up.y }));
        }
    }

    let count = queued.len();
    if count > 0 {
        if let Some(mut dispatcher) = world.get_mut::<EventDispatcher>(entity) {
            for (event_type, event) in queued {
                dispatcher.publish(event_type, event);
            }
        }
    }
    count
}

#[cfg(feature = "raylib")]
mod hardware {
    use raylib::prelude::{KeyboardKey, MouseButton, RaylibHandle};

    use crate::events::input::{Key, PointerSample};
    use crate::resources::input::FrameInput;

    const BINDINGS: [(KeyboardKey, Key); 16] = [
        (KeyboardKey::KEY_UP, Key::Up),
        (KeyboardKey::KEY_DOWN, Key::Down),
        (KeyboardKey::KEY_LEFT, Key::Left),
        (KeyboardKey::KEY_RIGHT, Key::Right),
        (KeyboardKey::KEY_SPACE, Key::Space),
        (KeyboardKey::KEY_ENTER, Key::Enter),
        (KeyboardKey::KEY_ESCAPE, Key::Escape),
        (KeyboardKey::KEY_LEFT_SHIFT, Key::Shift),
        (KeyboardKey::KEY_W, Key::W),
        (KeyboardKey::KEY_A, Key::A),
        (KeyboardKey::KEY_S, Key::S),
        (KeyboardKey::KEY_D, Key::D),
        (KeyboardKey::KEY_ONE, Key::Num1),
        (KeyboardKey::KEY_TWO, Key::Num2),
        (KeyboardKey::KEY_THREE, Key::Num3),
        (KeyboardKey::KEY_FOUR, Key::Num4),
    ];

    /// Poll raylib into `input`. Returns true when F1 (debug toggle) was
    /// pressed this frame.
    pub fn poll_raylib_input(rl: &RaylibHandle, input: &mut FrameInput) -> bool {
        for (binding, key) in BINDINGS {
            if rl.is_key_down(binding) {
                input.press(key);
            } else {
                input.release(key);
            }
        }
        let mouse = rl.get_mouse_position();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            input.clicks.push(PointerSample::new(mouse.x, mouse.y));
        }
        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            input.mouse_up.push(PointerSample::new(mouse.x, mouse.y));
        }
        rl.is_key_pressed(KeyboardKey::KEY_F1)
    }
}

#[cfg(feature = "raylib")]
pub use hardware::poll_raylib_input;
