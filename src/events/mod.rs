//! Event types delivered to actors.
//!
//! Actors receive events through their own
//! [`EventDispatcher`](crate::components::eventdispatcher::EventDispatcher):
//! publishing only queues the event, and delivery happens once per frame
//! during the receiving actor's update. Handlers therefore never run in the
//! middle of another actor's update.
//!
//! Submodules:
//! - [`collision`] – collision payload and the [`Side`](collision::Side) enum
//! - [`input`] – keyboard keys and pointer samples
//! - [`switchdebug`] – toggle debug drawing on/off

pub mod collision;
pub mod input;
pub mod switchdebug;

use bevy_ecs::prelude::Entity;

use crate::events::collision::CollisionEvent;
use crate::events::input::Key;

/// Name under which handlers subscribe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Collision,
    Click,
    MouseDown,
    MouseUp,
    Update,
    /// One event type per keyboard key.
    Key(Key),
    /// User-defined event name.
    Custom(String),
}

/// Typed payload handed to handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Collision(CollisionEvent),
    Click { x: f32, y: f32 },
    MouseDown { x: f32, y: f32 },
    MouseUp { x: f32, y: f32 },
    Key { actor: Entity, key: Key },
    Update { delta: f32 },
    Custom { name: String },
}
