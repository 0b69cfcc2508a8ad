//! Collision payload.
//!
//! The collision pass publishes a [`CollisionEvent`] on the moving actor
//! whenever its box overlaps another actor of the active scene. The event
//! names both participants and the [`Side`] reported by
//! [`Actor::collides`](crate::components::actor::Actor::collides).

use bevy_ecs::prelude::Entity;
use serde::{Deserialize, Serialize};

/// Face of a box struck in a collision.
///
/// The value is relative to the pair order: swapping the two boxes maps
/// `Top` to `Bottom` and `Left` to `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The side reported when the two boxes are swapped.
    pub fn opposite(self) -> Side {
        match self {
            Side::None => Side::None,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Event fired on `actor` when it overlaps `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// The actor whose update detected the collision.
    pub actor: Entity,
    /// The actor it collided with.
    pub other: Entity,
    pub side: Side,
}
