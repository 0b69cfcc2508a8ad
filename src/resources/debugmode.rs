//! Debug toggle resource.
//!
//! The presence of this resource makes [`Engine::draw`] add the debug overlay
//! (actor boxes, particle counts, emitter focus markers). Remove it to turn
//! the overlay off.
//!
//! [`Engine::draw`]: crate::engine::Engine::draw

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the debug overlay is drawn.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DebugMode {}
