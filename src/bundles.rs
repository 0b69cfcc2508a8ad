//! Component bundles for spawning actors.
//!
//! [`ActorBundle`] is the core set every actor carries. Labels and particle
//! emitters add their facet on top of it and change a few defaults.

use bevy_ecs::prelude::Bundle;

use crate::components::actions::ActionQueue;
use crate::components::actor::Actor;
use crate::components::drawings::Drawings;
use crate::components::eventdispatcher::EventDispatcher;
use crate::components::label::Label;
use crate::components::particleemitter::ParticleEmitter;
use crate::components::scenenode::SceneNode;
use crate::render::Color;

#[derive(Bundle, Default)]
pub struct ActorBundle {
    pub actor: Actor,
    pub actions: ActionQueue,
    pub events: EventDispatcher,
    pub children: SceneNode,
    pub drawings: Drawings,
}

impl ActorBundle {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            ..Default::default()
        }
    }
}

/// A white, fixed, non-colliding text actor at `(x, y)`.
pub fn label_bundle(text: impl Into<String>, x: f32, y: f32) -> (ActorBundle, Label) {
    let mut actor = Actor::new(x, y, 0.0, 0.0).with_color(Color::WHITE);
    actor.fixed = true;
    actor.prevent_collisions = true;
    (ActorBundle::new(actor), Label::new(text))
}

/// A white, non-colliding emitter covering the given box.
pub fn emitter_bundle(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    emitter: ParticleEmitter,
) -> (ActorBundle, ParticleEmitter) {
    let actor = Actor::new(x, y, width, height)
        .with_color(Color::WHITE)
        .without_collisions();
    (ActorBundle::new(actor), emitter)
}
