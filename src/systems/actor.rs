//! Per-actor frame update.
//!
//! [`update_actor`] is called by the scene traversal for every child of a
//! scene node. One call runs, in order:
//!
//! 1. the actor's own children ([`update_scene_node`]);
//! 2. delivery of the events queued on its dispatcher;
//! 3. the head of its action queue;
//! 4. the current drawable's animation;
//! 5. velocity, position, rotation and scale integration;
//! 6. the collision pass against the active scene;
//! 7. key, click and mouse-up events from [`FrameInput`];
//! 8. the `Update` event;
//! 9. particle emission and aging when the actor is an emitter.
//!
//! Events published in steps 6 to 8 are delivered during the next frame's
//! step 2.
//!
//! [`FrameInput`]: crate::resources::input::FrameInput

use bevy_ecs::prelude::{Entity, World};

use crate::components::actions::ActionQueue;
use crate::components::actor::Actor;
use crate::components::drawings::Drawings;
use crate::components::eventdispatcher::{EventDispatcher, deliver_events};
use crate::events::{EventType, GameEvent};
use crate::systems::collision::collide_with_scene;
use crate::systems::input::publish_input_events;
use crate::systems::particleemitter::update_emitter;
use crate::systems::scene::update_scene_node;

pub fn update_actor(world: &mut World, entity: Entity, delta: f32) {
    if world.get::<Actor>(entity).is_none() {
        log::debug!("{entity:?} is not an actor; skipping update");
        return;
    }

    update_scene_node(world, entity, delta);
    deliver_events(world, entity);
    // a handler may have despawned the actor
    if world.get::<Actor>(entity).is_none() {
        return;
    }

    advance_actions(world, entity, delta);

    if let Some(mut drawings) = world.get_mut::<Drawings>(entity) {
        drawings.tick(delta);
    }

    if let Some(mut actor) = world.get_mut::<Actor>(entity) {
        actor.integrate(delta);
    }

    collide_with_scene(world, entity);
    publish_input_events(world, entity);

    if let Some(mut dispatcher) = world.get_mut::<EventDispatcher>(entity) {
        dispatcher.publish(EventType::Update, GameEvent::Update { delta });
    }

    update_emitter(world, entity, delta);
}

fn advance_actions(world: &mut World, entity: Entity, delta: f32) {
    let mut query = world.query::<(&mut Actor, &mut ActionQueue)>();
    if let Ok((mut actor, mut queue)) = query.get_mut(world, entity) {
        if !queue.is_empty() {
            queue.update(&mut actor, delta);
        }
    }
}
