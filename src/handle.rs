//! Fluent access to one actor.
//!
//! [`ActorMut`] borrows the world and names one actor entity. Its methods
//! mirror what scripts usually do with an actor: queue actions, manage
//! children, subscribe to events and pick drawings. Action methods return
//! the handle so they chain:
//!
//! ```no_run
//! # use bevy_ecs::world::World;
//! # use stagecraft::components::actor::Actor;
//! # use stagecraft::handle::ActorWorldExt;
//! let mut world = World::new();
//! let ball = world.spawn_actor(Actor::new(0.0, 0.0, 8.0, 8.0));
//! world
//!     .actor_mut(ball)
//!     .unwrap()
//!     .move_to(100.0, 0.0, 50.0)
//!     .delay(500.0)
//!     .move_to(0.0, 0.0, 50.0)
//!     .repeat_forever();
//! ```

use bevy_ecs::prelude::{Entity, Mut, World};

use crate::bundles::ActorBundle;
use crate::components::actions::{Action, ActionQueue};
use crate::components::actor::Actor;
use crate::components::drawings::Drawings;
use crate::components::eventdispatcher::EventDispatcher;
use crate::components::particleemitter::ParticleEmitter;
use crate::error::{EngineError, Result};
use crate::events::{EventType, GameEvent};
use crate::render::Drawable;
use crate::systems::scene;

pub struct ActorMut<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> ActorMut<'w> {
    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn world(&mut self) -> &mut World {
        self.world
    }

    pub fn actor(&self) -> Actor {
        self.world
            .get::<Actor>(self.entity)
            .copied()
            .unwrap_or_default()
    }

    /// Mutable access to the actor record.
    pub fn actor_mut(&mut self) -> Option<Mut<'_, Actor>> {
        self.world.get_mut::<Actor>(self.entity)
    }

    fn queue(&mut self, action: Action) -> &mut Self {
        match self.world.get_mut::<ActionQueue>(self.entity) {
            Some(mut queue) => queue.add(action),
            None => log::warn!("{:?} has no action queue", self.entity),
        }
        self
    }

    pub fn move_to(&mut self, x: f32, y: f32, speed: f32) -> &mut Self {
        self.queue(Action::move_to(x, y, speed))
    }

    pub fn move_by(&mut self, x: f32, y: f32, duration: f32) -> &mut Self {
        self.queue(Action::move_by(x, y, duration))
    }

    pub fn rotate_to(&mut self, radians: f32, speed: f32) -> &mut Self {
        self.queue(Action::rotate_to(radians, speed))
    }

    pub fn rotate_by(&mut self, radians: f32, duration: f32) -> &mut Self {
        self.queue(Action::rotate_by(radians, duration))
    }

    pub fn scale_to(&mut self, size: f32, speed: f32) -> &mut Self {
        self.queue(Action::scale_to(size, speed))
    }

    pub fn scale_by(&mut self, size: f32, duration: f32) -> &mut Self {
        self.queue(Action::scale_by(size, duration))
    }

    pub fn blink(&mut self, frequency: f32, duration: f32, blink_time: Option<f32>) -> &mut Self {
        self.queue(Action::blink(frequency, duration, blink_time))
    }

    pub fn delay(&mut self, duration: f32) -> &mut Self {
        self.queue(Action::delay(duration))
    }

    /// Run the actions queued so far `times` times in total; 0 is forever.
    pub fn repeat(&mut self, times: u32) -> &mut Self {
        if let Some(mut queue) = self.world.get_mut::<ActionQueue>(self.entity) {
            queue.repeat(times);
        }
        self
    }

    pub fn repeat_forever(&mut self) -> &mut Self {
        if let Some(mut queue) = self.world.get_mut::<ActionQueue>(self.entity) {
            queue.repeat_forever();
        }
        self
    }

    pub fn clear_actions(&mut self) -> &mut Self {
        if let Some(mut queue) = self.world.get_mut::<ActionQueue>(self.entity) {
            queue.clear();
        }
        self
    }

    pub fn add_child(&mut self, child: Entity) -> &mut Self {
        scene::add_child(self.world, self.entity, child);
        self
    }

    /// Spawn a new actor and attach it as a child. Returns the child.
    pub fn spawn_child(&mut self, actor: Actor) -> Entity {
        let child = self.world.spawn(ActorBundle::new(actor)).id();
        scene::add_child(self.world, self.entity, child);
        child
    }

    /// Detach `child` at the end of this actor's next update. The child
    /// survives and can be added elsewhere.
    pub fn remove_child(&mut self, child: Entity) -> &mut Self {
        scene::remove_child(self.world, self.entity, child);
        self
    }

    /// Ask the parent to remove this actor at the end of its next update,
    /// then despawn it with its subtree.
    pub fn kill(&mut self) {
        scene::kill_actor(self.world, self.entity);
    }

    pub fn add_event_listener<F>(&mut self, event_type: EventType, handler: F) -> &mut Self
    where
        F: FnMut(&mut World, Entity, &GameEvent) + Send + Sync + 'static,
    {
        if let Some(mut dispatcher) = self.world.get_mut::<EventDispatcher>(self.entity) {
            dispatcher.subscribe(event_type, Box::new(handler));
        }
        self
    }

    /// Queue an event on this actor; handlers see it on its next update.
    pub fn trigger_event(&mut self, event_type: EventType, event: GameEvent) -> &mut Self {
        if let Some(mut dispatcher) = self.world.get_mut::<EventDispatcher>(self.entity) {
            dispatcher.publish(event_type, event);
        }
        self
    }

    pub fn add_drawing(&mut self, name: impl Into<String>, drawable: Box<dyn Drawable>) -> &mut Self {
        match self.world.get_mut::<Drawings>(self.entity) {
            Some(mut drawings) => drawings.add_drawing(name, drawable),
            None => log::warn!("{:?} cannot hold drawings", self.entity),
        }
        self
    }

    pub fn set_drawing(&mut self, name: &str) -> Result<&mut Self> {
        self.world
            .get_mut::<Drawings>(self.entity)
            .ok_or(EngineError::ActorNotFound(self.entity))?
            .set_drawing(name)?;
        Ok(self)
    }

    /// True if the other actor's top-left corner is within `distance`.
    pub fn within(&self, other: Entity, distance: f32) -> bool {
        match self.world.get::<Actor>(other) {
            Some(other) => self.actor().within(other, distance),
            None => false,
        }
    }

    /// Spawn `count` particles now, if this actor is an emitter.
    pub fn emit(&mut self, count: usize) -> &mut Self {
        let origin = self.actor();
        if let Some(mut emitter) = self.world.get_mut::<ParticleEmitter>(self.entity) {
            emitter.emit(&origin, count);
        }
        self
    }

    pub fn clear_particles(&mut self) -> &mut Self {
        if let Some(mut emitter) = self.world.get_mut::<ParticleEmitter>(self.entity) {
            emitter.clear_particles();
        }
        self
    }
}

/// Actor helpers on [`World`].
pub trait ActorWorldExt {
    /// Spawn a detached actor with the core component set.
    fn spawn_actor(&mut self, actor: Actor) -> Entity;

    /// Handle to an existing actor.
    fn actor_mut(&mut self, entity: Entity) -> Result<ActorMut<'_>>;
}

impl ActorWorldExt for World {
    fn spawn_actor(&mut self, actor: Actor) -> Entity {
        self.spawn(ActorBundle::new(actor)).id()
    }

    fn actor_mut(&mut self, entity: Entity) -> Result<ActorMut<'_>> {
        if self.get::<Actor>(entity).is_none() {
            return Err(EngineError::ActorNotFound(entity));
        }
        Ok(ActorMut {
            world: self,
            entity,
        })
    }
}
