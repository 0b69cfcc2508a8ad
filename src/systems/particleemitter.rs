//! Particle emitter system.
//!
//! Drives the [`ParticleEmitter`] facet of one actor after its regular
//! update: emission, particle aging, then the dead sweep.
//!
//! # Behavior
//!
//! - Emits `ceil(emit_rate * delta / 1000)` particles while `is_emitting`;
//!   the remainder is dropped rather than accumulated
//! - Particles spawn inside the emitter's box, using its scaled size
//! - Particles that died this frame are removed before the call returns

use bevy_ecs::prelude::{Entity, World};

use crate::components::actor::Actor;
use crate::components::particleemitter::ParticleEmitter;

/// Advance the emitter on `entity`, if it has one. Returns the number of
/// particles spawned.
pub fn update_emitter(world: &mut World, entity: Entity, delta: f32) -> usize {
    let Some(origin) = world.get::<Actor>(entity).copied() else {
        return 0;
    };
    let Some(mut emitter) = world.get_mut::<ParticleEmitter>(entity) else {
        return 0;
    };

    let spawned = emitter.emission_count(delta);
    if spawned > 0 {
        emitter.emit(&origin, spawned);
    }
    emitter.update_particles(delta);
    let swept = emitter.sweep_dead();
    if spawned > 0 || swept > 0 {
        log::trace!(
            "{entity:?} emitted {spawned}, removed {swept}, {} alive",
            emitter.particle_count()
        );
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(emitter: ParticleEmitter) -> (World, Entity) {
        let mut world = World::new();
        let e = world
            .spawn((Actor::new(0.0, 0.0, 10.0, 10.0), emitter))
            .id();
        (world, e)
    }

    #[test]
    fn test_rate_10_over_100ms_spawns_one() {
        let mut emitter = ParticleEmitter::with_seed(11);
        emitter.is_emitting = true;
        emitter.emit_rate = 10.0;
        let (mut world, e) = setup(emitter);
        assert_eq!(update_emitter(&mut world, e, 100.0), 1);
        assert_eq!(world.get::<ParticleEmitter>(e).unwrap().particle_count(), 1);
    }

    #[test]
    fn test_not_emitting_spawns_nothing() {
        let (mut world, e) = setup(ParticleEmitter::with_seed(11));
        assert_eq!(update_emitter(&mut world, e, 1000.0), 0);
        assert_eq!(world.get::<ParticleEmitter>(e).unwrap().particle_count(), 0);
    }

    #[test]
    fn test_particles_expire_after_their_life() {
        let mut emitter = ParticleEmitter::with_seed(5);
        emitter.particle_life = 300.0;
        let (mut world, e) = setup(emitter);
        let origin = *world.get::<Actor>(e).unwrap();
        world.get_mut::<ParticleEmitter>(e).unwrap().emit(&origin, 3);

        update_emitter(&mut world, e, 200.0);
        assert_eq!(world.get::<ParticleEmitter>(e).unwrap().particle_count(), 3);
        update_emitter(&mut world, e, 100.0);
        // life is exactly zero: still alive for one more step
        assert_eq!(world.get::<ParticleEmitter>(e).unwrap().particle_count(), 3);
        update_emitter(&mut world, e, 16.0);
        let emitter = world.get::<ParticleEmitter>(e).unwrap();
        assert_eq!(emitter.particle_count(), 0);
        assert!(emitter.dead().is_empty());
    }

    #[test]
    fn test_plain_actor_is_ignored() {
        let mut world = World::new();
        let e = world.spawn(Actor::new(0.0, 0.0, 1.0, 1.0)).id();
        assert_eq!(update_emitter(&mut world, e, 100.0), 0);
    }
}
