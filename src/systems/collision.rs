//! Scene-wide collision pass.
//!
//! Each actor checks itself against every direct child of the active scene,
//! whatever subtree it lives in itself. The pass is O(n²) per frame. The
//! list of scene children is read by index with live reads of the other
//! actors, so positions already resolved earlier in the frame are seen by
//! later actors.

use bevy_ecs::prelude::{Entity, World};

use crate::components::actor::Actor;
use crate::components::eventdispatcher::EventDispatcher;
use crate::components::scenenode::SceneNode;
use crate::events::collision::{CollisionEvent, Side};
use crate::events::{EventType, GameEvent};
use crate::resources::activescene::ActiveScene;

/// Collide `entity` with the active scene's children.
///
/// For each overlapping actor a [`CollisionEvent`] is queued on `entity`, and
/// a non-fixed actor is pushed out along the axis needing the least
/// displacement. Others flagged `prevent_collisions` are skipped. Returns
/// the number of collisions found.
pub fn collide_with_scene(world: &mut World, entity: Entity) -> usize {
    let Some(ActiveScene(scene)) = world.get_resource::<ActiveScene>().copied() else {
        return 0;
    };
    let count = match world.get::<SceneNode>(scene) {
        Some(node) => node.len(),
        None => return 0,
    };

    let mut hits = 0;
    for index in 0..count {
        let Some(other) = world.get::<SceneNode>(scene).and_then(|n| n.get(index)) else {
            break;
        };
        if other == entity {
            continue;
        }
        let Some(other_actor) = world.get::<Actor>(other).copied() else {
            continue;
        };
        if other_actor.prevent_collisions {
            continue;
        }
        let Some(mut actor) = world.get_mut::<Actor>(entity) else {
            return hits;
        };

        let side = actor.collides(&other_actor);
        if side == Side::None {
            continue;
        }
        let overlap = actor.overlap(&other_actor);
        if !actor.fixed {
            actor.resolve(overlap);
        }
        hits += 1;
        log::trace!("{entity:?} hit {other:?} on {side:?}, overlap {overlap:?}");

        if let Some(mut dispatcher) = world.get_mut::<EventDispatcher>(entity) {
            dispatcher.publish(
                EventType::Collision,
                GameEvent::Collision(CollisionEvent {
                    actor: entity,
                    other,
                    side,
                }),
            );
        }
    }
    hits
}
