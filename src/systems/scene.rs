//! Scene tree traversal and mutation.
//!
//! Functions here take `&mut World` and the entity whose [`SceneNode`] is
//! being operated on. The node can belong to a scene root or to an actor;
//! both are handled the same way.
//!
//! # Frame order
//!
//! [`update_scene_node`] visits the children present when it starts, in
//! insertion order, reading the live child list at each index. Actors added
//! while the node is being updated are appended and picked up next frame.
//! Once every child has been updated the node's kill queue is swept. Removed
//! actors leave the child list and lose their [`SceneParent`]; they stay
//! alive and can be added to another node. Killed actors are despawned
//! together with their own subtree.

use bevy_ecs::prelude::{Entity, World};

use crate::components::eventdispatcher::EventDispatcher;
use crate::components::scenenode::{Removal, Scene, SceneNode, SceneParent};
use crate::events::{EventType, GameEvent};
use crate::resources::activescene::ActiveScene;
use crate::resources::worldtime::WorldTime;
use crate::systems::actor::update_actor;

/// Spawn a scene root entity.
pub fn spawn_scene(world: &mut World, name: impl Into<String>) -> Entity {
    let name = name.into();
    let entity = world.spawn((Scene::new(name.clone()), SceneNode::new())).id();
    log::debug!("Spawned scene '{name}' as {entity:?}");
    entity
}

/// Attach `child` at the end of `parent`'s children.
///
/// Actors already attached somewhere, missing entities and parents without a
/// scene node are left untouched with a warning.
pub fn add_child(world: &mut World, parent: Entity, child: Entity) {
    if world.get_entity(child).is_err() {
        log::warn!("Cannot add {child:?} to {parent:?}: the entity does not exist");
        return;
    }
    if let Some(SceneParent(current)) = world.get::<SceneParent>(child).copied() {
        log::warn!("{child:?} already belongs to {current:?}; detach it before adding it to {parent:?}");
        return;
    }
    if parent == child {
        log::warn!("{child:?} cannot be its own child");
        return;
    }
    let Some(mut node) = world.get_mut::<SceneNode>(parent) else {
        log::warn!("{parent:?} has no scene node; cannot add {child:?}");
        return;
    };
    node.push(child);
    world.entity_mut(child).insert(SceneParent(parent));
}

fn schedule_removal(world: &mut World, parent: Entity, child: Entity, removal: Removal) {
    match world.get_mut::<SceneNode>(parent) {
        Some(mut node) => {
            if !node.contains(child) {
                log::debug!("{child:?} is not a child of {parent:?}; removal will be a no-op");
            }
            node.schedule_removal(child, removal);
        }
        None => log::warn!("{parent:?} has no scene node; cannot remove {child:?}"),
    }
}

/// Queue `child` for detachment at the end of `parent`'s next update. The
/// actor survives with no parent.
pub fn remove_child(world: &mut World, parent: Entity, child: Entity) {
    schedule_removal(world, parent, child, Removal::Detach);
}

/// Ask `entity`'s parent to remove it, then despawn it with its subtree.
///
/// Killing an actor that was never attached is a no-op with a warning.
pub fn kill_actor(world: &mut World, entity: Entity) {
    match world.get::<SceneParent>(entity).copied() {
        Some(SceneParent(parent)) => schedule_removal(world, parent, entity, Removal::Despawn),
        None => log::warn!("Cannot kill {entity:?}: it is not attached to any scene"),
    }
}

/// Queue `event` on every direct child of `parent`. Grandchildren are not
/// reached.
pub fn publish_to_children(world: &mut World, parent: Entity, event_type: EventType, event: GameEvent) {
    let children: Vec<Entity> = match world.get::<SceneNode>(parent) {
        Some(node) => node.children().to_vec(),
        None => return,
    };
    for child in children {
        if let Some(mut dispatcher) = world.get_mut::<EventDispatcher>(child) {
            dispatcher.publish(event_type.clone(), event.clone());
        }
    }
}

/// Update every child of `node`, then apply the node's kill queue.
pub fn update_scene_node(world: &mut World, node: Entity, delta: f32) {
    let len = match world.get::<SceneNode>(node) {
        Some(scene_node) => scene_node.len(),
        None => return,
    };
    for index in 0..len {
        let child = match world.get::<SceneNode>(node).and_then(|n| n.get(index)) {
            Some(child) => child,
            None => break,
        };
        update_actor(world, child, delta);
    }
    sweep_kill_queue(world, node);
}

/// Splice the actors queued on `node` out of its children, detaching or
/// despawning each one. Returns how many left.
pub fn sweep_kill_queue(world: &mut World, node: Entity) -> usize {
    let removed = match world.get_mut::<SceneNode>(node) {
        Some(mut scene_node) => {
            if scene_node.kill_queue().is_empty() {
                return 0;
            }
            scene_node.sweep()
        }
        None => return 0,
    };
    for &(entity, removal) in &removed {
        match removal {
            Removal::Detach => {
                log::trace!("Detaching {entity:?} from {node:?}");
                detach(world, entity, node);
            }
            Removal::Despawn => {
                log::trace!("Despawning {entity:?} from {node:?}");
                despawn_subtree(world, entity);
            }
        }
    }
    removed.len()
}

fn detach(world: &mut World, entity: Entity, node: Entity) {
    let Ok(mut child) = world.get_entity_mut(entity) else {
        return;
    };
    if child.get::<SceneParent>() == Some(&SceneParent(node)) {
        child.remove::<SceneParent>();
    }
}

/// Despawn `entity` and everything below it in the scene tree.
pub fn despawn_subtree(world: &mut World, entity: Entity) {
    let mut stack = vec![entity];
    let mut doomed = Vec::new();
    while let Some(current) = stack.pop() {
        if let Some(node) = world.get::<SceneNode>(current) {
            stack.extend_from_slice(node.children());
        }
        doomed.push(current);
    }
    for e in doomed {
        world.despawn(e);
    }
}

/// Number of actors in `root`'s subtree, `root` excluded.
pub fn subtree_len(world: &World, root: Entity) -> usize {
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(current) = stack.pop() {
        if let Some(node) = world.get::<SceneNode>(current) {
            count += node.len();
            stack.extend_from_slice(node.children());
        }
    }
    count
}

/// Exclusive system: advance the active scene by the frame delta.
///
/// Runs once per frame from the engine schedule, after the world time has
/// been advanced.
pub fn scene_update_system(world: &mut World) {
    let Some(ActiveScene(scene)) = world.get_resource::<ActiveScene>().copied() else {
        log::trace!("No active scene; nothing to update");
        return;
    };
    let delta = world
        .get_resource::<WorldTime>()
        .map_or(0.0, |time| time.delta);
    update_scene_node(world, scene, delta);
}
