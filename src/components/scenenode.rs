//! Scene tree components.
//!
//! A [`SceneNode`] holds an ordered list of child actors. Insertion order is
//! update and draw order. Removal goes through the node's kill queue and is
//! applied after the node's children have been updated, so the child list is
//! never spliced while the frame is walking it. Each queued actor carries a
//! [`Removal`]: detached actors survive with no parent, killed ones are
//! despawned with their subtree.
//!
//! The tree operations that need the world (attach, detach, sweep) live in
//! [`crate::systems::scene`].

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

/// What happens to a queued actor once it leaves the child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Keep the entity alive, parentless, ready to be added elsewhere.
    Detach,
    /// Despawn the entity and its subtree.
    Despawn,
}

/// Ordered children plus actors waiting for removal.
#[derive(Component, Debug, Clone, Default)]
pub struct SceneNode {
    children: Vec<Entity>,
    kill_queue: SmallVec<[(Entity, Removal); 4]>,
}

impl SceneNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.children.contains(&entity)
    }

    pub fn get(&self, index: usize) -> Option<Entity> {
        self.children.get(index).copied()
    }

    pub(crate) fn push(&mut self, entity: Entity) {
        self.children.push(entity);
    }

    /// Queue `entity` for removal at the end of this node's next update.
    ///
    /// An actor is queued once; a later `Despawn` request wins over an
    /// earlier `Detach`.
    pub fn schedule_removal(&mut self, entity: Entity, removal: Removal) {
        match self.kill_queue.iter_mut().find(|(e, _)| *e == entity) {
            Some(queued) => {
                if removal == Removal::Despawn {
                    queued.1 = Removal::Despawn;
                }
            }
            None => self.kill_queue.push((entity, removal)),
        }
    }

    pub fn is_scheduled_for_removal(&self, entity: Entity) -> bool {
        self.kill_queue.iter().any(|(e, _)| *e == entity)
    }

    pub fn kill_queue(&self) -> &[(Entity, Removal)] {
        &self.kill_queue
    }

    /// Splice queued actors out of the child list and clear the queue.
    ///
    /// Returns the actors that were actually removed. Queued actors that are
    /// not children are skipped.
    pub fn sweep(&mut self) -> SmallVec<[(Entity, Removal); 4]> {
        let mut removed = SmallVec::new();
        for (entity, removal) in self.kill_queue.drain(..) {
            match self.children.iter().position(|&c| c == entity) {
                Some(index) => {
                    self.children.remove(index);
                    removed.push((entity, removal));
                }
                None => log::debug!("{entity:?} queued for removal but not a child"),
            }
        }
        removed
    }
}

/// Weak link from an actor to the entity whose [`SceneNode`] holds it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneParent(pub Entity);

/// Marks a scene root entity.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub name: String,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
