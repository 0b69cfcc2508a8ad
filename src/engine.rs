//! Engine facade.
//!
//! [`Engine`] owns the ECS [`World`] and the frame [`Schedule`]. A frame
//! driver (the headless runner, the raylib window loop, or a test) calls
//! [`Engine::update`] with the elapsed milliseconds and the input collected
//! since the previous frame, then [`Engine::draw`] with a surface.
//!
//! Scenes are named entities. One of them is active at a time; only the
//! active scene is updated, drawn and used for collision scans.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::{Entity, Schedule, World};
use serde::Serialize;

use crate::bundles::ActorBundle;
use crate::components::actor::Actor;
use crate::components::drawings::Drawings;
use crate::components::label::Label;
use crate::components::particleemitter::ParticleEmitter;
use crate::components::scenenode::{Scene, SceneNode};
use crate::error::{EngineError, Result};
use crate::events::switchdebug::{SwitchDebugEvent, switch_debug_observer};
use crate::render::DrawSurface;
use crate::resources::activescene::ActiveScene;
use crate::resources::debugmode::DebugMode;
use crate::resources::engineconfig::EngineConfig;
use crate::resources::input::FrameInput;
use crate::resources::worldtime::WorldTime;
use crate::systems::render::draw_frame;
use crate::systems::scene::{add_child, scene_update_system, spawn_scene};
use crate::systems::time::update_world_time;

/// Name of the scene every engine starts with.
pub const ROOT_SCENE: &str = "root";

pub struct Engine {
    world: World,
    schedule: Schedule,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::with_time_scale(config.time_scale));
        world.insert_resource(FrameInput::new());
        if config.debug_draw {
            world.insert_resource(DebugMode {});
        }
        world.insert_resource(config);
        world.spawn(Observer::new(switch_debug_observer));

        let root = spawn_scene(&mut world, ROOT_SCENE);
        world.insert_resource(ActiveScene(root));

        let mut schedule = Schedule::default();
        schedule.add_systems(scene_update_system);

        Self { world, schedule }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &EngineConfig {
        self.world.resource::<EngineConfig>()
    }

    pub fn time(&self) -> WorldTime {
        *self.world.resource::<WorldTime>()
    }

    /// Simulate one frame of `delta` ms with this frame's input.
    pub fn update(&mut self, delta: f32, input: FrameInput) {
        self.world.insert_resource(input);
        update_world_time(&mut self.world, delta);
        self.schedule.run(&mut self.world);
    }

    /// Draw the active scene (and the debug overlay when enabled).
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        draw_frame(&self.world, surface);
    }

    pub fn is_debug(&self) -> bool {
        self.world.contains_resource::<DebugMode>()
    }

    /// Flip the debug overlay on or off.
    pub fn toggle_debug(&mut self) {
        self.world.trigger(SwitchDebugEvent {});
        self.world.flush();
    }

    /// Create a named scene. Names are not required to be unique; lookups
    /// return the first match.
    pub fn add_scene(&mut self, name: impl Into<String>) -> Entity {
        spawn_scene(&mut self.world, name)
    }

    pub fn scene(&mut self, name: &str) -> Option<Entity> {
        let mut query = self.world.query::<(Entity, &Scene)>();
        query
            .iter(&self.world)
            .filter(|(_, scene)| scene.name == name)
            .map(|(entity, _)| entity)
            .min()
    }

    /// Make the scene called `name` the active one.
    pub fn go_to_scene(&mut self, name: &str) -> Result<Entity> {
        let scene = self
            .scene(name)
            .ok_or_else(|| EngineError::SceneNotFound(name.to_string()))?;
        self.world.insert_resource(ActiveScene(scene));
        log::info!("Switched to scene '{name}'");
        Ok(scene)
    }

    pub fn current_scene(&self) -> Entity {
        self.world.resource::<ActiveScene>().0
    }

    /// Spawn an actor and attach it to the active scene.
    pub fn add_actor(&mut self, actor: Actor) -> Entity {
        let scene = self.current_scene();
        let entity = self.world.spawn(ActorBundle::new(actor)).id();
        add_child(&mut self.world, scene, entity);
        entity
    }

    /// Attach an already spawned actor to the active scene.
    pub fn add_child(&mut self, entity: Entity) {
        let scene = self.current_scene();
        add_child(&mut self.world, scene, entity);
    }

    /// Flattened state of the active scene, depth first.
    pub fn snapshot(&self) -> Vec<ActorSnapshot> {
        let mut out = Vec::new();
        self.collect_snapshot(self.current_scene(), 0, &mut out);
        out
    }

    fn collect_snapshot(&self, node: Entity, depth: usize, out: &mut Vec<ActorSnapshot>) {
        let Some(scene_node) = self.world.get::<SceneNode>(node) else {
            return;
        };
        for &child in scene_node.children() {
            if let Some(actor) = self.world.get::<Actor>(child) {
                out.push(ActorSnapshot {
                    entity: child.to_bits(),
                    depth,
                    x: actor.pos.x,
                    y: actor.pos.y,
                    width: actor.width(),
                    height: actor.height(),
                    rotation: actor.rotation,
                    scale: actor.scale,
                    invisible: actor.invisible,
                    drawing: self
                        .world
                        .get::<Drawings>(child)
                        .and_then(|d| d.current_name().map(str::to_string)),
                    label: self.world.get::<Label>(child).map(|l| l.text.clone()),
                    particles: self
                        .world
                        .get::<ParticleEmitter>(child)
                        .map(|e| e.particle_count()),
                });
            }
            self.collect_snapshot(child, depth + 1, out);
        }
    }
}

/// Serializable view of one actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorSnapshot {
    pub entity: u64,
    pub depth: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub scale: f32,
    pub invisible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particles: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_root_scene() {
        let mut engine = Engine::default();
        let root = engine.current_scene();
        assert_eq!(engine.scene(ROOT_SCENE), Some(root));
        assert!(!engine.is_debug());
    }

    #[test]
    fn test_go_to_unknown_scene_is_error() {
        let mut engine = Engine::default();
        let before = engine.current_scene();
        assert_eq!(
            engine.go_to_scene("nowhere"),
            Err(EngineError::SceneNotFound("nowhere".to_string()))
        );
        assert_eq!(engine.current_scene(), before);
    }

    #[test]
    fn test_only_active_scene_updates() {
        let mut engine = Engine::default();
        let a = engine.add_actor(Actor::new(0.0, 0.0, 1.0, 1.0).with_velocity(10.0, 0.0));
        let menu = engine.add_scene("menu");
        assert_eq!(engine.go_to_scene("menu"), Ok(menu));
        engine.update(1000.0, FrameInput::new());
        assert_eq!(engine.world().get::<Actor>(a).unwrap().pos.x, 0.0);

        engine.go_to_scene(ROOT_SCENE).unwrap();
        engine.update(1000.0, FrameInput::new());
        assert_eq!(engine.world().get::<Actor>(a).unwrap().pos.x, 10.0);
    }

    #[test]
    fn test_time_scale_from_config() {
        let mut config = EngineConfig::new();
        config.time_scale = 0.5;
        let mut engine = Engine::new(config);
        engine.update(100.0, FrameInput::new());
        assert_eq!(engine.time().delta, 50.0);
        assert_eq!(engine.time().frame_count, 1);
    }

    #[test]
    fn test_toggle_debug() {
        let mut engine = Engine::default();
        engine.toggle_debug();
        assert!(engine.is_debug());
        engine.toggle_debug();
        assert!(!engine.is_debug());
    }

    #[test]
    fn test_add_actor_attaches_to_active_scene() {
        let mut engine = Engine::default();
        let menu = engine.add_scene("menu");
        engine.go_to_scene("menu").unwrap();
        let a = engine.add_actor(Actor::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(engine.world().get::<SceneNode>(menu).unwrap().children(), &[a]);
        assert_eq!(engine.snapshot().len(), 1);
    }

    #[test]
    fn test_snapshot_is_depth_first() {
        let mut engine = Engine::default();
        let parent = engine.add_actor(Actor::new(1.0, 2.0, 3.0, 4.0));
        let child = engine.world_mut().spawn(ActorBundle::new(Actor::new(0.0, 0.0, 1.0, 1.0))).id();
        add_child(engine.world_mut(), parent, child);
        let snap = engine.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].entity, parent.to_bits());
        assert_eq!(snap[0].depth, 0);
        assert_eq!(snap[1].entity, child.to_bits());
        assert_eq!(snap[1].depth, 1);
        let json = serde_json::to_string(&snap[0]).unwrap();
        assert!(json.contains("\"x\":1.0"));
        assert!(!json.contains("label"));
    }
}
