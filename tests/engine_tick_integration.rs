//! Engine tick integration tests for actions, collision, input, events,
//! particles and drawing.

use bevy_ecs::prelude::*;

use stagecraft::components::actions::ActionQueue;
use stagecraft::components::actor::Actor;
use stagecraft::components::eventdispatcher::EventDispatcher;
use stagecraft::components::particleemitter::ParticleEmitter;
use stagecraft::engine::Engine;
use stagecraft::events::collision::{CollisionEvent, Side};
use stagecraft::events::input::Key;
use stagecraft::events::{EventType, GameEvent};
use stagecraft::handle::ActorWorldExt;
use stagecraft::render::recording::{DrawCommand, RecordingSurface};
use stagecraft::render::{Color, RectShape};
use stagecraft::resources::input::FrameInput;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Resource, Default)]
struct Hits(Vec<CollisionEvent>);

#[derive(Resource, Default)]
struct Seen(Vec<GameEvent>);

fn actor(engine: &Engine, e: Entity) -> Actor {
    *engine.world().get::<Actor>(e).unwrap()
}

fn tick(engine: &mut Engine, delta: f32) {
    engine.update(delta, FrameInput::new());
}

#[test]
fn move_to_arrives_without_overshoot() {
    let mut engine = Engine::default();
    let e = engine.add_actor(Actor::new(0.0, 0.0, 1.0, 1.0));
    engine.world_mut().actor_mut(e).unwrap().move_to(25.0, 0.0, 100.0);

    for _ in 0..10 {
        tick(&mut engine, 100.0);
    }
    assert!(approx_eq(actor(&engine, e).pos.x, 25.0));
    assert!(engine.world().get::<ActionQueue>(e).unwrap().is_empty());
}

#[test]
fn repeat_two_runs_the_sequence_twice() {
    let mut engine = Engine::default();
    let e = engine.add_actor(Actor::new(0.0, 0.0, 1.0, 1.0));
    engine
        .world_mut()
        .actor_mut(e)
        .unwrap()
        .move_by(10.0, 0.0, 100.0)
        .repeat(2);

    for _ in 0..20 {
        tick(&mut engine, 50.0);
    }
    assert!(approx_eq(actor(&engine, e).pos.x, 20.0));
    assert!(engine.world().get::<ActionQueue>(e).unwrap().is_empty());
}

#[test]
fn repeat_forever_keeps_going() {
    let mut engine = Engine::default();
    let e = engine.add_actor(Actor::new(0.0, 0.0, 1.0, 1.0));
    engine
        .world_mut()
        .actor_mut(e)
        .unwrap()
        .move_by(10.0, 0.0, 100.0)
        .repeat_forever();

    for _ in 0..50 {
        tick(&mut engine, 50.0);
    }
    assert!(actor(&engine, e).pos.x > 100.0);
    assert!(!engine.world().get::<ActionQueue>(e).unwrap().is_empty());
}

#[test]
fn collision_pushes_out_and_reports_side() {
    let mut engine = Engine::default();
    engine.world_mut().init_resource::<Hits>();
    let mover = engine.add_actor(Actor::new(0.0, 0.0, 10.0, 10.0).kinematic());
    let wall = engine.add_actor(Actor::new(8.0, 0.0, 10.0, 10.0));
    engine
        .world_mut()
        .actor_mut(mover)
        .unwrap()
        .add_event_listener(EventType::Collision, |world, _, event| {
            if let GameEvent::Collision(hit) = event {
                world.resource_mut::<Hits>().0.push(*hit);
            }
        });

    tick(&mut engine, 16.0);
    assert!(approx_eq(actor(&engine, mover).pos.x, -2.0));
    assert!(approx_eq(actor(&engine, wall).pos.x, 8.0));
    // published this frame, delivered on the next
    assert!(engine.world().resource::<Hits>().0.is_empty());

    tick(&mut engine, 16.0);
    let hits = &engine.world().resource::<Hits>().0;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].actor, mover);
    assert_eq!(hits[0].other, wall);
    assert_eq!(hits[0].side, Side::Left);
}

#[test]
fn fixed_actors_are_reported_but_not_moved() {
    let mut engine = Engine::default();
    let a = engine.add_actor(Actor::new(0.0, 0.0, 10.0, 10.0));
    let _b = engine.add_actor(Actor::new(5.0, 0.0, 10.0, 10.0));
    tick(&mut engine, 16.0);
    assert!(approx_eq(actor(&engine, a).pos.x, 0.0));
    let collisions = engine
        .world()
        .get::<EventDispatcher>(a)
        .unwrap()
        .pending()
        .filter(|(t, _)| *t == EventType::Collision)
        .count();
    assert_eq!(collisions, 1);
}

#[test]
fn prevent_collisions_hides_an_actor_from_others() {
    let mut engine = Engine::default();
    let a = engine.add_actor(Actor::new(0.0, 0.0, 10.0, 10.0).kinematic());
    let _ghost = engine.add_actor(Actor::new(5.0, 0.0, 10.0, 10.0).without_collisions());
    tick(&mut engine, 16.0);
    assert!(approx_eq(actor(&engine, a).pos.x, 0.0));
}

#[test]
fn input_turns_into_actor_events() {
    let mut engine = Engine::default();
    engine.world_mut().init_resource::<Seen>();
    let button = engine.add_actor(Actor::new(10.0, 10.0, 20.0, 20.0));
    {
        let mut handle = engine.world_mut().actor_mut(button).unwrap();
        for event_type in [EventType::Key(Key::Space), EventType::Click, EventType::MouseUp] {
            handle.add_event_listener(event_type, |world, _, event| {
                world.resource_mut::<Seen>().0.push(event.clone());
            });
        }
    }

    engine.update(
        16.0,
        FrameInput::new()
            .with_key(Key::Space)
            .with_click(15.0, 15.0)
            .with_click(100.0, 100.0)
            .with_mouse_up(12.0, 12.0),
    );
    tick(&mut engine, 16.0);

    let seen = &engine.world().resource::<Seen>().0;
    assert_eq!(seen.len(), 3);
    assert!(seen.contains(&GameEvent::Key {
        actor: button,
        key: Key::Space
    }));
    assert!(seen.contains(&GameEvent::Click { x: 15.0, y: 15.0 }));
    assert!(seen.contains(&GameEvent::MouseUp { x: 12.0, y: 12.0 }));
}

#[test]
fn update_event_carries_scaled_delta() {
    let mut config = stagecraft::resources::engineconfig::EngineConfig::new();
    config.time_scale = 2.0;
    let mut engine = Engine::new(config);
    engine.world_mut().init_resource::<Seen>();
    let e = engine.add_actor(Actor::new(0.0, 0.0, 1.0, 1.0));
    engine
        .world_mut()
        .actor_mut(e)
        .unwrap()
        .add_event_listener(EventType::Update, |world, _, event| {
            world.resource_mut::<Seen>().0.push(event.clone());
        });

    tick(&mut engine, 10.0);
    tick(&mut engine, 10.0);
    assert_eq!(
        engine.world().resource::<Seen>().0,
        vec![GameEvent::Update { delta: 20.0 }]
    );
}

#[test]
fn emitter_spawns_ceil_of_rate() {
    let mut engine = Engine::default();
    let mut emitter = ParticleEmitter::with_seed(3);
    emitter.is_emitting = true;
    emitter.emit_rate = 10.0;
    let e = engine
        .world_mut()
        .spawn(stagecraft::bundles::emitter_bundle(0.0, 0.0, 10.0, 10.0, emitter))
        .id();
    engine.add_child(e);

    tick(&mut engine, 100.0);
    let count = engine.world().get::<ParticleEmitter>(e).unwrap().particle_count();
    assert_eq!(count, 1);
}

#[test]
fn expired_particles_are_removed() {
    let mut engine = Engine::default();
    let mut emitter = ParticleEmitter::with_seed(5);
    emitter.particle_life = 300.0;
    let e = engine
        .world_mut()
        .spawn(stagecraft::bundles::emitter_bundle(0.0, 0.0, 10.0, 10.0, emitter))
        .id();
    engine.add_child(e);
    engine.world_mut().actor_mut(e).unwrap().emit(2);

    tick(&mut engine, 300.0);
    // life is exactly zero: staged on the next step
    assert_eq!(engine.world().get::<ParticleEmitter>(e).unwrap().particle_count(), 2);
    tick(&mut engine, 1.0);
    let emitter = engine.world().get::<ParticleEmitter>(e).unwrap();
    assert_eq!(emitter.particle_count(), 0);
    assert!(emitter.dead().is_empty());
}

#[test]
fn draw_is_own_shape_then_children_with_balanced_state() {
    let mut engine = Engine::default();
    let parent = engine.add_actor(Actor::new(5.0, 6.0, 10.0, 10.0).with_color(Color::RED));
    let child = engine
        .world_mut()
        .actor_mut(parent)
        .unwrap()
        .spawn_child(Actor::new(1.0, 1.0, 2.0, 2.0).with_color(Color::BLUE));
    engine
        .world_mut()
        .actor_mut(child)
        .unwrap()
        .add_drawing("dot", Box::new(RectShape::new(2.0, 2.0, Color::GREEN)));

    let mut surface = RecordingSurface::new();
    engine.draw(&mut surface);

    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.max_depth(), 2);
    let fills: Vec<Color> = surface
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![Color::RED, Color::GREEN]);
    assert_eq!(surface.commands[0], DrawCommand::Save);
    assert_eq!(surface.commands[1], DrawCommand::Translate { x: 5.0, y: 6.0 });
}

#[test]
fn invisible_actor_still_draws_children() {
    let mut engine = Engine::default();
    let parent = engine.add_actor(Actor::new(0.0, 0.0, 10.0, 10.0));
    engine
        .world_mut()
        .actor_mut(parent)
        .unwrap()
        .spawn_child(Actor::new(1.0, 1.0, 2.0, 2.0));
    engine.world_mut().get_mut::<Actor>(parent).unwrap().invisible = true;

    let mut surface = RecordingSurface::new();
    engine.draw(&mut surface);
    assert_eq!(surface.primitive_count(), 1);
    assert_eq!(surface.depth(), 0);
}

#[test]
fn debug_overlay_outlines_every_actor() {
    let mut engine = Engine::default();
    engine.add_actor(Actor::new(0.0, 0.0, 10.0, 10.0));
    engine.add_actor(Actor::new(20.0, 0.0, 10.0, 10.0));
    engine.toggle_debug();

    let mut surface = RecordingSurface::new();
    engine.draw(&mut surface);
    let outlines = surface
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
        .count();
    assert_eq!(outlines, 2);
    assert_eq!(surface.depth(), 0);
}
