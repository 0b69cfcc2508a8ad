//! Sample scene run by the `stagecraft` binary.
//!
//! A paddle steered with the arrow keys, a ball bouncing inside the walls, a
//! row of bricks that die when hit, a blinking title label and a particle
//! fountain pulled toward a focus point.

use bevy_ecs::prelude::{Entity, World};

use crate::bundles::{emitter_bundle, label_bundle};
use crate::components::actor::Actor;
use crate::components::particleemitter::ParticleEmitter;
use crate::engine::Engine;
use crate::events::collision::Side;
use crate::events::input::Key;
use crate::events::{EventType, GameEvent};
use crate::handle::ActorWorldExt;
use crate::math::Vector;
use crate::render::{Color, Flipbook, RectShape};
use crate::resources::input::FrameInput;

const PADDLE_SPEED: f32 = 300.0;
const BALL_SPEED: f32 = 180.0;
const BRICK_COLUMNS: usize = 8;

/// Entities of the sample scene.
#[derive(Debug, Clone)]
pub struct Demo {
    pub paddle: Entity,
    pub ball: Entity,
    pub bricks: Vec<Entity>,
    pub title: Entity,
    pub fountain: Entity,
}

/// Populate the engine's active scene.
pub fn build_demo(engine: &mut Engine) -> Demo {
    let (width, height) = engine.config().window_size();
    let (width, height) = (width as f32, height as f32);

    for wall in [
        Actor::new(-20.0, 0.0, 20.0, height),
        Actor::new(width, 0.0, 20.0, height),
        Actor::new(0.0, -20.0, width, 20.0),
    ] {
        engine.add_actor(wall.with_color(Color::BLUE));
    }

    let paddle = engine.add_actor(
        Actor::new(width / 2.0 - 40.0, height - 40.0, 80.0, 12.0)
            .with_color(Color::WHITE),
    );
    let ball = engine.add_actor(
        Actor::new(width / 2.0, height / 2.0, 10.0, 10.0)
            .with_color(Color::YELLOW)
            .with_velocity(BALL_SPEED, -BALL_SPEED)
            .kinematic(),
    );

    let brick_width = width / BRICK_COLUMNS as f32;
    let bricks: Vec<Entity> = (0..BRICK_COLUMNS)
        .map(|i| {
            engine.add_actor(
                Actor::new(i as f32 * brick_width + 2.0, 60.0, brick_width - 4.0, 16.0)
                    .with_color(Color::RED),
            )
        })
        .collect();

    let world = engine.world_mut();
    wire_paddle(world, paddle);
    wire_ball(world, ball);
    for &brick in &bricks {
        wire_brick(world, brick);
    }

    let title = world.spawn(label_bundle("stagecraft", 10.0, 30.0)).id();
    if let Ok(mut handle) = world.actor_mut(title) {
        handle.blink(2.0, 3000.0, None).delay(1000.0).repeat_forever();
    }
    engine.add_child(title);

    let mut emitter = ParticleEmitter::new();
    emitter.is_emitting = true;
    emitter.emit_rate = 30.0;
    emitter.particle_life = 1500.0;
    emitter.min_velocity = 40.0;
    emitter.max_velocity = 90.0;
    emitter.min_angle = -2.6;
    emitter.max_angle = -0.5;
    emitter.min_size = 1.0;
    emitter.max_size = 3.0;
    emitter.fade = true;
    emitter.focus = Some(Vector::new(0.0, -120.0));
    emitter.focus_accel = 60.0;
    emitter.particle_color = Color::YELLOW;
    let fountain = engine
        .world_mut()
        .spawn(emitter_bundle(20.0, height - 20.0, 10.0, 10.0, emitter))
        .id();
    engine.add_child(fountain);

    log::info!("Demo scene ready: {} bricks", bricks.len());
    Demo {
        paddle,
        ball,
        bricks,
        title,
        fountain,
    }
}

fn wire_paddle(world: &mut World, paddle: Entity) {
    let Ok(mut handle) = world.actor_mut(paddle) else {
        return;
    };
    handle
        .add_drawing(
            "idle",
            Box::new(RectShape::new(80.0, 12.0, Color::WHITE)),
        )
        .add_drawing(
            "moving",
            Box::new(Flipbook::new(
                vec![
                    Box::new(RectShape::new(80.0, 12.0, Color::WHITE)),
                    Box::new(RectShape::new(80.0, 12.0, Color::GREEN)),
                ],
                120.0,
            )),
        );
    for (key, dx) in [(Key::Left, -PADDLE_SPEED), (Key::Right, PADDLE_SPEED)] {
        handle.add_event_listener(EventType::Key(key), move |world, me, _| {
            if let Some(mut actor) = world.get_mut::<Actor>(me) {
                actor.velocity.x = dx;
            }
            if let Ok(mut handle) = world.actor_mut(me) {
                let _ = handle.set_drawing("moving");
            }
        });
    }
    // stop once neither arrow is held
    handle.add_event_listener(EventType::Update, |world, me, _| {
        let held = world
            .get_resource::<FrameInput>()
            .is_some_and(|input| input.is_pressed(Key::Left) || input.is_pressed(Key::Right));
        if !held {
            if let Some(mut actor) = world.get_mut::<Actor>(me) {
                actor.velocity.x = 0.0;
            }
            if let Ok(mut handle) = world.actor_mut(me) {
                let _ = handle.set_drawing("idle");
            }
        }
    });
}

fn wire_ball(world: &mut World, ball: Entity) {
    let Ok(mut handle) = world.actor_mut(ball) else {
        return;
    };
    handle.add_event_listener(EventType::Collision, |world, me, event| {
        let GameEvent::Collision(hit) = event else {
            return;
        };
        let Some(mut actor) = world.get_mut::<Actor>(me) else {
            return;
        };
        match hit.side {
            Side::Left => actor.velocity.x = -actor.velocity.x.abs(),
            Side::Right => actor.velocity.x = actor.velocity.x.abs(),
            Side::Top => actor.velocity.y = actor.velocity.y.abs(),
            Side::Bottom => actor.velocity.y = -actor.velocity.y.abs(),
            Side::None => {}
        }
    });
}

fn wire_brick(world: &mut World, brick: Entity) {
    let Ok(mut handle) = world.actor_mut(brick) else {
        return;
    };
    handle.add_event_listener(EventType::Collision, |world, me, _| {
        if let Ok(mut handle) = world.actor_mut(me) {
            handle.kill();
        }
    });
}
